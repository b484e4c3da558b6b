// Database entities (sea-orm)
pub mod reservation;
pub mod user;
