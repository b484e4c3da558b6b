// Stores layer - Data access and repository pattern
pub mod credential_store;
pub mod reservation_store;

pub use credential_store::CredentialStore;
pub use reservation_store::ReservationStore;
