// API layer - HTTP endpoints
pub mod admin;
pub mod auth;
pub mod gate;
pub mod health;
pub mod reservation;

pub use admin::AdminApi;
pub use auth::{AuthApi, BearerAuth};
pub use gate::AccessGate;
pub use health::HealthApi;
pub use reservation::ReservationApi;
