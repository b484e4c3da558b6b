pub mod auth;
pub mod context;
pub mod identity;
pub mod reservation;
pub mod role;

pub use auth::Claims;
pub use identity::{BusinessDocument, NewAccount, NewOwner, Session};
pub use reservation::{NewReservation, ReservationStatus, ReservationUpdate, ReservationView, VisitStatus};
pub use role::{CustomerStatus, OwnerStatus, Role};
