// Services layer - Business logic and orchestration
pub mod crypto;
pub mod document_storage;
pub mod identity_service;
pub mod reservation_service;
pub mod signup_validator;
pub mod token_service;

pub use crypto::PasswordHasher;
pub use document_storage::{DocumentStorage, LocalDocumentStorage};
pub use identity_service::IdentityService;
pub use reservation_service::ReservationService;
pub use signup_validator::SignupValidator;
pub use token_service::TokenService;
