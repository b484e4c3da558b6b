// API-facing error types
pub mod auth;
pub mod reservation;

pub use auth::AuthError;
pub use reservation::ReservationApiError;

use crate::errors::internal::{
    AccessError, CredentialError, InternalError, ReservationError, TokenError, ValidationError,
};

pub(crate) const GENERIC_INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Map an internal error to an HTTP status and a client-safe message
///
/// Domain errors keep their message. Infrastructure errors are logged with
/// full detail and collapse to a generic 500.
pub(crate) fn classify(err: &InternalError) -> (u16, String) {
    match err {
        InternalError::Validation(ValidationError::InvalidField { field, message }) => {
            tracing::debug!("Validation failed for {}: {}", field, message);
            (400, err.to_string())
        }
        InternalError::Validation(ValidationError::InvalidStatusName { kind, value }) => {
            tracing::debug!("Unknown {} '{}'", kind, value);
            (400, err.to_string())
        }
        InternalError::Credential(CredentialError::DuplicateIdentity { field, value }) => {
            tracing::warn!("Duplicate {} on signup: {}", field, value);
            (400, err.to_string())
        }
        InternalError::Credential(CredentialError::UserNotFound(who)) => {
            tracing::debug!("User not found: {}", who);
            (404, err.to_string())
        }
        InternalError::Credential(CredentialError::BadCredential) => {
            tracing::debug!("Invalid credentials attempt");
            (400, err.to_string())
        }
        InternalError::Credential(
            CredentialError::AccountNotActive { .. }
            | CredentialError::AccountNotApproved { .. }
            | CredentialError::WrongRole { .. }
            | CredentialError::InvalidDocument(_),
        ) => {
            tracing::debug!("Identity request refused: {}", err);
            (400, err.to_string())
        }
        InternalError::Reservation(ReservationError::NotFound(id)) => {
            tracing::debug!("Reservation {} not found", id);
            (404, err.to_string())
        }
        InternalError::Reservation(ReservationError::InvalidTransition { .. }) => {
            tracing::debug!("Refused transition: {}", err);
            (400, err.to_string())
        }
        InternalError::Token(TokenError::MalformedToken(reason)) => {
            tracing::debug!("Malformed token: {}", reason);
            (401, err.to_string())
        }
        InternalError::Access(AccessError::Unauthenticated) => (401, err.to_string()),
        InternalError::Access(AccessError::Unauthorized { role }) => {
            tracing::warn!("Role {} refused by access gate", role);
            (403, err.to_string())
        }
        InternalError::Token(TokenError::SigningFailed(_))
        | InternalError::Database(_)
        | InternalError::Parse { .. }
        | InternalError::Crypto { .. }
        | InternalError::Upload(_) => {
            tracing::error!("Unexpected failure: {}", err);
            (500, GENERIC_INTERNAL_MESSAGE.to_string())
        }
    }
}
