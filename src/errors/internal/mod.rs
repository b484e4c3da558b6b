use thiserror::Error;

pub mod access;
pub mod credential;
pub mod database;
pub mod reservation;
pub mod token;
pub mod upload;
pub mod validation;

pub use access::AccessError;
pub use credential::CredentialError;
pub use database::DatabaseError;
pub use reservation::ReservationError;
pub use token::TokenError;
pub use upload::UploadError;
pub use validation::ValidationError;

/// Internal error type for store and service operations
///
/// Infrastructure errors (database, parse, crypto) are shared; domain errors
/// are grouped per concern. Not exposed via API - endpoints convert to
/// AuthError or ReservationApiError.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Reservation(#[from] ReservationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    pub fn transaction_begin(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionBegin { source })
    }

    pub fn transaction_commit(source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::TransactionCommit { source })
    }

    pub fn parse(value_type: &str, message: impl Into<String>) -> InternalError {
        InternalError::Parse {
            value_type: value_type.to_string(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: &str, message: impl Into<String>) -> InternalError {
        InternalError::Crypto {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// True for failures the caller could not have caused
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            InternalError::Database(_)
                | InternalError::Parse { .. }
                | InternalError::Crypto { .. }
                | InternalError::Upload(_)
        )
    }
}
