use crate::errors::api::classify;
use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorEnvelope;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors returned by identity and admin endpoints
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Malformed input, duplicate identity or refused login
    #[oai(status = 400)]
    BadRequest(Json<ErrorEnvelope>),

    /// Missing, invalid or expired token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorEnvelope>),

    /// Token role not permitted for this endpoint
    #[oai(status = 403)]
    Forbidden(Json<ErrorEnvelope>),

    /// Account does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorEnvelope>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorEnvelope>),
}

impl AuthError {
    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    pub fn from_internal_error(err: InternalError) -> Self {
        let (status, message) = classify(&err);
        let body = Json(ErrorEnvelope {
            status,
            message,
            data: None,
        });

        match status {
            400 => AuthError::BadRequest(body),
            401 => AuthError::Unauthenticated(body),
            403 => AuthError::Forbidden(body),
            404 => AuthError::NotFound(body),
            _ => AuthError::InternalError(body),
        }
    }

    fn envelope(&self) -> &ErrorEnvelope {
        match self {
            AuthError::BadRequest(json)
            | AuthError::Unauthenticated(json)
            | AuthError::Forbidden(json)
            | AuthError::NotFound(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }

    pub fn status(&self) -> u16 {
        self.envelope().status
    }

    pub fn message(&self) -> String {
        self.envelope().message.clone()
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
