use crate::errors::api::classify;
use crate::errors::internal::InternalError;
use crate::types::dto::common::ErrorEnvelope;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors returned by reservation endpoints
#[derive(ApiResponse, Debug)]
pub enum ReservationApiError {
    /// Validation failure, unknown status name or refused transition
    #[oai(status = 400)]
    BadRequest(Json<ErrorEnvelope>),

    /// Missing, invalid or expired token
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorEnvelope>),

    /// Token role not permitted for this endpoint
    #[oai(status = 403)]
    Forbidden(Json<ErrorEnvelope>),

    /// Reservation does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorEnvelope>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorEnvelope>),
}

impl ReservationApiError {
    pub fn from_internal_error(err: InternalError) -> Self {
        let (status, message) = classify(&err);
        let body = Json(ErrorEnvelope {
            status,
            message,
            data: None,
        });

        match status {
            400 => ReservationApiError::BadRequest(body),
            401 => ReservationApiError::Unauthenticated(body),
            403 => ReservationApiError::Forbidden(body),
            404 => ReservationApiError::NotFound(body),
            _ => ReservationApiError::InternalError(body),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ReservationApiError::BadRequest(json)
            | ReservationApiError::Unauthenticated(json)
            | ReservationApiError::Forbidden(json)
            | ReservationApiError::NotFound(json)
            | ReservationApiError::InternalError(json) => json.0.status,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReservationApiError::BadRequest(json)
            | ReservationApiError::Unauthenticated(json)
            | ReservationApiError::Forbidden(json)
            | ReservationApiError::NotFound(json)
            | ReservationApiError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl From<InternalError> for ReservationApiError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ReservationApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
