use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::errors::internal::{InternalError, ValidationError};
use crate::types::db::reservation;

/// Booking status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    /// Customer asked to cancel an approved booking; the store has to decide
    CancelledPending,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Approved => "APPROVED",
            ReservationStatus::Rejected => "REJECTED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::CancelledPending => "CANCELLED_PENDING",
            ReservationStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReservationStatus::Pending),
            "APPROVED" => Ok(ReservationStatus::Approved),
            "REJECTED" => Ok(ReservationStatus::Rejected),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            "CANCELLED_PENDING" => Ok(ReservationStatus::CancelledPending),
            "COMPLETED" => Ok(ReservationStatus::Completed),
            _ => Err(ValidationError::invalid_status_name("reservation status", value).into()),
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visit outcome, tracked independently of the booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    Pending,
    Visited,
    NoShow,
    Blacklisted,
}

impl VisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Pending => "PENDING",
            VisitStatus::Visited => "VISITED",
            VisitStatus::NoShow => "NO_SHOW",
            VisitStatus::Blacklisted => "BLACKLISTED",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(VisitStatus::Pending),
            "VISITED" => Ok(VisitStatus::Visited),
            "NO_SHOW" => Ok(VisitStatus::NoShow),
            "BLACKLISTED" => Ok(VisitStatus::Blacklisted),
            _ => Err(ValidationError::invalid_status_name("visit status", value).into()),
        }
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking request as accepted by the lifecycle engine
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: Option<String>,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: Option<String>,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guests: i32,
    pub special_requests: Option<String>,
}

/// Field changes decided by a lifecycle transition
///
/// `None` leaves the column untouched; reasons are never cleared.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReservationUpdate {
    pub status: Option<ReservationStatus>,
    pub rejection_reason: Option<String>,
    pub visit_status: Option<VisitStatus>,
    pub visit_confirmed_at: Option<i64>,
    pub no_show_reason: Option<String>,
    pub blacklist_reason: Option<String>,
    pub is_blacklisted: Option<bool>,
}

impl ReservationUpdate {
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn with_rejection_reason(mut self, reason: impl Into<String>) -> Self {
        self.rejection_reason = Some(reason.into());
        self
    }
}

/// Read-side projection of a reservation row
///
/// `user_name` starts as the snapshot taken at booking time and may be
/// replaced by the account's current name when the view is enriched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationView {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: Option<String>,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: Option<String>,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub guests: i32,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub rejection_reason: Option<String>,
    pub visit_status: VisitStatus,
    pub visit_confirmed_at: Option<i64>,
    pub no_show_reason: Option<String>,
    pub blacklist_reason: Option<String>,
    pub is_blacklisted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ReservationView {
    pub fn from_model(model: reservation::Model) -> Result<Self, InternalError> {
        Ok(Self {
            status: ReservationStatus::parse(&model.status)?,
            visit_status: VisitStatus::parse(&model.visit_status)?,
            id: model.id,
            user_id: model.user_id,
            restaurant_id: model.restaurant_id,
            restaurant_name: model.restaurant_name,
            user_name: model.user_name,
            user_phone: model.user_phone,
            user_email: model.user_email,
            reservation_date: model.reservation_date,
            reservation_time: model.reservation_time,
            guests: model.guests,
            special_requests: model.special_requests,
            rejection_reason: model.rejection_reason,
            visit_confirmed_at: model.visit_confirmed_at,
            no_show_reason: model.no_show_reason,
            blacklist_reason: model.blacklist_reason,
            is_blacklisted: model.is_blacklisted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    pub fn with_requester_name(mut self, name: String) -> Self {
        self.user_name = name;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_status_parse_accepts_lowercase() {
        assert_eq!(
            ReservationStatus::parse("cancelled_pending").unwrap(),
            ReservationStatus::CancelledPending
        );
        assert_eq!(ReservationStatus::parse("Completed").unwrap(), ReservationStatus::Completed);
    }

    #[test]
    fn test_visit_status_parse_rejects_unknown() {
        assert_eq!(VisitStatus::parse("no_show").unwrap(), VisitStatus::NoShow);
        match VisitStatus::parse("LATE") {
            Err(InternalError::Validation(ValidationError::InvalidStatusName { kind, .. })) => {
                assert_eq!(kind, "visit status");
            }
            other => panic!("Expected InvalidStatusName, got {:?}", other),
        }
    }
}
