use chrono::{NaiveDate, NaiveTime};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::{NewReservation, ReservationView};

/// Booking request
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub user_id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: Option<String>,
    /// Requester name as given at booking time
    pub user_name: String,
    pub user_phone: String,
    pub user_email: Option<String>,
    /// YYYY-MM-DD
    pub reservation_date: NaiveDate,
    /// HH:MM:SS
    pub reservation_time: NaiveTime,
    pub guests: i32,
    pub special_requests: Option<String>,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(body: CreateReservationRequest) -> Self {
        NewReservation {
            user_id: body.user_id,
            restaurant_id: body.restaurant_id,
            restaurant_name: body.restaurant_name,
            user_name: body.user_name,
            user_phone: body.user_phone,
            user_email: body.user_email,
            reservation_date: body.reservation_date,
            reservation_time: body.reservation_time,
            guests: body.guests,
            special_requests: body.special_requests,
        }
    }
}

/// Body for reject and reject-cancellation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ReasonRequest {
    #[oai(default)]
    pub reason: String,
}

/// Body for the unchecked status setter
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    /// Any reservation status name, case-insensitive
    pub status: String,
    /// Kept only when the status is REJECTED
    pub reason: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct VisitStatusRequest {
    pub reservation_id: i64,
    /// PENDING, VISITED, NO_SHOW or BLACKLISTED
    pub visit_status: String,
    /// No-show or blacklist reason
    pub reason: Option<String>,
}

/// Reservation as returned by every reservation endpoint
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
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
    pub status: String,
    pub rejection_reason: Option<String>,
    pub visit_status: String,
    /// Unix timestamp of the VISITED confirmation
    pub visit_confirmed_at: Option<i64>,
    pub no_show_reason: Option<String>,
    pub blacklist_reason: Option<String>,
    pub is_blacklisted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<ReservationView> for ReservationResponse {
    fn from(view: ReservationView) -> Self {
        ReservationResponse {
            id: view.id,
            user_id: view.user_id,
            restaurant_id: view.restaurant_id,
            restaurant_name: view.restaurant_name,
            user_name: view.user_name,
            user_phone: view.user_phone,
            user_email: view.user_email,
            reservation_date: view.reservation_date,
            reservation_time: view.reservation_time,
            guests: view.guests,
            special_requests: view.special_requests,
            status: view.status.as_str().to_string(),
            rejection_reason: view.rejection_reason,
            visit_status: view.visit_status.as_str().to_string(),
            visit_confirmed_at: view.visit_confirmed_at,
            no_show_reason: view.no_show_reason,
            blacklist_reason: view.blacklist_reason,
            is_blacklisted: view.is_blacklisted,
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}
