use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::app_data::AppData;
use crate::errors::internal::{InternalError, ReservationError, ValidationError};
use crate::stores::{CredentialStore, ReservationStore};
use crate::types::db::reservation;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{NewReservation, ReservationStatus, ReservationUpdate, ReservationView, VisitStatus};

const SPECIAL_REQUESTS_MAX_LENGTH: usize = 1000;

/// Booking lifecycle: creation, guarded transitions, visit tracking and reads
///
/// Every mutation runs as one read-modify-write through
/// `ReservationStore::modify`; the transition rules live in the closures
/// handed to it.
pub struct ReservationService {
    reservation_store: Arc<ReservationStore>,
    credential_store: Arc<CredentialStore>,
}

impl ReservationService {
    /// Create ReservationService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            reservation_store: app_data.reservation_store.clone(),
            credential_store: app_data.credential_store.clone(),
        }
    }

    pub async fn create(&self, ctx: &RequestContext, request: NewReservation) -> Result<ReservationView, InternalError> {
        Self::validate_request(&request)?;

        let saved = self.reservation_store.insert(request).await?;

        tracing::info!(
            actor = %ctx.actor_id,
            request_id = %ctx.request_id,
            "Reservation {} created for user {} at restaurant {}",
            saved.id,
            saved.user_id,
            saved.restaurant_id
        );

        ReservationView::from_model(saved)
    }

    fn validate_request(request: &NewReservation) -> Result<(), InternalError> {
        if request.user_name.trim().is_empty() {
            return Err(ValidationError::invalid_field("user_name", "must not be blank").into());
        }
        if request.user_phone.trim().is_empty() {
            return Err(ValidationError::invalid_field("user_phone", "must not be blank").into());
        }
        if request.guests < 1 {
            return Err(ValidationError::invalid_field("guests", "must be at least 1").into());
        }
        if let Some(requests) = &request.special_requests {
            if requests.chars().count() > SPECIAL_REQUESTS_MAX_LENGTH {
                return Err(ValidationError::invalid_field(
                    "special_requests",
                    format!("must be at most {} characters", SPECIAL_REQUESTS_MAX_LENGTH),
                )
                .into());
            }
        }
        Ok(())
    }

    /// Approve a booking. No precondition on the current status.
    pub async fn approve(&self, ctx: &RequestContext, id: i64) -> Result<ReservationView, InternalError> {
        let saved = self
            .reservation_store
            .modify(id, |_| Ok(ReservationUpdate::status(ReservationStatus::Approved)))
            .await?;

        self.log_transition(ctx, &saved, "approve");
        ReservationView::from_model(saved)
    }

    /// Reject a booking, storing the reason as given
    pub async fn reject(&self, ctx: &RequestContext, id: i64, reason: &str) -> Result<ReservationView, InternalError> {
        let saved = self
            .reservation_store
            .modify(id, |_| {
                Ok(ReservationUpdate::status(ReservationStatus::Rejected).with_rejection_reason(reason))
            })
            .await?;

        self.log_transition(ctx, &saved, "reject");
        ReservationView::from_model(saved)
    }

    /// Set any status by name, bypassing the transition rules
    ///
    /// A non-empty reason is kept only when the target is REJECTED.
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        id: i64,
        status_name: &str,
        reason: Option<&str>,
    ) -> Result<ReservationView, InternalError> {
        let status = ReservationStatus::parse(status_name)?;

        let saved = self
            .reservation_store
            .modify(id, |_| {
                let update = ReservationUpdate::status(status);
                match non_empty(reason) {
                    Some(reason) if status == ReservationStatus::Rejected => Ok(update.with_rejection_reason(reason)),
                    _ => Ok(update),
                }
            })
            .await?;

        self.log_transition(ctx, &saved, "update_status");
        ReservationView::from_model(saved)
    }

    /// Customer cancellation
    ///
    /// A PENDING booking is cancelled outright; an APPROVED one needs the
    /// store to confirm and goes to CANCELLED_PENDING.
    pub async fn cancel(&self, ctx: &RequestContext, id: i64) -> Result<ReservationView, InternalError> {
        let saved = self
            .reservation_store
            .modify(id, |current| match ReservationStatus::parse(&current.status)? {
                ReservationStatus::Pending => Ok(ReservationUpdate::status(ReservationStatus::Cancelled)),
                ReservationStatus::Approved => Ok(ReservationUpdate::status(ReservationStatus::CancelledPending)),
                other => Err(ReservationError::invalid_transition(id, other.as_str(), "cancel").into()),
            })
            .await
            .inspect_err(|e| tracing::debug!(request_id = %ctx.request_id, "Cancel of reservation {} refused: {}", id, e))?;

        self.log_transition(ctx, &saved, "cancel");
        ReservationView::from_model(saved)
    }

    pub async fn approve_cancellation(&self, ctx: &RequestContext, id: i64) -> Result<ReservationView, InternalError> {
        let saved = self
            .reservation_store
            .modify(id, |current| {
                require_cancellation_pending(current, "approve cancellation of")?;
                Ok(ReservationUpdate::status(ReservationStatus::Cancelled))
            })
            .await?;

        self.log_transition(ctx, &saved, "approve_cancellation");
        ReservationView::from_model(saved)
    }

    /// Refuse a cancellation request; the booking returns to APPROVED
    pub async fn reject_cancellation(
        &self,
        ctx: &RequestContext,
        id: i64,
        reason: &str,
    ) -> Result<ReservationView, InternalError> {
        let saved = self
            .reservation_store
            .modify(id, |current| {
                require_cancellation_pending(current, "reject cancellation of")?;
                Ok(ReservationUpdate::status(ReservationStatus::Approved).with_rejection_reason(reason))
            })
            .await?;

        self.log_transition(ctx, &saved, "reject_cancellation");
        ReservationView::from_model(saved)
    }

    /// Record the visit outcome, whatever the booking status is
    pub async fn update_visit_status(
        &self,
        ctx: &RequestContext,
        id: i64,
        visit_status_name: &str,
        reason: Option<&str>,
    ) -> Result<ReservationView, InternalError> {
        let visit_status = VisitStatus::parse(visit_status_name)?;
        let reason = non_empty(reason).map(str::to_string);

        let saved = self
            .reservation_store
            .modify(id, |_| {
                let mut update = ReservationUpdate {
                    visit_status: Some(visit_status),
                    ..Default::default()
                };
                match visit_status {
                    VisitStatus::Visited => {
                        update.status = Some(ReservationStatus::Completed);
                        update.visit_confirmed_at = Some(Utc::now().timestamp());
                    }
                    VisitStatus::NoShow => update.no_show_reason = reason,
                    VisitStatus::Blacklisted => {
                        update.is_blacklisted = Some(true);
                        update.blacklist_reason = reason;
                    }
                    VisitStatus::Pending => {}
                }
                Ok(update)
            })
            .await?;

        tracing::info!(
            actor = %ctx.actor_id,
            request_id = %ctx.request_id,
            "Reservation {} visit status set to {}",
            saved.id,
            saved.visit_status
        );
        ReservationView::from_model(saved)
    }

    pub async fn get(&self, id: i64) -> Result<ReservationView, InternalError> {
        let model = self
            .reservation_store
            .find_by_id(id)
            .await?
            .ok_or(ReservationError::NotFound(id))?;

        let mut views = self.enrich(vec![model]).await?;
        views.pop().ok_or_else(|| ReservationError::NotFound(id).into())
    }

    /// Bookings of one user, newest first, with the snapshot names as stored
    pub async fn by_user(&self, user_id: i64) -> Result<Vec<ReservationView>, InternalError> {
        self.reservation_store
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(ReservationView::from_model)
            .collect()
    }

    pub async fn by_restaurant(&self, restaurant_id: i64) -> Result<Vec<ReservationView>, InternalError> {
        let models = self.reservation_store.list_by_restaurant(restaurant_id).await?;
        self.enrich(models).await
    }

    pub async fn all(&self) -> Result<Vec<ReservationView>, InternalError> {
        let models = self.reservation_store.list_all().await?;
        self.enrich(models).await
    }

    pub async fn by_visit_status(&self, visit_status_name: &str) -> Result<Vec<ReservationView>, InternalError> {
        let visit_status = VisitStatus::parse(visit_status_name)?;
        let models = self.reservation_store.list_by_visit_status(visit_status).await?;
        self.enrich(models).await
    }

    pub async fn blacklisted(&self) -> Result<Vec<ReservationView>, InternalError> {
        let models = self.reservation_store.list_blacklisted().await?;
        self.enrich(models).await
    }

    /// Project rows into views carrying the requester's current name
    ///
    /// Users are looked up once per id. A failed or empty lookup keeps the
    /// name captured at booking time.
    async fn enrich(&self, models: Vec<reservation::Model>) -> Result<Vec<ReservationView>, InternalError> {
        let mut names: HashMap<i64, Option<String>> = HashMap::new();
        let mut views = Vec::with_capacity(models.len());

        for model in models {
            let user_id = model.user_id;
            if !names.contains_key(&user_id) {
                let name = match self.credential_store.find_by_id(user_id).await {
                    Ok(user) => user.map(|u| u.real_name),
                    Err(e) => {
                        tracing::warn!("Requester lookup for user {} failed: {}", user_id, e);
                        None
                    }
                };
                names.insert(user_id, name);
            }

            let view = ReservationView::from_model(model)?;
            let view = match names.get(&user_id).cloned().flatten() {
                Some(name) => view.with_requester_name(name),
                None => view,
            };
            views.push(view);
        }

        Ok(views)
    }

    fn log_transition(&self, ctx: &RequestContext, saved: &reservation::Model, action: &str) {
        tracing::info!(
            actor = %ctx.actor_id,
            request_id = %ctx.request_id,
            "Reservation {} {} -> {}",
            saved.id,
            action,
            saved.status
        );
    }
}

fn require_cancellation_pending(current: &reservation::Model, action: &str) -> Result<(), InternalError> {
    let status = ReservationStatus::parse(&current.status)?;
    if status != ReservationStatus::CancelledPending {
        return Err(ReservationError::invalid_transition(current.id, status.as_str(), action).into());
    }
    Ok(())
}

fn non_empty(reason: Option<&str>) -> Option<&str> {
    reason.filter(|r| !r.trim().is_empty())
}

#[cfg(test)]
#[path = "reservation_service_tests.rs"]
mod reservation_service_tests;
