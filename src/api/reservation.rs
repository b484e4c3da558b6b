use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::api::gate::{AccessGate, ADMIN_ONLY, ANY_ROLE, CUSTOMER_OR_ADMIN, OWNER_OR_ADMIN};
use crate::errors::api::ReservationApiError;
use crate::services::ReservationService;
use crate::types::dto::reservation::{
    CreateReservationRequest, ReasonRequest, ReservationResponse, StatusChangeRequest, VisitStatusRequest,
};
use crate::types::internal::ReservationView;

type ReservationResult = Result<Json<ReservationResponse>, ReservationApiError>;
type ReservationListResult = Result<Json<Vec<ReservationResponse>>, ReservationApiError>;

fn one(view: ReservationView) -> Json<ReservationResponse> {
    Json(view.into())
}

fn many(views: Vec<ReservationView>) -> Json<Vec<ReservationResponse>> {
    Json(views.into_iter().map(ReservationResponse::from).collect())
}

/// Reservation lifecycle endpoints
pub struct ReservationApi {
    reservations: Arc<ReservationService>,
    gate: Arc<AccessGate>,
}

impl ReservationApi {
    pub fn new(reservations: Arc<ReservationService>, gate: Arc<AccessGate>) -> Self {
        Self { reservations, gate }
    }
}

#[derive(Tags)]
enum ReservationTags {
    /// Booking lifecycle and visit tracking
    Reservations,
}

#[OpenApi]
impl ReservationApi {
    /// Create a booking in PENDING
    #[oai(path = "/reservations", method = "post", tag = "ReservationTags::Reservations")]
    async fn create(&self, req: &Request, auth: BearerAuth, body: Json<CreateReservationRequest>) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, CUSTOMER_OR_ADMIN)?;
        Ok(one(self.reservations.create(&ctx, body.0.into()).await?))
    }

    /// Every reservation in insertion order
    #[oai(path = "/reservations/all", method = "get", tag = "ReservationTags::Reservations")]
    async fn all(&self, req: &Request, auth: BearerAuth) -> ReservationListResult {
        self.gate.authorize(req, &auth, ADMIN_ONLY)?;
        Ok(many(self.reservations.all().await?))
    }

    /// Bookings made by a user, newest first
    #[oai(path = "/reservations/user/:user_id", method = "get", tag = "ReservationTags::Reservations")]
    async fn by_user(&self, req: &Request, auth: BearerAuth, user_id: Path<i64>) -> ReservationListResult {
        self.gate.authorize(req, &auth, CUSTOMER_OR_ADMIN)?;
        Ok(many(self.reservations.by_user(user_id.0).await?))
    }

    /// Bookings at a restaurant, newest first
    #[oai(path = "/reservations/restaurant/:restaurant_id", method = "get", tag = "ReservationTags::Reservations")]
    async fn by_restaurant(&self, req: &Request, auth: BearerAuth, restaurant_id: Path<i64>) -> ReservationListResult {
        self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(many(self.reservations.by_restaurant(restaurant_id.0).await?))
    }

    #[oai(path = "/reservations/visit-status/:status", method = "get", tag = "ReservationTags::Reservations")]
    async fn by_visit_status(&self, req: &Request, auth: BearerAuth, status: Path<String>) -> ReservationListResult {
        self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(many(self.reservations.by_visit_status(&status.0).await?))
    }

    #[oai(path = "/reservations/blacklisted", method = "get", tag = "ReservationTags::Reservations")]
    async fn blacklisted(&self, req: &Request, auth: BearerAuth) -> ReservationListResult {
        self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(many(self.reservations.blacklisted().await?))
    }

    #[oai(path = "/reservations/:id", method = "get", tag = "ReservationTags::Reservations")]
    async fn get(&self, req: &Request, auth: BearerAuth, id: Path<i64>) -> ReservationResult {
        self.gate.authorize(req, &auth, ANY_ROLE)?;
        Ok(one(self.reservations.get(id.0).await?))
    }

    #[oai(path = "/reservations/:id/approve", method = "put", tag = "ReservationTags::Reservations")]
    async fn approve(&self, req: &Request, auth: BearerAuth, id: Path<i64>) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(one(self.reservations.approve(&ctx, id.0).await?))
    }

    #[oai(path = "/reservations/:id/reject", method = "put", tag = "ReservationTags::Reservations")]
    async fn reject(&self, req: &Request, auth: BearerAuth, id: Path<i64>, body: Json<ReasonRequest>) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(one(self.reservations.reject(&ctx, id.0, &body.reason).await?))
    }

    /// Set any status, bypassing the lifecycle rules
    #[oai(path = "/reservations/:id/status", method = "put", tag = "ReservationTags::Reservations")]
    async fn update_status(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<StatusChangeRequest>,
    ) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        let view = self
            .reservations
            .update_status(&ctx, id.0, &body.status, body.reason.as_deref())
            .await?;
        Ok(one(view))
    }

    /// Cancel a booking; approved bookings wait for the store's decision
    #[oai(path = "/reservations/:id/cancel", method = "put", tag = "ReservationTags::Reservations")]
    async fn cancel(&self, req: &Request, auth: BearerAuth, id: Path<i64>) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, CUSTOMER_OR_ADMIN)?;
        Ok(one(self.reservations.cancel(&ctx, id.0).await?))
    }

    #[oai(path = "/reservations/:id/cancel/approve", method = "put", tag = "ReservationTags::Reservations")]
    async fn approve_cancellation(&self, req: &Request, auth: BearerAuth, id: Path<i64>) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(one(self.reservations.approve_cancellation(&ctx, id.0).await?))
    }

    #[oai(path = "/reservations/:id/cancel/reject", method = "put", tag = "ReservationTags::Reservations")]
    async fn reject_cancellation(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<ReasonRequest>,
    ) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        Ok(one(self.reservations.reject_cancellation(&ctx, id.0, &body.reason).await?))
    }

    /// Record a visit outcome (VISITED, NO_SHOW, BLACKLISTED)
    #[oai(path = "/reservations/visit-status", method = "put", tag = "ReservationTags::Reservations")]
    async fn update_visit_status(&self, req: &Request, auth: BearerAuth, body: Json<VisitStatusRequest>) -> ReservationResult {
        let ctx = self.gate.authorize(req, &auth, OWNER_OR_ADMIN)?;
        let view = self
            .reservations
            .update_visit_status(&ctx, body.reservation_id, &body.visit_status, body.reason.as_deref())
            .await?;
        Ok(one(view))
    }
}
