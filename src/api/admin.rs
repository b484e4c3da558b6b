use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::auth::BearerAuth;
use crate::api::gate::{AccessGate, ADMIN_ONLY};
use crate::errors::api::AuthError;
use crate::services::IdentityService;
use crate::types::dto::auth::{UserEnvelope, UserListEnvelope};
use crate::types::internal::{CustomerStatus, OwnerStatus, Role};

/// Account administration endpoints (admin only)
pub struct AdminApi {
    identity: Arc<IdentityService>,
    gate: Arc<AccessGate>,
}

impl AdminApi {
    pub fn new(identity: Arc<IdentityService>, gate: Arc<AccessGate>) -> Self {
        Self { identity, gate }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Customer and owner account management
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List customers, optionally filtered by status
    #[oai(path = "/customers", method = "get", tag = "AdminTags::Admin")]
    async fn list_customers(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<String>>,
    ) -> Result<Json<UserListEnvelope>, AuthError> {
        self.gate.authorize(req, &auth, ADMIN_ONLY)?;
        let users = self
            .identity
            .list_by_role_and_status(Role::Customer, status.0.as_deref())
            .await?;
        Ok(Json(UserListEnvelope::ok("Customers", users)))
    }

    /// List owners, optionally filtered by status
    #[oai(path = "/owners", method = "get", tag = "AdminTags::Admin")]
    async fn list_owners(
        &self,
        req: &Request,
        auth: BearerAuth,
        status: Query<Option<String>>,
    ) -> Result<Json<UserListEnvelope>, AuthError> {
        self.gate.authorize(req, &auth, ADMIN_ONLY)?;
        let users = self
            .identity
            .list_by_role_and_status(Role::Owner, status.0.as_deref())
            .await?;
        Ok(Json(UserListEnvelope::ok("Owners", users)))
    }

    /// Set a customer's status (ACTIVE, SUSPENDED, DELETED)
    #[oai(path = "/customers/:id/status", method = "put", tag = "AdminTags::Admin")]
    async fn set_customer_status(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i64>,
        status: Query<String>,
    ) -> Result<Json<UserEnvelope>, AuthError> {
        let ctx = self.gate.authorize(req, &auth, ADMIN_ONLY)?;
        let status = CustomerStatus::parse(&status.0)?;
        let updated = self.identity.set_customer_status(&ctx, id.0, status).await?;
        Ok(Json(UserEnvelope::ok("Customer status updated", updated)))
    }

    /// Set an owner's status without transition checks
    #[oai(path = "/owners/:id/status", method = "put", tag = "AdminTags::Admin")]
    async fn set_owner_status(
        &self,
        req: &Request,
        auth: BearerAuth,
        id: Path<i64>,
        status: Query<String>,
    ) -> Result<Json<UserEnvelope>, AuthError> {
        let ctx = self.gate.authorize(req, &auth, ADMIN_ONLY)?;
        let status = OwnerStatus::parse(&status.0)?;
        let updated = self.identity.set_owner_status(&ctx, id.0, status).await?;
        Ok(Json(UserEnvelope::ok("Owner status updated", updated)))
    }
}
