use std::sync::Arc;

use poem::Request;

use crate::api::auth::BearerAuth;
use crate::errors::internal::{AccessError, InternalError};
use crate::services::TokenService;
use crate::types::internal::context::RequestContext;
use crate::types::internal::Role;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const CUSTOMER_OR_ADMIN: &[Role] = &[Role::Customer, Role::Admin];
pub const OWNER_OR_ADMIN: &[Role] = &[Role::Owner, Role::Admin];
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Customer, Role::Owner];

/// Bearer-token check in front of every protected handler
///
/// Decides on token claims alone; the account row is never read here.
pub struct AccessGate {
    token_service: Arc<TokenService>,
}

impl AccessGate {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }

    /// Admit the request if the token is valid and its role is in `allowed`
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for an invalid or expired token, `Unauthorized` when
    /// the role claim is not allowed.
    pub fn authorize(&self, req: &Request, auth: &BearerAuth, allowed: &[Role]) -> Result<RequestContext, InternalError> {
        let ctx = RequestContext::from_request(req);
        let token = &auth.0.token;

        if !self.token_service.validate(token) {
            tracing::debug!(request_id = %ctx.request_id, ip = ?ctx.ip_address, "Rejected invalid or expired token");
            return Err(AccessError::Unauthenticated.into());
        }

        let claims = self
            .token_service
            .claims(token)
            .map_err(|_| InternalError::from(AccessError::Unauthenticated))?;
        let ctx = ctx.with_claims(claims);

        match ctx.role() {
            Some(role) if allowed.contains(&role) => Ok(ctx),
            _ => {
                let role = ctx
                    .claims
                    .as_ref()
                    .map(|c| c.role.clone())
                    .unwrap_or_default();
                Err(AccessError::Unauthorized { role }.into())
            }
        }
    }
}
