use std::sync::Arc;

use poem::Request;
use poem_openapi::param::Path;
use poem_openapi::{auth::Bearer, payload::Json, OpenApi, SecurityScheme, Tags};

use crate::api::gate::{AccessGate, ADMIN_ONLY};
use crate::errors::api::AuthError;
use crate::errors::internal::{InternalError, UploadError};
use crate::services::IdentityService;
use crate::types::dto::auth::{
    AdminSignupRequest, CustomerSignupRequest, LoginData, LoginEnvelope, LoginRequest, OwnerSignupForm, UserEnvelope,
};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{BusinessDocument, Role};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Signup and login per role
    Authentication,
}

/// Signup, login and owner approval endpoints
pub struct AuthApi {
    identity: Arc<IdentityService>,
    gate: Arc<AccessGate>,
}

impl AuthApi {
    pub fn new(identity: Arc<IdentityService>, gate: Arc<AccessGate>) -> Self {
        Self { identity, gate }
    }

    async fn login_as(&self, req: &Request, body: LoginRequest, role: Role) -> Result<Json<LoginEnvelope>, AuthError> {
        let ctx = RequestContext::from_request(req);
        let session = self.identity.login(&ctx, &body.email, &body.password, role).await?;
        let expires_in = self.identity.token_service().lifetime_seconds();

        Ok(Json(LoginEnvelope {
            status: 200,
            message: "Login successful".to_string(),
            data: LoginData::from_session(session, expires_in),
        }))
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register an administrator
    #[oai(path = "/admin/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn admin_signup(&self, req: &Request, body: Json<AdminSignupRequest>) -> Result<Json<UserEnvelope>, AuthError> {
        let ctx = RequestContext::from_request(req);
        let created = self.identity.register_admin(&ctx, body.0.into()).await?;
        Ok(Json(UserEnvelope::ok("Signup successful", created)))
    }

    /// Login as an administrator
    #[oai(path = "/admin/login", method = "post", tag = "AuthTags::Authentication")]
    async fn admin_login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<LoginEnvelope>, AuthError> {
        self.login_as(req, body.0, Role::Admin).await
    }

    /// Register a customer; the account is usable immediately
    #[oai(path = "/customer/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn customer_signup(
        &self,
        req: &Request,
        body: Json<CustomerSignupRequest>,
    ) -> Result<Json<UserEnvelope>, AuthError> {
        let ctx = RequestContext::from_request(req);
        let created = self.identity.register_customer(&ctx, body.0.into()).await?;
        Ok(Json(UserEnvelope::ok("Signup successful", created)))
    }

    /// Login as a customer. Only ACTIVE customers may log in.
    #[oai(path = "/customer/login", method = "post", tag = "AuthTags::Authentication")]
    async fn customer_login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<LoginEnvelope>, AuthError> {
        self.login_as(req, body.0, Role::Customer).await
    }

    /// Register an owner with a business registration PDF
    ///
    /// The account stays PENDING until an administrator approves it.
    #[oai(path = "/owner/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn owner_signup(&self, req: &Request, form: OwnerSignupForm) -> Result<Json<UserEnvelope>, AuthError> {
        let ctx = RequestContext::from_request(req);
        let (owner, upload) = form.into_parts();

        let file_name = upload.file_name().map(str::to_string);
        let bytes = upload.into_vec().await.map_err(|source| {
            InternalError::from(UploadError::Io {
                key: "business_registration_doc".to_string(),
                source,
            })
        })?;
        let document = BusinessDocument { file_name, bytes };

        let created = self.identity.register_owner(&ctx, owner, document).await?;
        Ok(Json(UserEnvelope::ok("Signup successful, awaiting approval", created)))
    }

    /// Login as an owner. Only APPROVED owners may log in.
    #[oai(path = "/owner/login", method = "post", tag = "AuthTags::Authentication")]
    async fn owner_login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<LoginEnvelope>, AuthError> {
        self.login_as(req, body.0, Role::Owner).await
    }

    /// Approve a pending owner (admin only)
    #[oai(path = "/owner/approve/:owner_id", method = "patch", tag = "AuthTags::Authentication")]
    async fn approve_owner(
        &self,
        req: &Request,
        auth: BearerAuth,
        owner_id: Path<i64>,
    ) -> Result<Json<UserEnvelope>, AuthError> {
        let ctx = self.gate.authorize(req, &auth, ADMIN_ONLY)?;
        let approved = self.identity.approve_owner(&ctx, owner_id.0).await?;
        Ok(Json(UserEnvelope::ok("Owner approved", approved)))
    }
}
