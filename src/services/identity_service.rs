use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::internal::{CredentialError, InternalError};
use crate::services::document_storage::{business_document_key, DocumentStorage, PDF_CONTENT_TYPE};
use crate::services::{PasswordHasher, SignupValidator, TokenService};
use crate::stores::CredentialStore;
use crate::types::db::user;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{
    BusinessDocument, CustomerStatus, NewAccount, NewOwner, OwnerStatus, Role, Session,
};

/// Registration, login and admin-driven status changes for all roles
pub struct IdentityService {
    credential_store: Arc<CredentialStore>,
    token_service: Arc<TokenService>,
    password_hasher: Arc<PasswordHasher>,
    document_storage: Arc<dyn DocumentStorage>,
    validator: SignupValidator,
}

impl IdentityService {
    /// Create IdentityService from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            credential_store: app_data.credential_store.clone(),
            token_service: app_data.token_service.clone(),
            password_hasher: app_data.password_hasher.clone(),
            document_storage: app_data.document_storage.clone(),
            validator: SignupValidator::new(),
        }
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.token_service.clone()
    }

    /// Register an administrator. No status gating applies to admins.
    pub async fn register_admin(&self, ctx: &RequestContext, account: NewAccount) -> Result<user::Model, InternalError> {
        self.validator.validate_account(&account, false)?;
        self.ensure_unique(&account).await?;

        let password_hash = self.password_hasher.hash(&account.password)?;
        let created = self.credential_store.create_user(&account, password_hash, Role::Admin).await?;

        tracing::info!(actor = %ctx.actor_id, request_id = %ctx.request_id, "Admin {} registered (id {})", created.email, created.id);

        Ok(created)
    }

    /// Register a customer; the account is ACTIVE immediately
    pub async fn register_customer(&self, ctx: &RequestContext, account: NewAccount) -> Result<user::Model, InternalError> {
        self.validator.validate_account(&account, true)?;
        self.ensure_unique(&account).await?;

        let password_hash = self.password_hasher.hash(&account.password)?;
        let created = self.credential_store.create_user(&account, password_hash, Role::Customer).await?;

        tracing::info!(actor = %ctx.actor_id, request_id = %ctx.request_id, "Customer {} registered (id {})", created.email, created.id);

        Ok(created)
    }

    /// Register an owner with a business registration PDF
    ///
    /// The document is uploaded before the row is written and removed again
    /// if the insert fails. The account starts PENDING until an admin
    /// approves it.
    pub async fn register_owner(
        &self,
        ctx: &RequestContext,
        owner: NewOwner,
        document: BusinessDocument,
    ) -> Result<user::Model, InternalError> {
        self.validator.validate_owner(&owner)?;
        self.ensure_unique(&owner.account).await?;

        if document.bytes.is_empty() {
            return Err(CredentialError::InvalidDocument("document is empty".to_string()).into());
        }
        let file_name = match document.file_name.as_deref() {
            Some(name) if document.is_pdf() => name,
            Some(name) => return Err(CredentialError::InvalidDocument(format!("'{}' is not a PDF", name)).into()),
            None => return Err(CredentialError::InvalidDocument("file name is missing".to_string()).into()),
        };

        let key = business_document_key(file_name);
        let password_hash = self.password_hasher.hash(&owner.account.password)?;
        let document_url = self
            .document_storage
            .upload(&key, document.bytes, PDF_CONTENT_TYPE)
            .await?;

        let created = match self.credential_store.create_owner(&owner, password_hash, document_url).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(cleanup) = self.document_storage.remove(&key).await {
                    tracing::warn!(request_id = %ctx.request_id, "Orphaned upload {} left behind: {}", key, cleanup);
                }
                return Err(e);
            }
        };

        tracing::info!(actor = %ctx.actor_id, request_id = %ctx.request_id, "Owner {} registered (id {}), awaiting approval", created.email, created.id);

        Ok(created)
    }

    async fn ensure_unique(&self, account: &NewAccount) -> Result<(), InternalError> {
        if self.credential_store.email_exists(&account.email).await? {
            return Err(CredentialError::duplicate("email", &account.email).into());
        }
        if let Some(phone) = &account.phone {
            if self.credential_store.phone_exists(phone).await? {
                return Err(CredentialError::duplicate("phone", phone).into());
            }
        }
        Ok(())
    }

    /// Authenticate against the endpoint's role
    ///
    /// Checks, in order: account exists, secret verifies, role matches,
    /// then the role's status gate (CUSTOMER must be ACTIVE, OWNER must be
    /// APPROVED, ADMIN is never gated).
    pub async fn login(
        &self,
        ctx: &RequestContext,
        email: &str,
        password: &str,
        required_role: Role,
    ) -> Result<Session, InternalError> {
        let user = self
            .credential_store
            .find_by_email(email)
            .await?
            .ok_or_else(|| CredentialError::UserNotFound(email.to_string()))?;

        if !self.password_hasher.verify(password, &user.password_hash) {
            tracing::debug!(request_id = %ctx.request_id, "Bad credential for {}", email);
            return Err(CredentialError::BadCredential.into());
        }

        let role = Role::parse(&user.role)?;
        if role != required_role {
            return Err(CredentialError::wrong_role(required_role.as_str(), role.as_str()).into());
        }

        match role {
            Role::Customer => {
                let status = CustomerStatus::parse(&user.customer_status)?;
                if status != CustomerStatus::Active {
                    return Err(CredentialError::AccountNotActive {
                        status: status.as_str().to_string(),
                    }
                    .into());
                }
            }
            Role::Owner => {
                let status = OwnerStatus::parse(&user.owner_status)?;
                if status != OwnerStatus::Approved {
                    return Err(CredentialError::AccountNotApproved {
                        status: status.as_str().to_string(),
                    }
                    .into());
                }
            }
            Role::Admin => {}
        }

        let token = self.token_service.issue(&user.email, role)?;

        tracing::info!(request_id = %ctx.request_id, ip = ?ctx.ip_address, "{} {} logged in", role, user.email);

        Ok(Session { token, user })
    }

    /// Approve an owner account. Re-approving is a no-op success.
    pub async fn approve_owner(&self, ctx: &RequestContext, owner_id: i64) -> Result<user::Model, InternalError> {
        self.set_owner_status(ctx, owner_id, OwnerStatus::Approved).await
    }

    /// Overwrite an owner's status without transition checks
    pub async fn set_owner_status(
        &self,
        ctx: &RequestContext,
        owner_id: i64,
        status: OwnerStatus,
    ) -> Result<user::Model, InternalError> {
        self.require_role(owner_id, Role::Owner).await?;

        let updated = self.credential_store.update_owner_status(owner_id, status).await?;

        tracing::info!(actor = %ctx.actor_id, request_id = %ctx.request_id, "Owner {} status set to {}", owner_id, status);

        Ok(updated)
    }

    /// Overwrite a customer's status without transition checks
    pub async fn set_customer_status(
        &self,
        ctx: &RequestContext,
        customer_id: i64,
        status: CustomerStatus,
    ) -> Result<user::Model, InternalError> {
        self.require_role(customer_id, Role::Customer).await?;

        let updated = self.credential_store.update_customer_status(customer_id, status).await?;

        tracing::info!(actor = %ctx.actor_id, request_id = %ctx.request_id, "Customer {} status set to {}", customer_id, status);

        Ok(updated)
    }

    async fn require_role(&self, user_id: i64, expected: Role) -> Result<(), InternalError> {
        let user = self
            .credential_store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()))?;

        if user.role != expected.as_str() {
            return Err(CredentialError::wrong_role(expected.as_str(), &user.role).into());
        }
        Ok(())
    }

    /// Accounts of a role, optionally filtered by a status name
    ///
    /// The status name is parsed against the role's own status set.
    pub async fn list_by_role_and_status(
        &self,
        role: Role,
        status: Option<&str>,
    ) -> Result<Vec<user::Model>, InternalError> {
        let status = match (role, status) {
            (_, None) => None,
            (Role::Customer, Some(name)) => Some(CustomerStatus::parse(name)?.as_str()),
            (Role::Owner, Some(name)) => Some(OwnerStatus::parse(name)?.as_str()),
            (Role::Admin, Some(_)) => None,
        };

        self.credential_store.list_by_role(role, status).await
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod identity_service_tests;
