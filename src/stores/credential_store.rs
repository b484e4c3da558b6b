use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::errors::internal::{CredentialError, InternalError};
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::internal::{CustomerStatus, NewAccount, NewOwner, OwnerStatus, Role};

/// CredentialStore persists accounts of every role
///
/// Secrets arrive already hashed; this store never sees plaintext.
pub struct CredentialStore {
    db: DatabaseConnection,
}

impl CredentialStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, InternalError> {
        let count = User::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("email_exists", e))?;

        Ok(count > 0)
    }

    pub async fn phone_exists(&self, phone: &str) -> Result<bool, InternalError> {
        let count = User::find()
            .filter(user::Column::Phone.eq(phone))
            .count(&self.db)
            .await
            .map_err(|e| InternalError::database("phone_exists", e))?;

        Ok(count > 0)
    }

    /// Insert an ADMIN or CUSTOMER account
    pub async fn create_user(
        &self,
        account: &NewAccount,
        password_hash: String,
        role: Role,
    ) -> Result<user::Model, InternalError> {
        let model = Self::account_model(account, password_hash, role);
        self.insert(model, account).await
    }

    /// Insert an OWNER account with its store profile
    pub async fn create_owner(
        &self,
        owner: &NewOwner,
        password_hash: String,
        document_url: String,
    ) -> Result<user::Model, InternalError> {
        let mut model = Self::account_model(&owner.account, password_hash, Role::Owner);
        model.store_name = Set(Some(owner.store_name.clone()));
        model.store_phone = Set(Some(owner.store_phone.clone()));
        model.road_address = Set(Some(owner.road_address.clone()));
        model.detail_address = Set(owner.detail_address.clone());
        model.business_number = Set(owner.business_number.clone());
        model.business_registration_doc = Set(Some(document_url));

        self.insert(model, &owner.account).await
    }

    fn account_model(account: &NewAccount, password_hash: String, role: Role) -> ActiveModel {
        let now = Utc::now().timestamp();

        ActiveModel {
            email: Set(account.email.clone()),
            password_hash: Set(password_hash),
            real_name: Set(account.real_name.clone()),
            phone: Set(account.phone.clone()),
            nickname: Set(account.nickname.clone()),
            role: Set(role.as_str().to_string()),
            customer_status: Set(CustomerStatus::Active.as_str().to_string()),
            owner_status: Set(OwnerStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    async fn insert(&self, model: ActiveModel, account: &NewAccount) -> Result<user::Model, InternalError> {
        model.insert(&self.db).await.map_err(|e| Self::map_insert_error(e, account))
    }

    // Unique indexes catch signups racing past the existence checks
    fn map_insert_error(err: DbErr, account: &NewAccount) -> InternalError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("phone") => {
                CredentialError::duplicate("phone", account.phone.as_deref().unwrap_or_default()).into()
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => CredentialError::duplicate("email", &account.email).into(),
            _ => InternalError::database("insert_user", err),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Accounts of `role`, optionally narrowed to one status, in insertion order
    ///
    /// `status` matches the column belonging to the role; it is ignored for ADMIN.
    pub async fn list_by_role(&self, role: Role, status: Option<&str>) -> Result<Vec<user::Model>, InternalError> {
        let mut query = User::find().filter(user::Column::Role.eq(role.as_str()));

        if let Some(status) = status {
            query = match role {
                Role::Customer => query.filter(user::Column::CustomerStatus.eq(status)),
                Role::Owner => query.filter(user::Column::OwnerStatus.eq(status)),
                Role::Admin => query,
            };
        }

        query
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_users_by_role", e))
    }

    pub async fn update_customer_status(
        &self,
        user_id: i64,
        status: CustomerStatus,
    ) -> Result<user::Model, InternalError> {
        self.update_user("update_customer_status", user_id, |active| {
            active.customer_status = Set(status.as_str().to_string());
        })
        .await
    }

    pub async fn update_owner_status(&self, user_id: i64, status: OwnerStatus) -> Result<user::Model, InternalError> {
        self.update_user("update_owner_status", user_id, |active| {
            active.owner_status = Set(status.as_str().to_string());
        })
        .await
    }

    /// Read-modify-write of one account inside a transaction
    async fn update_user<F>(&self, operation: &str, user_id: i64, apply: F) -> Result<user::Model, InternalError>
    where
        F: FnOnce(&mut ActiveModel),
    {
        let txn = self.db.begin().await.map_err(InternalError::transaction_begin)?;

        let existing = User::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| InternalError::database(operation, e))?
            .ok_or_else(|| CredentialError::UserNotFound(user_id.to_string()))?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active);
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&txn)
            .await
            .map_err(|e| InternalError::database(operation, e))?;

        txn.commit().await.map_err(InternalError::transaction_commit)?;

        Ok(updated)
    }
}
