use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{BootstrapSettings, SecretError, SecretManager};
use crate::services::{DocumentStorage, LocalDocumentStorage, PasswordHasher, TokenService};
use crate::stores::{CredentialStore, ReservationStore};

/// Centralized application data following the main-owned stores pattern
///
/// Everything here is created once at startup and shared with the services
/// through `Arc<AppData>`.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init()
///   ├─ token_service (Arc<TokenService>)       signing key lives for the process
///   ├─ password_hasher (Arc<PasswordHasher>)
///   ├─ credential_store (Arc<CredentialStore>)
///   ├─ reservation_store (Arc<ReservationStore>)
///   └─ document_storage (Arc<dyn DocumentStorage>)
///   ↓
///   ├─ IdentityService::new(app_data)
///   └─ ReservationService::new(app_data)
/// ```
pub struct AppData {
    pub token_service: Arc<TokenService>,
    pub password_hasher: Arc<PasswordHasher>,
    pub credential_store: Arc<CredentialStore>,
    pub reservation_store: Arc<ReservationStore>,
    pub document_storage: Arc<dyn DocumentStorage>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// The database should be connected and migrated before calling this.
    ///
    /// # Errors
    ///
    /// Returns `SecretError` when PASSWORD_PEPPER is set but invalid
    pub async fn init(db: DatabaseConnection, settings: &BootstrapSettings) -> Result<Self, SecretError> {
        tracing::info!("Initializing AppData...");

        tracing::debug!("Initializing secret manager...");
        let secret_manager = SecretManager::init()?;
        tracing::debug!("Secret manager initialized");

        let storage = Arc::new(LocalDocumentStorage::new(
            settings.upload_dir().clone(),
            settings.upload_base_url(),
        ));
        tracing::debug!("Document storage rooted at {}", storage.root().display());

        let app_data = Self::from_parts(db, secret_manager, storage);

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Assemble AppData from already-built parts
    pub fn from_parts(
        db: DatabaseConnection,
        secret_manager: SecretManager,
        document_storage: Arc<dyn DocumentStorage>,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(secret_manager.token_signing_key().to_vec()));
        let password_hasher = Arc::new(PasswordHasher::new(secret_manager.password_pepper().map(str::to_string)));

        let credential_store = Arc::new(CredentialStore::new(db.clone()));
        let reservation_store = Arc::new(ReservationStore::new(db));

        Self {
            token_service,
            password_hasher,
            credential_store,
            reservation_store,
            document_storage,
        }
    }
}
