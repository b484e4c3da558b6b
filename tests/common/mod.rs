// Common test utilities for integration tests

use std::collections::HashMap;
use std::sync::Arc;

use booking_backend::app_data::AppData;
use booking_backend::config::{BootstrapSettings, EnvironmentProvider, SecretManager};
use booking_backend::server;
use booking_backend::services::LocalDocumentStorage;
use migration::{Migrator, MigratorTrait};
use poem::test::TestClient;
use poem::Endpoint;
use sea_orm::{Database, DatabaseConnection};
use serde_json::json;
use tempfile::TempDir;

pub const PASSWORD: &str = "Reservation2024";

/// Environment backed by a fixed map
pub struct MapEnvironment(pub HashMap<String, String>);

impl EnvironmentProvider for MapEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Full route tree over an in-memory database and a temp upload directory
pub async fn setup_app() -> (TestClient<impl Endpoint>, Arc<AppData>, TempDir) {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let mut vars = HashMap::new();
    vars.insert(
        "UPLOAD_DIR".to_string(),
        upload_dir.path().to_string_lossy().into_owned(),
    );
    let settings = BootstrapSettings::from_env_provider(Arc::new(MapEnvironment(vars)))
        .expect("Failed to load settings");

    let secret_manager = SecretManager::with_secrets(
        b"integration-signing-key-32-bytes".to_vec(),
        Some("integration-test-pepper".to_string()),
    );
    let storage = Arc::new(LocalDocumentStorage::new(
        settings.upload_dir().clone(),
        settings.upload_base_url(),
    ));
    let app_data = Arc::new(AppData::from_parts(setup_test_db().await, secret_manager, storage));

    let client = TestClient::new(server::build_app(app_data.clone(), &settings));
    (client, app_data, upload_dir)
}

/// Sign up a customer and return the login token
pub async fn customer_token<E: Endpoint>(client: &TestClient<E>, email: &str, phone: &str) -> String {
    let resp = client
        .post("/api/auth/customer/signup")
        .body_json(&json!({
            "email": email,
            "password": PASSWORD,
            "real_name": "Lee Jiwoo",
            "phone": phone,
        }))
        .send()
        .await;
    resp.assert_status_is_ok();

    login(client, "customer", email).await
}

/// Sign up an administrator and return the login token
pub async fn admin_token<E: Endpoint>(client: &TestClient<E>, email: &str) -> String {
    let resp = client
        .post("/api/auth/admin/signup")
        .body_json(&json!({
            "email": email,
            "password": PASSWORD,
            "real_name": "Han Admin",
        }))
        .send()
        .await;
    resp.assert_status_is_ok();

    login(client, "admin", email).await
}

pub async fn login<E: Endpoint>(client: &TestClient<E>, role: &str, email: &str) -> String {
    let resp = client
        .post(format!("/api/auth/{}/login", role))
        .body_json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.json().await;
    body.value()
        .object()
        .get("data")
        .object()
        .get("token")
        .string()
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
