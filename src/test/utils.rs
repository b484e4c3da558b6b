// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tempfile::TempDir;

use crate::app_data::AppData;
use crate::config::SecretManager;
use crate::services::{IdentityService, LocalDocumentStorage, ReservationService};
use crate::types::db::user;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{NewAccount, NewOwner, NewReservation, Role};

pub const TEST_PASSWORD: &str = "Reservation2024";

/// In-memory SQLite database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Full AppData over a fresh database and a temp upload directory
///
/// Keep the TempDir alive for as long as uploads are inspected.
pub async fn setup_test_app_data() -> (Arc<AppData>, TempDir) {
    setup_test_app_data_over(setup_test_db().await)
}

/// Like `setup_test_app_data`, over a database the caller prepared
pub fn setup_test_app_data_over(db: DatabaseConnection) -> (Arc<AppData>, TempDir) {
    let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

    let secret_manager = SecretManager::with_secrets(
        b"test-signing-key-with-32-bytes!!".to_vec(),
        Some("test-pepper-for-unit-tests".to_string()),
    );
    let storage = Arc::new(LocalDocumentStorage::new(upload_dir.path(), "http://localhost:3000/files"));

    let app_data = Arc::new(AppData::from_parts(db, secret_manager, storage));
    (app_data, upload_dir)
}

pub async fn setup_test_services() -> (Arc<AppData>, Arc<IdentityService>, Arc<ReservationService>, TempDir) {
    let (app_data, upload_dir) = setup_test_app_data().await;
    let identity = Arc::new(IdentityService::new(app_data.clone()));
    let reservations = Arc::new(ReservationService::new(app_data.clone()));
    (app_data, identity, reservations, upload_dir)
}

pub fn test_ctx() -> RequestContext {
    RequestContext::for_cli("test")
}

pub fn new_account(email: &str, phone: Option<&str>) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        real_name: "Park Seoyeon".to_string(),
        phone: phone.map(str::to_string),
        nickname: Some("seoyeon".to_string()),
    }
}

pub fn new_owner(email: &str, phone: &str) -> NewOwner {
    NewOwner {
        account: new_account(email, Some(phone)),
        store_name: "Choplan Bistro".to_string(),
        store_phone: "0212345678".to_string(),
        road_address: "1 Sejong-daero".to_string(),
        detail_address: Some("B1".to_string()),
        business_number: Some("123-45-67890".to_string()),
    }
}

/// Create an account of `role` directly through the service
pub async fn create_account(identity: &IdentityService, role: Role, email: &str, phone: &str) -> user::Model {
    let ctx = test_ctx();
    match role {
        Role::Admin => identity.register_admin(&ctx, new_account(email, Some(phone))).await,
        Role::Customer => identity.register_customer(&ctx, new_account(email, Some(phone))).await,
        Role::Owner => {
            let document = crate::types::internal::BusinessDocument {
                file_name: Some("license.pdf".to_string()),
                bytes: b"%PDF-1.4 test".to_vec(),
            };
            identity.register_owner(&ctx, new_owner(email, phone), document).await
        }
    }
    .expect("Failed to create test account")
}

pub fn sample_reservation(user_id: i64, restaurant_id: i64) -> NewReservation {
    NewReservation {
        user_id,
        restaurant_id,
        restaurant_name: Some("Choplan Bistro".to_string()),
        user_name: "Snapshot Name".to_string(),
        user_phone: "01055556666".to_string(),
        user_email: Some("guest@example.com".to_string()),
        reservation_date: NaiveDate::from_ymd_opt(2025, 12, 24).expect("valid date"),
        reservation_time: NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
        guests: 2,
        special_requests: Some("Window seat".to_string()),
    }
}
