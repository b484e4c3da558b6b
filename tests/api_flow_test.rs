mod common;

use poem::test::{TestForm, TestFormField};
use serde_json::json;

use common::{admin_token, bearer, customer_token, login, setup_app, PASSWORD};

#[tokio::test]
async fn test_health_is_public() {
    let (client, _app, _dir) = setup_app().await;

    let resp = client.get("/api/health").send().await;

    resp.assert_status_is_ok();
    resp.json().await.value().object().get("status").assert_string("healthy");
}

#[tokio::test]
async fn test_customer_signup_login_envelope() {
    let (client, _app, _dir) = setup_app().await;

    let resp = client
        .post("/api/auth/customer/signup")
        .body_json(&json!({
            "email": "flow@example.com",
            "password": PASSWORD,
            "real_name": "Flow Customer",
            "phone": "01090001000",
        }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let envelope = body.value().object();
    envelope.get("status").assert_i64(200);
    envelope.get("data").object().get("customer_status").assert_string("ACTIVE");

    let token = login(&client, "customer", "flow@example.com").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_duplicate_signup_is_bad_request_with_envelope() {
    let (client, _app, _dir) = setup_app().await;
    customer_token(&client, "dupe@example.com", "01090001001").await;

    let resp = client
        .post("/api/auth/customer/signup")
        .body_json(&json!({
            "email": "dupe@example.com",
            "password": PASSWORD,
            "real_name": "Second",
            "phone": "01090001002",
        }))
        .send()
        .await;

    resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
    let body = resp.json().await;
    let envelope = body.value().object();
    envelope.get("status").assert_i64(400);
    envelope.get("data").assert_null();
}

#[tokio::test]
async fn test_customer_token_on_admin_listing_is_forbidden() {
    let (client, _app, _dir) = setup_app().await;
    let token = customer_token(&client, "nosy@example.com", "01090001003").await;

    let resp = client
        .get("/api/admin/customers")
        .header("Authorization", bearer(&token))
        .send()
        .await;

    resp.assert_status(poem::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let (client, _app, _dir) = setup_app().await;

    let resp = client
        .get("/api/reservations/1")
        .header("Authorization", bearer("not-a-token"))
        .send()
        .await;

    resp.assert_status(poem::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_bearer_header_gets_envelope() {
    let (client, _app, _dir) = setup_app().await;

    let resp = client.get("/api/admin/customers").send().await;

    resp.assert_status(poem::http::StatusCode::UNAUTHORIZED);
    let body = resp.json().await;
    let envelope = body.value().object();
    envelope.get("status").assert_i64(401);
    envelope.get("data").assert_null();
}

#[tokio::test]
async fn test_owner_signup_approval_and_login() {
    let (client, _app, dir) = setup_app().await;

    let form = TestForm::new()
        .field(TestFormField::text("owner@example.com").name("email"))
        .field(TestFormField::text(PASSWORD).name("password"))
        .field(TestFormField::text("Choi Owner").name("real_name"))
        .field(TestFormField::text("01090001004").name("phone"))
        .field(TestFormField::text("Choplan Bistro").name("store_name"))
        .field(TestFormField::text("0212345678").name("store_phone"))
        .field(TestFormField::text("1 Sejong-daero").name("road_address"))
        .field(
            TestFormField::bytes(b"%PDF-1.4 registration".to_vec())
                .name("business_registration_doc")
                .filename("registration.pdf"),
        );
    let resp = client.post("/api/auth/owner/signup").multipart(form).send().await;
    resp.assert_status_is_ok();

    let body = resp.json().await;
    let data = body.value().object().get("data").object();
    data.get("owner_status").assert_string("PENDING");
    let owner_id = data.get("id").i64();
    let doc_url = data.get("business_registration_doc").string().to_string();
    let key = doc_url.trim_start_matches("http://localhost:3000/files/");
    assert!(dir.path().join(key).exists());

    let pending = client
        .post("/api/auth/owner/login")
        .body_json(&json!({ "email": "owner@example.com", "password": PASSWORD }))
        .send()
        .await;
    pending.assert_status(poem::http::StatusCode::BAD_REQUEST);

    let admin = admin_token(&client, "root@example.com").await;
    let approved = client
        .patch(format!("/api/auth/owner/approve/{}", owner_id))
        .header("Authorization", bearer(&admin))
        .send()
        .await;
    approved.assert_status_is_ok();

    let token = login(&client, "owner", "owner@example.com").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_owner_signup_without_file_name_is_refused() {
    let (client, _app, dir) = setup_app().await;

    let form = TestForm::new()
        .field(TestFormField::text("sneaky@example.com").name("email"))
        .field(TestFormField::text(PASSWORD).name("password"))
        .field(TestFormField::text("Sneaky Owner").name("real_name"))
        .field(TestFormField::text("01090001009").name("phone"))
        .field(TestFormField::text("Choplan Bistro").name("store_name"))
        .field(TestFormField::text("0212345678").name("store_phone"))
        .field(TestFormField::text("1 Sejong-daero").name("road_address"))
        .field(TestFormField::bytes(b"MZ this is an exe".to_vec()).name("business_registration_doc"));
    let resp = client.post("/api/auth/owner/signup").multipart(form).send().await;

    resp.assert_status(poem::http::StatusCode::BAD_REQUEST);
    let body = resp.json().await;
    let envelope = body.value().object();
    envelope.get("status").assert_i64(400);
    envelope.get("data").assert_null();
    assert!(!dir.path().join("business-docs").exists());
}

#[tokio::test]
async fn test_reservation_cancellation_refused_end_to_end() {
    let (client, _app, _dir) = setup_app().await;
    let customer = customer_token(&client, "diner@example.com", "01090001005").await;
    let admin = admin_token(&client, "ops@example.com").await;

    let created = client
        .post("/api/reservations")
        .header("Authorization", bearer(&customer))
        .body_json(&json!({
            "user_id": 1,
            "restaurant_id": 5,
            "user_name": "Lee Jiwoo",
            "user_phone": "01090001005",
            "reservation_date": "2025-12-24",
            "reservation_time": "19:00:00",
            "guests": 2,
        }))
        .send()
        .await;
    created.assert_status_is_ok();
    let body = created.json().await;
    let reservation = body.value().object();
    reservation.get("status").assert_string("PENDING");
    reservation.get("visit_status").assert_string("PENDING");
    let id = reservation.get("id").i64();

    client
        .put(format!("/api/reservations/{}/approve", id))
        .header("Authorization", bearer(&admin))
        .send()
        .await
        .assert_status_is_ok();

    let cancelled = client
        .put(format!("/api/reservations/{}/cancel", id))
        .header("Authorization", bearer(&customer))
        .send()
        .await;
    cancelled.assert_status_is_ok();
    cancelled
        .json()
        .await
        .value()
        .object()
        .get("status")
        .assert_string("CANCELLED_PENDING");

    let restored = client
        .put(format!("/api/reservations/{}/cancel/reject", id))
        .header("Authorization", bearer(&admin))
        .body_json(&json!({ "reason": "no refund" }))
        .send()
        .await;
    restored.assert_status_is_ok();
    let body = restored.json().await;
    let reservation = body.value().object();
    reservation.get("status").assert_string("APPROVED");
    reservation.get("rejection_reason").assert_string("no refund");

    let again = client
        .put(format!("/api/reservations/{}/cancel/approve", id))
        .header("Authorization", bearer(&admin))
        .send()
        .await;
    again.assert_status(poem::http::StatusCode::BAD_REQUEST);
}
