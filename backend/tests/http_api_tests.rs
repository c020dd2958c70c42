//! Request-level tests against the assembled router.

#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use healtsync::config::{AppConfig, Environment};
use healtsync::db::repository::FullRepository;
use healtsync::db::LocalRepository;
use healtsync::http::{create_router, AppState};
use healtsync::services::users;

const ADMIN_EMAIL: &str = "admin@clinic.org";
const ADMIN_PASSWORD: &str = "admin-password";

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = "http-test-secret".to_string();
    config.auth.bcrypt_cost = 4;
    config
}

async fn app_with(config: AppConfig) -> Router {
    let repo = Arc::new(LocalRepository::with_reference_data());
    users::bootstrap_admin(repo.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD, 4)
        .await
        .unwrap();
    create_router(AppState::new(repo as Arc<dyn FullRepository>, config))
}

async fn app() -> Router {
    app_with(config()).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

async fn register_patient(app: &Router, email: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "patient-password",
            "first_name": "Ada",
            "last_name": "Lovelace"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body
}

#[tokio::test]
async fn test_health_is_public() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/doctors", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, Method::GET, "/api/doctors", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_and_me() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], ADMIN_EMAIL);
    assert_eq!(body["role_name"], "Admin");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_bad_credentials_rejected() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": "guess" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_creates_patient_profile() {
    let app = app().await;
    let body = register_patient(&app, "ada@example.org").await;
    assert_eq!(body["user"]["role_name"], "Patient");
    assert_eq!(body["patient"]["user_id"], body["user"]["id"]);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "ada@example.org",
            "password": "patient-password",
            "first_name": "Ada",
            "last_name": "Lovelace"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reference_data_writes_need_admin() {
    let app = app().await;
    register_patient(&app, "ada@example.org").await;
    let patient_token = login(&app, "ada@example.org", "patient-password").await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let role = json!({ "role_name": "Nurse" });

    let (status, _) = send(&app, Method::POST, "/api/roles", Some(&patient_token), Some(role.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/roles", Some(&patient_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = send(&app, Method::POST, "/api/roles", Some(&admin_token), Some(role)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role_name"], "Nurse");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/roles/{}", id),
        Some(&admin_token),
        Some(json!({ "description": "Ward staff" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_name"], "Nurse");
    assert_eq!(body["description"], "Ward staff");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/roles/{}", id), Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/roles/{}/exists", id), Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], false);
}

#[tokio::test]
async fn test_invalid_and_missing_ids() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(&app, Method::GET, "/api/medical-records/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _) = send(&app, Method::GET, "/api/doctors/404", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/statuses/1/exists", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);
}

#[tokio::test]
async fn test_booking_and_report() {
    let app = app().await;
    let registered = register_patient(&app, "ada@example.org").await;
    let patient_id = registered["patient"]["id"].as_i64().unwrap();
    let user_id = registered["user"]["id"].as_i64().unwrap();
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, doctor) = send(
        &app,
        Method::POST,
        "/api/doctors",
        Some(&token),
        Some(json!({
            "first_name": "John",
            "last_name": "Watson",
            "specialty_id": 1,
            "license_number": "GMC-221B"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", doctor);
    let doctor_id = doctor["id"].as_i64().unwrap();

    let (status, booked) = send(
        &app,
        Method::POST,
        "/api/appointments",
        Some(&token),
        Some(json!({
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "scheduled_at": "2025-03-04T10:00:00Z",
            "reason": "Checkup"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", booked);
    assert_eq!(booked["status_name"], "Scheduled");
    assert_eq!(booked["duration_minutes"], 30);

    let (status, listed) = send(
        &app,
        Method::GET,
        &format!("/api/patients/{}/appointments", patient_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, inbox) = send(
        &app,
        Method::GET,
        &format!("/api/users/{}/notifications", user_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox.as_array().unwrap().len(), 1);

    let (status, report) = send(
        &app,
        Method::GET,
        "/api/reports/appointments?from=2025-03-01&to=2025-03-31",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", report);
    assert_eq!(report["total_appointments"], 1);
    assert_eq!(report["doctor_counts"][0]["count"], 1);
    assert_eq!(report["doctors"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/reports/appointments?from=2025-04-01&to=2025-03-01",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_patient_cannot_read_other_inbox() {
    let app = app().await;
    let first = register_patient(&app, "ada@example.org").await;
    register_patient(&app, "grace@example.org").await;
    let token = login(&app, "grace@example.org", "patient-password").await;

    let uri = format!("/api/users/{}/notifications", first["user"]["id"]);
    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_disabled_auth_runs_as_administrator() {
    let mut config = config();
    config.auth.enabled = false;
    let app = app_with(config).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/specialties",
        None,
        Some(json!({ "name": "Dermatology" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
}

#[tokio::test]
async fn test_api_docs_only_in_development() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["routes"].as_array().unwrap().is_empty());

    let mut config = config();
    config.server.environment = Environment::Production;
    let app = app_with(config).await;
    let (status, _) = send(&app, Method::GET, "/api-docs", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn notification_for(app: &Router, admin_token: &str, user_id: &Value) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/notifications",
        Some(admin_token),
        Some(json!({
            "user_id": user_id,
            "title": "Lab results",
            "message": "Your results are ready"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_notification_list_is_scoped_to_caller() {
    let app = app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let ada = register_patient(&app, "ada@example.org").await;
    let grace = register_patient(&app, "grace@example.org").await;
    notification_for(&app, &admin_token, &ada["user"]["id"]).await;
    notification_for(&app, &admin_token, &grace["user"]["id"]).await;

    let token = login(&app, "grace@example.org", "patient-password").await;
    let (status, body) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user_id"], grace["user"]["id"]);

    let (status, body) = send(&app, Method::GET, "/api/notifications", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_patient_cannot_send_notifications() {
    let app = app().await;
    let ada = register_patient(&app, "ada@example.org").await;
    register_patient(&app, "grace@example.org").await;
    let token = login(&app, "grace@example.org", "patient-password").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notifications",
        Some(&token),
        Some(json!({
            "user_id": ada["user"]["id"],
            "title": "Hello",
            "message": "Spoofed"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_patient_cannot_touch_other_notification() {
    let app = app().await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let ada = register_patient(&app, "ada@example.org").await;
    register_patient(&app, "grace@example.org").await;
    let id = notification_for(&app, &admin_token, &ada["user"]["id"]).await;

    let grace_token = login(&app, "grace@example.org", "patient-password").await;
    let read_uri = format!("/api/notifications/{}/read", id);
    let (status, _) = send(&app, Method::POST, &read_uri, Some(&grace_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::GET, &format!("/api/notifications/{}", id), Some(&grace_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let ada_token = login(&app, "ada@example.org", "patient-password").await;
    let (status, body) = send(&app, Method::POST, &read_uri, Some(&ada_token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["is_read"], true);
}

#[tokio::test]
async fn test_malformed_input_uses_error_envelope() {
    let app = app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/specialties")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/specialties",
        Some(&token),
        Some(json!({ "name": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reports/appointments?from=last-week",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}
