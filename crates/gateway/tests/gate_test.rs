//! HTTP tests for the header authentication gate and the user endpoints.
//!
//! The router runs against the in-memory store with the real PBKDF2 encoder,
//! so no database is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::StorageBackend;
use domain::{PasswordEncoder, User, LOGIN_ID_HEADER, LOGIN_PW_HEADER};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use user_service_lib::build_user_service;
use user_service_lib::infra::Pbkdf2PasswordEncoder;
use user_service_lib::repository::{InMemoryUserStore, MockUserRepository, UserRepository};

fn create_test_app_with(repo: Arc<dyn UserRepository>) -> Router {
    let mut config = GatewayConfig::default();
    config.identity.storage = StorageBackend::Memory;

    create_router(AppState::new(build_user_service(repo), None, config))
}

fn create_test_app() -> Router {
    create_test_app_with(Arc::new(InMemoryUserStore::new()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn sign_up_request(login_id: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "loginId": login_id,
                "password": "Test1234!@",
                "name": "홍길동",
                "email": "test@example.com",
                "birthday": "1990-01-15"
            })
            .to_string(),
        ))
        .unwrap()
}

fn me_request(login_id: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/v1/users/me")
        .header(LOGIN_ID_HEADER, login_id)
        .header(LOGIN_PW_HEADER, password)
        .body(Body::empty())
        .unwrap()
}

fn change_password_request(password: &str, current: &str, new: &str) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri("/api/v1/users/me/password")
        .header("content-type", "application/json")
        .header(LOGIN_ID_HEADER, "testuser123")
        .header(LOGIN_PW_HEADER, password)
        .body(Body::from(
            json!({ "currentPassword": current, "newPassword": new }).to_string(),
        ))
        .unwrap()
}

// ==================== Excluded paths ====================

#[tokio::test]
async fn test_health_needs_no_credentials() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["backend"], "memory");
}

#[tokio::test]
async fn test_openapi_document_needs_no_credentials() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["paths"]["/api/v1/users/signup"].is_object());
}

#[tokio::test]
async fn test_sign_up_needs_no_credentials() {
    let app = create_test_app();

    let response = app.oneshot(sign_up_request("testuser123")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["loginId"], "testuser123");
    assert_eq!(body["data"]["name"], "홍길동");
    assert_eq!(body["data"]["email"], "test@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"].get("password").is_none());
}

// ==================== Sign-up failures ====================

#[tokio::test]
async fn test_duplicate_sign_up_conflicts() {
    let app = create_test_app();

    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();
    let response = app.oneshot(sign_up_request("testuser123")).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_sign_up_with_invalid_login_id_is_rejected() {
    let app = create_test_app();

    let response = app.oneshot(sign_up_request("test_user!")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_sign_up_with_malformed_body_is_bad_request() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/users/signup")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"loginId": "testuser123""#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// ==================== Gate ====================

#[tokio::test]
async fn test_protected_path_without_headers_is_unauthorized() {
    let app = create_test_app();

    let request = Request::builder()
        .uri("/api/v1/users/me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_single_credential_header_is_unauthorized() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let login_id_only = Request::builder()
        .uri("/api/v1/users/me")
        .header(LOGIN_ID_HEADER, "testuser123")
        .body(Body::empty())
        .unwrap();
    let password_only = Request::builder()
        .uri("/api/v1/users/me")
        .header(LOGIN_PW_HEADER, "Test1234!@")
        .body(Body::empty())
        .unwrap();

    for request in [login_id_only, password_only] {
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_blank_credential_header_is_unauthorized() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let response = app.oneshot(me_request("testuser123", "   ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_look_the_same() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let wrong_password = app
        .clone()
        .oneshot(me_request("testuser123", "Wrong1234!@"))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(me_request("nobody", "Test1234!@"))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong_password).await, json_body(unknown_user).await);
}

#[tokio::test]
async fn test_me_returns_masked_profile() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let response = app
        .oneshot(me_request("testuser123", "Test1234!@"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["loginId"], "testuser123");
    assert_eq!(body["data"]["name"], "홍길*");
    assert_eq!(body["data"]["email"], "test@example.com");
    assert_eq!(body["data"]["birthday"], "1990-01-15");
}

#[tokio::test]
async fn test_every_request_is_verified_again() {
    let encoded = Pbkdf2PasswordEncoder::new().encode("Test1234!@");
    let user = User::restore(
        Uuid::new_v4(),
        "testuser123".to_string(),
        encoded,
        "홍길동".to_string(),
        "test@example.com".to_string(),
        NaiveDate::from_ymd_opt(1990, 1, 15).unwrap(),
        Utc::now(),
        Utc::now(),
    );

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_login_id()
        .times(2)
        .returning(move |_| Ok(Some(user.clone())));
    let app = create_test_app_with(Arc::new(repo));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(me_request("testuser123", "Test1234!@"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// ==================== Password change ====================

#[tokio::test]
async fn test_change_password_flow() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(change_password_request("Test1234!@", "Test1234!@", "NewPass1234!@"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].is_string());

    let old = app
        .clone()
        .oneshot(me_request("testuser123", "Test1234!@"))
        .await
        .unwrap();
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = app
        .oneshot(me_request("testuser123", "NewPass1234!@"))
        .await
        .unwrap();
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_change_password_to_same_password_is_rejected() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let response = app
        .oneshot(change_password_request("Test1234!@", "Test1234!@", "Test1234!@"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_change_password_with_wrong_current_password_is_unauthorized() {
    let app = create_test_app();
    app.clone()
        .oneshot(sign_up_request("testuser123"))
        .await
        .unwrap();

    let response = app
        .oneshot(change_password_request("Test1234!@", "Wrong1234!@", "NewPass1234!@"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
