//! Router-level tests for the authentication gate and write-path validation.
//!
//! The store handle here is a disconnected `DatabaseConnection`: every
//! passing assertion proves the response was produced before any store
//! access (the gate rejects unauthenticated requests, and write-path
//! validation rejects bad input, without touching the database).

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

use duitku_api::{AppState, create_router};
use duitku_shared::{JwtConfig, JwtService};

const TEST_SECRET: &str = "test-secret-key-for-testing";

fn test_router() -> (Router, Arc<JwtService>) {
    let jwt_service = Arc::new(JwtService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expires_secs: 3600,
    }));

    let state = AppState {
        db: Arc::new(DatabaseConnection::default()),
        jwt_service: jwt_service.clone(),
    };

    (create_router(state), jwt_service)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (router, _) = test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (router, _) = test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_non_bearer_authorization_is_unauthorized() {
    let (router, _) = test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let (router, _) = test_router();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let (router, _) = test_router();

    let other = JwtService::new(JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        token_expires_secs: 3600,
    });
    let token = other.generate_token(Uuid::new_v4(), "user@duitku.dev").unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (router, _) = test_router();

    let expired_issuer = JwtService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expires_secs: -3600,
    });
    let token = expired_issuer
        .generate_token(Uuid::new_v4(), "user@duitku.dev")
        .unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/v1/transactions")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "token_expired");
}

// ============================================================================
// Write-path validation (runs before any store call)
// ============================================================================

fn post_transaction(token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/transactions")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_with_missing_fields_is_bad_request() {
    let (router, jwt) = test_router();
    let token = jwt.generate_token(Uuid::new_v4(), "user@duitku.dev").unwrap();

    let response = router
        .oneshot(post_transaction(
            &token,
            serde_json::json!({ "tanggal": "2026-08-01" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_field");
}

#[tokio::test]
async fn test_create_with_invalid_tipe_is_bad_request() {
    let (router, jwt) = test_router();
    let token = jwt.generate_token(Uuid::new_v4(), "user@duitku.dev").unwrap();

    // The same value that List would silently ignore is rejected here.
    let response = router
        .oneshot(post_transaction(
            &token,
            serde_json::json!({
                "tanggal": "2026-08-01",
                "tipe": "bogus",
                "jumlah": "10.00"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_tipe");
}

#[tokio::test]
async fn test_create_with_non_positive_jumlah_is_bad_request() {
    let (_, jwt) = test_router();
    let token = jwt.generate_token(Uuid::new_v4(), "user@duitku.dev").unwrap();

    for amount in ["0", "-5.00"] {
        let (router, _) = test_router();
        let response = router
            .oneshot(post_transaction(
                &token,
                serde_json::json!({
                    "tanggal": "2026-08-01",
                    "tipe": "keluar",
                    "jumlah": amount
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "invalid_jumlah");
    }
}

#[tokio::test]
async fn test_update_applies_the_same_strict_validation() {
    let (router, jwt) = test_router();
    let token = jwt.generate_token(Uuid::new_v4(), "user@duitku.dev").unwrap();

    let response = router
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/transactions/{}", Uuid::new_v4()))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "tanggal": "2026-08-01",
                        "tipe": "bogus",
                        "jumlah": "10.00"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_tipe");
}
