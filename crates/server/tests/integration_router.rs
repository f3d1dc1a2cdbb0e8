//! # Integration Tests for the HTTP Surface
//!
//! Drives the assembled router with raw requests to verify wiring: identity
//! middleware behavior, JSON envelopes, and status codes.

mod common;

use axum::body::Body;
use common::{create_user, test_state};
use http::{header, Request, StatusCode};
use server::create_app_router;
use tower::ServiceExt as _;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Body should be readable");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

#[tokio::test]
async fn test_health_endpoint_is_open() {
    let state = test_state().await;
    let app = create_app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_and_authenticated_logout_roundtrip() {
    let state = test_state().await;
    create_user(&state.db, "alice", "correct horse", 2, false).await;
    let app = create_app_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"alice","password":"correct horse"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let access_token = body["accessToken"].as_str().expect("accessToken present");
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["vipLevel"], 2);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/logout")
                .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_login_failure_uses_uniform_message() {
    let state = test_state().await;
    create_user(&state.db, "alice", "correct horse", 1, false).await;
    let app = create_app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"username":"alice","password":"wrong"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "使用者名稱或密碼錯誤");
}

#[tokio::test]
async fn test_garbage_bearer_token_is_rejected_up_front() {
    let state = test_state().await;
    let app = create_app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/videos")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "AUTHENTICATION_ERROR");
}

#[tokio::test]
async fn test_anonymous_video_listing_is_allowed() {
    let state = test_state().await;
    let app = create_app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/videos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn test_anonymous_logout_is_unauthorized() {
    let state = test_state().await;
    let app = create_app_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
