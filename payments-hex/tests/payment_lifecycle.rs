//! End-to-end lifecycle tests over the HTTP router backed by SQLite.
//!
//! These tests drive the full stack: axum routing, the payment service,
//! and the guarded writes of the SQLite repository.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::{SubsecRound, Utc};
use http_body_util::BodyExt;
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::SqliteRepo;
use payments_types::PaymentView;
use tower::ServiceExt;

/// Helper to create a router over an in-memory SQLite store.
async fn create_test_app() -> axum::Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = PaymentService::new(repo);
    HttpServer::new(service).router()
}

fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn call(app: &axum::Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_create_process_and_reject_further_mutation() {
    let app = create_test_app().await;

    let (status, body) = call(
        &app,
        json_request(
            Method::POST,
            "/api/v1/payments",
            r#"{"accountOrigin": "A", "accountTarget": "B", "amount": 25, "date": "2024-03-01T10:00:00Z"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: PaymentView = serde_json::from_slice(&body).unwrap();
    assert!(!created.uid.as_str().is_empty());
    assert!(!created.processed);

    let uri = format!("/api/v1/payments/uid/{}", created.uid);
    let before = Utc::now().trunc_subsecs(0);

    let (status, body) = call(
        &app,
        empty_request(Method::PATCH, &format!("{}/processed", uri)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let processed: PaymentView = serde_json::from_slice(&body).unwrap();
    assert!(processed.processed);
    let processed_date = processed.processed_date.unwrap();
    assert!(processed_date >= before);
    assert_eq!(processed_date, processed_date.trunc_subsecs(0));

    let (status, _) = call(
        &app,
        empty_request(Method::PATCH, &format!("{}/processed", uri)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::OK);
    let stored: PaymentView = serde_json::from_slice(&body).unwrap();
    assert_eq!(stored, processed);
}

#[tokio::test]
async fn test_delete_then_list_is_empty() {
    let app = create_test_app().await;

    let (_, body) = call(
        &app,
        json_request(
            Method::POST,
            "/api/v1/payments",
            r#"{"accountOrigin": "A", "accountTarget": "B", "amount": 10.5, "date": "2024-03-01T10:00:00Z"}"#,
        ),
    )
    .await;
    let created: PaymentView = serde_json::from_slice(&body).unwrap();
    let uri = format!("/api/v1/payments/uid/{}", created.uid);

    let (status, body) = call(&app, empty_request(Method::DELETE, &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = call(&app, empty_request(Method::GET, &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call(&app, empty_request(Method::GET, "/api/v1/payments")).await;
    assert_eq!(status, StatusCode::OK);
    let payments: Vec<PaymentView> = serde_json::from_slice(&body).unwrap();
    assert!(payments.is_empty());
}

#[tokio::test]
async fn test_validation_error_body() {
    let app = create_test_app().await;

    let (status, body) = call(
        &app,
        json_request(
            Method::POST,
            "/api/v1/payments",
            r#"{"accountOrigin": "A", "amount": 10, "date": "2024-03-01T10:00:00Z"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], 400);
    assert_eq!(json["error"], "account target is mandatory");
}
