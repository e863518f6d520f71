//! OpenAPI document for the payments API.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use payments_types::domain::PaymentUid;
use payments_types::dto::{CreatePaymentRequest, ErrorResponse, PaymentView};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List all payments
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "payments",
    responses(
        (status = 200, description = "All payments in storage order", body = Vec<PaymentView>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_payments() {}

/// Get a payment by uid
#[utoipa::path(
    get,
    path = "/api/v1/payments/uid/{uid}",
    tag = "payments",
    params(
        ("uid" = String, Path, description = "Payment uid")
    ),
    responses(
        (status = 200, description = "Payment details", body = PaymentView),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn get_payment() {}

/// Create a payment
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = PaymentView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Storage or uid generation failure", body = ErrorResponse)
    )
)]
async fn create_payment() {}

/// Flag a payment as processed
#[utoipa::path(
    patch,
    path = "/api/v1/payments/uid/{uid}/processed",
    tag = "payments",
    params(
        ("uid" = String, Path, description = "Payment uid")
    ),
    responses(
        (status = 200, description = "Payment processed", body = PaymentView),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 409, description = "Payment already processed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn mark_processed() {}

/// Delete an unprocessed payment
#[utoipa::path(
    delete,
    path = "/api/v1/payments/uid/{uid}",
    tag = "payments",
    params(
        ("uid" = String, Path, description = "Payment uid")
    ),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 409, description = "Payment already processed", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn delete_payment() {}

/// OpenAPI documentation for the Payments API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payments API",
        version = "1.0.0",
        description = "Create, list, fetch, process and delete payment records.\n\nA payment starts unprocessed. Once processed it can no longer be processed again or deleted; both attempts answer `409 Conflict`.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_payments,
        get_payment,
        create_payment,
        mark_processed,
        delete_payment,
    ),
    components(
        schemas(
            CreatePaymentRequest,
            PaymentView,
            PaymentUid,
            ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment record operations"),
    )
)]
pub struct ApiDoc;
