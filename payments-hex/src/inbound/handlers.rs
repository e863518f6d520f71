//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use payments_types::{
    AppError, CreatePaymentRequest, ErrorResponse, PaymentRepository, PaymentUid, PaymentView,
};

use crate::PaymentService;

/// Application state shared across handlers.
pub struct AppState<R: PaymentRepository> {
    pub service: PaymentService<R>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            error: message,
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List all payments.
#[tracing::instrument(skip(state))]
pub async fn list_payments<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.service.list_payments().await?;
    let views: Vec<PaymentView> = payments.into_iter().map(PaymentView::from).collect();
    Ok(Json(views))
}

/// Get payment by uid.
#[tracing::instrument(skip_all, fields(uid = %uid))]
pub async fn get_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.get_payment(&PaymentUid::from(uid)).await?;
    Ok(Json(PaymentView::from(payment)))
}

/// Create a payment.
#[tracing::instrument(skip_all)]
pub async fn create_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let payment = state.service.create_payment(req).await?;
    Ok((StatusCode::CREATED, Json(PaymentView::from(payment))))
}

/// Flag a payment as processed.
#[tracing::instrument(skip_all, fields(uid = %uid))]
pub async fn mark_processed<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.service.mark_processed(&PaymentUid::from(uid)).await?;
    Ok(Json(PaymentView::from(payment)))
}

/// Delete an unprocessed payment.
#[tracing::instrument(skip_all, fields(uid = %uid))]
pub async fn delete_payment<R: PaymentRepository>(
    State(state): State<Arc<AppState<R>>>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete_payment(&PaymentUid::from(uid)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Serves the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}
