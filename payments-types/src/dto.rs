//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Payment, PaymentUid};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new payment.
///
/// Missing account or amount fields decode to empty/zero values so that the
/// validation rules report them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Source account reference
    #[serde(default)]
    #[schema(example = "ES7921000813610123456789")]
    pub account_origin: String,
    /// Destination account reference
    #[serde(default)]
    #[schema(example = "ES6000491500051234567892")]
    pub account_target: String,
    /// Amount to pay, strictly positive
    #[serde(default)]
    #[schema(example = 25.0)]
    pub amount: f64,
    /// Logical date of the payment (RFC 3339)
    #[schema(value_type = String, example = "2024-03-01T10:00:00Z")]
    pub date: DateTime<Utc>,
}

/// Wire representation of a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    /// External payment identifier
    pub uid: PaymentUid,
    #[schema(example = "ES7921000813610123456789")]
    pub account_origin: String,
    #[schema(example = "ES6000491500051234567892")]
    pub account_target: String,
    #[schema(example = 25.0)]
    pub amount: f64,
    #[schema(value_type = String, example = "2024-03-01T10:00:00Z")]
    pub date: DateTime<Utc>,
    pub processed: bool,
    /// When the payment was processed; null while unprocessed
    #[schema(value_type = Option<String>, example = "2024-03-02T08:15:00Z")]
    pub processed_date: Option<DateTime<Utc>>,
}

impl From<Payment> for PaymentView {
    fn from(payment: Payment) -> Self {
        Self {
            processed: payment.is_processed(),
            processed_date: payment.processed_at(),
            uid: payment.uid,
            account_origin: payment.account_origin,
            account_target: payment.account_target,
            amount: payment.amount.value(),
            date: payment.date,
        }
    }
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    #[schema(example = 409)]
    pub code: u16,
    /// Human readable message
    #[schema(example = "Payment already processed")]
    pub error: String,
}
