//! Database row structs and their conversion into domain payments.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use payments_types::{Amount, Payment, PaymentId, PaymentState, PaymentUid, RepoError};

/// Columns selected by every payment query, in row-struct order.
pub const PAYMENT_COLUMNS: &str =
    "id, uid, account_origin, account_target, amount, date, processed, processed_date";

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from PostgreSQL (native timestamps).
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct DbPayment {
    pub id: i64,
    pub uid: String,
    pub account_origin: String,
    pub account_target: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub processed: bool,
    pub processed_date: Option<DateTime<Utc>>,
}

#[cfg(feature = "postgres")]
impl DbPayment {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        build_payment(
            self.id,
            self.uid,
            self.account_origin,
            self.account_target,
            self.amount,
            self.date,
            self.processed,
            self.processed_date,
        )
    }
}

/// Payment row from SQLite (timestamps stored as RFC 3339 text).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct DbSqlitePayment {
    pub id: i64,
    pub uid: String,
    pub account_origin: String,
    pub account_target: String,
    pub amount: f64,
    pub date: String,
    pub processed: bool,
    pub processed_date: Option<String>,
}

#[cfg(feature = "sqlite")]
impl DbSqlitePayment {
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let date = parse_timestamp(&self.date)?;
        let processed_date = self
            .processed_date
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        build_payment(
            self.id,
            self.uid,
            self.account_origin,
            self.account_target,
            self.amount,
            date,
            self.processed,
            processed_date,
        )
    }
}

#[cfg(feature = "sqlite")]
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Database(e.to_string()))
}

#[allow(clippy::too_many_arguments)]
fn build_payment(
    id: i64,
    uid: String,
    account_origin: String,
    account_target: String,
    amount: f64,
    date: DateTime<Utc>,
    processed: bool,
    processed_date: Option<DateTime<Utc>>,
) -> Result<Payment, RepoError> {
    let state = PaymentState::from_columns(processed, processed_date).ok_or_else(|| {
        RepoError::Database(format!(
            "Payment {} has inconsistent processed columns",
            uid
        ))
    })?;

    let amount = Amount::new(amount).map_err(|e| RepoError::Database(e.to_string()))?;

    Ok(Payment::from_parts(
        PaymentId::new(id),
        PaymentUid::from(uid),
        account_origin,
        account_target,
        amount,
        date,
        state,
    ))
}
