//! Payment domain model.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::amount::Amount;
use crate::error::DomainError;

/// Storage-assigned identifier of a Payment. Never leaves the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaymentId(i64);

impl PaymentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// External-facing identifier of a Payment.
///
/// Generated uids are UUIDs, but lookups accept any string: an unknown
/// value is simply not found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
pub struct PaymentUid(String);

impl PaymentUid {
    /// Creates a uid from a generated UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Returns the uid as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the owned string value.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for PaymentUid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PaymentUid {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for PaymentUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Processing state of a payment.
///
/// `Unprocessed` is the initial state and `Processed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Unprocessed,
    Processed { processed_at: DateTime<Utc> },
}

impl PaymentState {
    /// Rebuilds the state from its two stored columns.
    ///
    /// Returns `None` when the columns disagree (flag without date or the
    /// other way around).
    pub fn from_columns(processed: bool, processed_at: Option<DateTime<Utc>>) -> Option<Self> {
        match (processed, processed_at) {
            (false, None) => Some(PaymentState::Unprocessed),
            (true, Some(processed_at)) => Some(PaymentState::Processed { processed_at }),
            _ => None,
        }
    }

    pub fn is_processed(&self) -> bool {
        matches!(self, PaymentState::Processed { .. })
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PaymentState::Unprocessed => None,
            PaymentState::Processed { processed_at } => Some(*processed_at),
        }
    }
}

/// A validated payment that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub uid: PaymentUid,
    pub account_origin: String,
    pub account_target: String,
    pub amount: Amount,
    pub date: DateTime<Utc>,
}

impl NewPayment {
    /// Checks the creation rules in order: origin, target, amount.
    ///
    /// Only the first failing rule is reported.
    pub fn validate(
        account_origin: &str,
        account_target: &str,
        amount: f64,
    ) -> Result<Amount, DomainError> {
        if account_origin.is_empty() {
            return Err(DomainError::MissingAccountOrigin);
        }
        if account_target.is_empty() {
            return Err(DomainError::MissingAccountTarget);
        }
        Amount::new(amount)
    }

    /// Creates a new unstored payment.
    pub fn new(
        uid: PaymentUid,
        account_origin: String,
        account_target: String,
        amount: Amount,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            uid,
            account_origin,
            account_target,
            amount,
            date,
        }
    }

    /// Attaches the storage id; a freshly stored payment is always unprocessed.
    pub fn into_payment(self, id: PaymentId) -> Payment {
        Payment {
            id,
            uid: self.uid,
            account_origin: self.account_origin,
            account_target: self.account_target,
            amount: self.amount,
            date: self.date,
            state: PaymentState::Unprocessed,
        }
    }
}

/// A stored payment record.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: PaymentId,
    pub uid: PaymentUid,
    pub account_origin: String,
    pub account_target: String,
    pub amount: Amount,
    /// Logical date supplied by the caller
    pub date: DateTime<Utc>,
    pub state: PaymentState,
}

impl Payment {
    /// Reconstructs a payment from database fields.
    pub fn from_parts(
        id: PaymentId,
        uid: PaymentUid,
        account_origin: String,
        account_target: String,
        amount: Amount,
        date: DateTime<Utc>,
        state: PaymentState,
    ) -> Self {
        Self {
            id,
            uid,
            account_origin,
            account_target,
            amount,
            date,
            state,
        }
    }

    pub fn is_processed(&self) -> bool {
        self.state.is_processed()
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.state.processed_at()
    }

    /// Fails with `AlreadyProcessed` once the payment has been processed.
    pub fn ensure_unprocessed(&self) -> Result<(), DomainError> {
        if self.is_processed() {
            return Err(DomainError::AlreadyProcessed);
        }
        Ok(())
    }

    /// Moves the payment to `Processed`, stamping `at` truncated to whole seconds.
    pub fn mark_processed(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_unprocessed()?;
        self.state = PaymentState::Processed {
            processed_at: at.trunc_subsecs(0),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn sample_payment() -> Payment {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        NewPayment::new(
            PaymentUid::from("uid-1"),
            "ES01".into(),
            "ES02".into(),
            Amount::new(25.0).unwrap(),
            date,
        )
        .into_payment(PaymentId::new(1))
    }

    #[test]
    fn test_validate_reports_origin_first() {
        let result = NewPayment::validate("", "", 0.0);
        assert!(matches!(result, Err(DomainError::MissingAccountOrigin)));
    }

    #[test]
    fn test_validate_reports_target_before_amount() {
        let result = NewPayment::validate("A", "", -1.0);
        assert!(matches!(result, Err(DomainError::MissingAccountTarget)));
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let result = NewPayment::validate("A", "B", 0.0);
        assert!(matches!(result, Err(DomainError::NonPositiveAmount)));
    }

    #[test]
    fn test_new_payment_is_unprocessed() {
        let payment = sample_payment();
        assert_eq!(payment.state, PaymentState::Unprocessed);
        assert!(payment.processed_at().is_none());
    }

    #[test]
    fn test_mark_processed_truncates_to_seconds() {
        let mut payment = sample_payment();
        let at = Utc
            .with_ymd_and_hms(2024, 3, 2, 12, 30, 15)
            .unwrap()
            .with_nanosecond(987_654_321)
            .unwrap();

        payment.mark_processed(at).unwrap();

        let processed_at = payment.processed_at().unwrap();
        assert!(payment.is_processed());
        assert_eq!(processed_at.nanosecond(), 0);
        assert_eq!(processed_at.second(), 15);
    }

    #[test]
    fn test_mark_processed_twice_fails() {
        let mut payment = sample_payment();
        payment.mark_processed(Utc::now()).unwrap();
        let before = payment.clone();

        let result = payment.mark_processed(Utc::now());

        assert!(matches!(result, Err(DomainError::AlreadyProcessed)));
        assert_eq!(payment, before);
    }

    #[test]
    fn test_state_from_columns() {
        let now = Utc::now();
        assert_eq!(
            PaymentState::from_columns(false, None),
            Some(PaymentState::Unprocessed)
        );
        assert_eq!(
            PaymentState::from_columns(true, Some(now)),
            Some(PaymentState::Processed { processed_at: now })
        );
        assert_eq!(PaymentState::from_columns(true, None), None);
        assert_eq!(PaymentState::from_columns(false, Some(now)), None);
    }
}
