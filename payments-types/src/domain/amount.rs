//! Strictly positive payment amount.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A payment amount, always strictly greater than zero.
///
/// The value is an opaque decimal as far as this service is concerned:
/// no currency, no rounding, no arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Creates a new Amount, rejecting zero, negative and NaN values.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        // `!(x > 0)` also catches NaN
        if !(value > 0.0) || !value.is_finite() {
            return Err(DomainError::NonPositiveAmount);
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
