//! Domain models for the payments service.

pub mod amount;
pub mod payment;

pub use amount::Amount;
pub use payment::{NewPayment, Payment, PaymentId, PaymentState, PaymentUid};
