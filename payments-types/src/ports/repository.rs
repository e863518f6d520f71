//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{NewPayment, Payment, PaymentUid};
use crate::error::RepoError;

/// The storage port for payment records.
///
/// The repository owns persistence only; every business rule lives in the
/// service. The one exception is the guard on `replace` and `remove`: both
/// are conditional writes that only touch a row which is still unprocessed,
/// so two racing requests cannot both transition the same payment.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Lists every live payment in storage order.
    async fn list_all(&self) -> Result<Vec<Payment>, RepoError>;

    /// Finds a payment by uid. `Ok(None)` means no such record.
    async fn find_by_uid(&self, uid: &PaymentUid) -> Result<Option<Payment>, RepoError>;

    /// Stores a new payment and returns it with its storage id.
    ///
    /// Uid uniqueness is enforced here; a duplicate is a `Database` error.
    async fn insert(&self, payment: NewPayment) -> Result<Payment, RepoError>;

    /// Overwrites a stored payment.
    ///
    /// Fails with `Conflict` when the stored row is already processed and
    /// with `NotFound` when the row no longer exists.
    async fn replace(&self, payment: &Payment) -> Result<Payment, RepoError>;

    /// Removes a stored payment under the same guard as `replace`.
    async fn remove(&self, payment: &Payment) -> Result<(), RepoError>;
}
