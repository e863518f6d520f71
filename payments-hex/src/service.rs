//! Payment Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use chrono::Utc;

use payments_types::{
    AppError, CreatePaymentRequest, NewPayment, Payment, PaymentRepository, PaymentUid,
    RandomUidGenerator, UidGenerator,
};

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with an in-memory repo
/// - Compile-time checks for port implementation
///
/// The service keeps no mutable state of its own, so one instance can be
/// shared across every request handler.
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
    uids: Box<dyn UidGenerator>,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given repository.
    pub fn new(repo: R) -> Self {
        Self::with_uid_generator(repo, RandomUidGenerator)
    }

    /// Creates a payment service with a custom uid source.
    pub fn with_uid_generator(repo: R, uids: impl UidGenerator) -> Self {
        Self {
            repo,
            uids: Box::new(uids),
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all payments in storage order.
    pub async fn list_payments(&self) -> Result<Vec<Payment>, AppError> {
        self.repo.list_all().await.map_err(Into::into)
    }

    /// Gets a payment by uid.
    pub async fn get_payment(&self, uid: &PaymentUid) -> Result<Payment, AppError> {
        self.repo
            .find_by_uid(uid)
            .await
            .map_err(Into::into)
            .and_then(|opt| {
                opt.ok_or_else(|| AppError::NotFound(format!("Payment {} not found", uid)))
            })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates the request and stores a new, unprocessed payment.
    pub async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment, AppError> {
        let amount = NewPayment::validate(&req.account_origin, &req.account_target, req.amount)?;
        let uid = self.uids.generate()?;

        let payment = NewPayment::new(
            uid,
            req.account_origin,
            req.account_target,
            amount,
            req.date,
        );

        let stored = self.repo.insert(payment).await?;
        tracing::info!(uid = %stored.uid, amount = %stored.amount, "payment created");
        Ok(stored)
    }

    /// Marks an unprocessed payment as processed, stamped with the current second.
    pub async fn mark_processed(&self, uid: &PaymentUid) -> Result<Payment, AppError> {
        let mut payment = self.get_payment(uid).await?;

        if let Err(e) = payment.mark_processed(Utc::now()) {
            tracing::warn!(uid = %uid, "rejected processing of an already processed payment");
            return Err(e.into());
        }

        let stored = self.repo.replace(&payment).await?;
        tracing::info!(uid = %uid, "payment marked as processed");
        Ok(stored)
    }

    /// Deletes a payment that has not been processed yet.
    pub async fn delete_payment(&self, uid: &PaymentUid) -> Result<(), AppError> {
        let payment = self.get_payment(uid).await?;

        if let Err(e) = payment.ensure_unprocessed() {
            tracing::warn!(uid = %uid, "rejected deletion of a processed payment");
            return Err(e.into());
        }

        self.repo.remove(&payment).await?;
        tracing::info!(uid = %uid, "payment deleted");
        Ok(())
    }
}
