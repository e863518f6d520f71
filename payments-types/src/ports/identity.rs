//! Uid generation port.

use rand::TryRngCore;
use rand::rngs::OsRng;
use uuid::Builder;

use crate::domain::PaymentUid;
use crate::error::DomainError;

/// Source of fresh payment uids.
pub trait UidGenerator: Send + Sync + 'static {
    /// Returns a new collision-resistant uid.
    fn generate(&self) -> Result<PaymentUid, DomainError>;
}

/// Random v4 UUIDs drawn from the operating system RNG.
///
/// Unlike `Uuid::new_v4`, an unavailable entropy source is reported as an
/// error instead of a panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUidGenerator;

impl UidGenerator for RandomUidGenerator {
    fn generate(&self) -> Result<PaymentUid, DomainError> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| DomainError::UidGeneration(e.to_string()))?;

        Ok(PaymentUid::from_uuid(
            Builder::from_random_bytes(bytes).into_uuid(),
        ))
    }
}
