//! Error types for the payments service.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("account origin is mandatory")]
    MissingAccountOrigin,

    #[error("account target is mandatory")]
    MissingAccountTarget,

    #[error("amount must be a positive number")]
    NonPositiveAmount,

    #[error("Payment already processed")]
    AlreadyProcessed,

    #[error("Could not generate payment uid: {0}")]
    UidGeneration(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,

    /// A conditional write found the row in a state that forbids it.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingAccountOrigin
            | DomainError::MissingAccountTarget
            | DomainError::NonPositiveAmount => AppError::BadRequest(err.to_string()),
            DomainError::AlreadyProcessed => AppError::Conflict(err.to_string()),
            DomainError::UidGeneration(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Payment not found".into()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::Conflict(e) => AppError::Conflict(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_bad_request() {
        for err in [
            DomainError::MissingAccountOrigin,
            DomainError::MissingAccountTarget,
            DomainError::NonPositiveAmount,
        ] {
            assert!(matches!(AppError::from(err), AppError::BadRequest(_)));
        }
    }

    #[test]
    fn test_already_processed_maps_to_conflict() {
        let err = AppError::from(RepoError::Domain(DomainError::AlreadyProcessed));
        assert!(matches!(err, AppError::Conflict(msg) if msg == "Payment already processed"));
    }

    #[test]
    fn test_uid_generation_maps_to_internal() {
        let err = AppError::from(DomainError::UidGeneration("rng down".into()));
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_repo_errors_mapping() {
        assert!(matches!(
            AppError::from(RepoError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::Database("boom".into())),
            AppError::Internal(msg) if msg == "boom"
        ));
        assert!(matches!(
            AppError::from(RepoError::Conflict("busy".into())),
            AppError::Conflict(_)
        ));
    }
}
