//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule rejection (profit floor, discount cap, quota, ...).
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// Referenced VIN or record absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Role or location mismatch.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// An invariant a sweep expected does not hold.
    #[error("Consistency failure: {0}")]
    Consistency(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for reporting to external collaborators.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::PolicyViolation(_) => "POLICY_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PermissionDenied(_) => "PERMISSION_DENIED",
            Self::Consistency(_) => "CONSISTENCY_FAILURE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error should be surfaced to the caller as a
    /// client mistake rather than a system fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::PolicyViolation(_)
                | Self::NotFound(_)
                | Self::PermissionDenied(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::PolicyViolation(String::new()).error_code(),
            "POLICY_VIOLATION"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::PermissionDenied(String::new()).error_code(),
            "PERMISSION_DENIED"
        );
        assert_eq!(
            AppError::Consistency(String::new()).error_code(),
            "CONSISTENCY_FAILURE"
        );
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::Validation(String::new()).is_client_error());
        assert!(AppError::PolicyViolation(String::new()).is_client_error());
        assert!(AppError::NotFound(String::new()).is_client_error());
        assert!(AppError::PermissionDenied(String::new()).is_client_error());
        assert!(!AppError::Consistency(String::new()).is_client_error());
        assert!(!AppError::Database(String::new()).is_client_error());
        assert!(!AppError::Internal(String::new()).is_client_error());
    }
}
