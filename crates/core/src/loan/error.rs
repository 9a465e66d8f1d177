//! Loan error types.

use lotworks_shared::AppError;
use thiserror::Error;

/// Loan-related errors.
#[derive(Debug, Error)]
pub enum LoanError {
    /// Loan term must be at least one month.
    #[error("Loan term must be positive, got {0}")]
    InvalidTerm(i32),
}

impl From<LoanError> for AppError {
    fn from(err: LoanError) -> Self {
        Self::Validation(err.to_string())
    }
}
