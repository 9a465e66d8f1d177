//! Sale negotiation errors.

use lotworks_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::loan::LoanError;

use super::types::SaleStatus;

/// Sale negotiation errors.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The requested status change is not a forward transition.
    #[error("Invalid status change from {from} to {to}")]
    InvalidTransition {
        /// Current status of the active sale.
        from: SaleStatus,
        /// Requested status.
        to: SaleStatus,
    },

    /// New loan-financed deals must begin in Under Contract.
    #[error("Loan deals must start in Under Contract status")]
    LoanMustStartUnderContract,

    /// A deposit is mandatory in this status.
    #[error("Deposit is required")]
    DepositRequired,

    /// The deposit does not reach 5% of the sale price.
    #[error("Deposit must be at least 5% of sale price ({minimum})")]
    DepositBelowMinimum {
        /// 5% of the sale price.
        minimum: Decimal,
    },

    /// A credit-score band is mandatory for loan deals in this status.
    #[error("Credit score band is required for Loan")]
    CreditBandRequired,

    /// A loan term is mandatory in this status.
    #[error("Loan term (months) is required for Loan")]
    TermRequired,

    /// The loan term is outside the underwritable window.
    #[error("Loan term must be between 12 and 48 months, got {0}")]
    TermOutOfBounds(i32),

    /// Amortization input error.
    #[error(transparent)]
    Loan(#[from] LoanError),
}

impl From<SaleError> for AppError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::InvalidTransition { .. }
            | SaleError::LoanMustStartUnderContract
            | SaleError::DepositBelowMinimum { .. } => Self::PolicyViolation(err.to_string()),
            SaleError::DepositRequired
            | SaleError::CreditBandRequired
            | SaleError::TermRequired
            | SaleError::TermOutOfBounds(_)
            | SaleError::Loan(_) => Self::Validation(err.to_string()),
        }
    }
}
