//! Amortization math and credit-band interest.
//!
//! # Modules
//!
//! - `types` - Credit-score bands and their rate intervals
//! - `error` - Loan-specific error types
//! - `service` - Payment and installment calculations

pub mod error;
pub mod service;
pub mod types;

pub use error::LoanError;
pub use service::{monthly_payment, months_paid_since, random_rate};
pub use types::CreditBand;
