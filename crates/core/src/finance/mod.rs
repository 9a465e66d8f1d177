//! Sold-sale figures and ledger summary math.
//!
//! # Modules
//!
//! - `types` - Figure and summary row types
//! - `service` - The computations themselves

pub mod service;
pub mod types;

pub use service::FinanceService;
pub use types::{FinanceSummary, LoanPosition, SaleFigures, SoldRow, StockRow};
