//! Finance computation types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sales::PaymentMethod;

/// Loan progress inputs for a sold, financed deal.
#[derive(Debug, Clone, Copy)]
pub struct LoanPosition {
    /// Loan term in months.
    pub term_months: i32,
    /// Fixed monthly installment.
    pub monthly_payment: Decimal,
}

/// The computed financial fields of a sold deal.
///
/// Everything here is rounded to two decimal places; recomputing the
/// snapshot from the same inputs yields identical figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFigures {
    /// 6% sales tax on the negotiated price.
    pub tax: Decimal,
    /// 5% card-processing fee (Credit deals only).
    pub cc_fee: Decimal,
    /// Negotiated price plus tax.
    pub final_sale_price: Decimal,
    /// Installments collected so far (Loan deals).
    pub amount_paid: Decimal,
    /// Installments outstanding (Loan deals).
    pub amount_remaining: Decimal,
    /// Profit once the deal is fully collected.
    pub net_profit: Decimal,
    /// Profit realized as of today.
    pub profit_now: Decimal,
}

/// Cost/price pair of an unsold vehicle, for the summary.
#[derive(Debug, Clone, Copy)]
pub struct StockRow {
    /// Acquisition cost.
    pub cost: Decimal,
    /// Listed sale price.
    pub sale_price: Decimal,
}

/// The summary-relevant slice of a sold snapshot row.
#[derive(Debug, Clone, Copy)]
pub struct SoldRow {
    /// Acquisition cost.
    pub cost: Decimal,
    /// Price plus tax.
    pub final_sale_price: Decimal,
    /// Sales tax collected.
    pub tax: Decimal,
    /// Installments collected so far.
    pub amount_paid: Decimal,
    /// How the deal was paid.
    pub payment_method: PaymentMethod,
}

/// High-level aggregated metrics over the current snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Sum of cost over unsold inventory.
    pub total_assets: Decimal,
    /// Sum of listed prices over unsold inventory.
    pub projected_sale: Decimal,
    /// Projected sale minus assets.
    pub projected_profit: Decimal,
    /// Sum of final sale prices over sold deals.
    pub total_final_sold: Decimal,
    /// Sum of tax over sold deals.
    pub total_tax_sold: Decimal,
    /// Cash actually on hand: full price for Cash/Credit, installments
    /// collected for Loan.
    pub total_available_funds: Decimal,
    /// Available funds minus the cost of the sold vehicles.
    pub total_profit_now: Decimal,
}
