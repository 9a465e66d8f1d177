//! Sale negotiation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inventory::VehicleStatus;
use crate::loan::CreditBand;

/// Status of a sale record.
///
/// The valid transitions are:
/// - Under Contract -> Under Contract | Under Writing | Sold
/// - Under Writing -> Under Writing | Sold
/// - Sold -> Sold (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Buyer has signed; loan paperwork may still be open.
    UnderContract,
    /// Deal is with underwriting.
    UnderWriting,
    /// Deal closed (immutable status).
    Sold,
}

impl SaleStatus {
    /// Returns the display representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnderContract => "Under Contract",
            Self::UnderWriting => "Under Writing",
            Self::Sold => "Sold",
        }
    }

    /// Parses a status from its display representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Under Contract" => Some(Self::UnderContract),
            "Under Writing" => Some(Self::UnderWriting),
            "Sold" => Some(Self::Sold),
            _ => None,
        }
    }

    /// Returns true if a sale may move from `self` to `to`.
    ///
    /// Re-entering the current status is always allowed (field updates);
    /// moving backwards never is, and Sold has no exit.
    #[must_use]
    pub const fn allows_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::UnderContract, _)
                | (Self::UnderWriting, Self::UnderWriting | Self::Sold)
                | (Self::Sold, Self::Sold)
        )
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Full payment on closing.
    Cash,
    /// Card payment; attracts the processor fee.
    Credit,
    /// Financed; carries the loan field set.
    Loan,
}

impl PaymentMethod {
    /// Returns the display representation of the payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Credit => "Credit",
            Self::Loan => "Loan",
        }
    }

    /// Parses a payment method from its display representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Cash" => Some(Self::Cash),
            "Credit" => Some(Self::Credit),
            "Loan" => Some(Self::Loan),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A full negotiation payload for one VIN.
///
/// The same payload both creates the first sale record for a VIN and
/// updates the active one; the state machine decides what the fields mean
/// in the requested status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegotiationRequest {
    /// Vehicle being negotiated.
    pub vin_number: String,
    /// Negotiated sale price.
    pub sale_price: Decimal,
    /// Requested status.
    pub status: SaleStatus,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Down payment.
    pub deposit: Option<Decimal>,
    /// Annual interest rate in percent; auto-filled from the band when absent.
    pub interest_rate: Option<Decimal>,
    /// Credit-score band from the lender check.
    pub credit_band: Option<CreditBand>,
    /// Loan term in months.
    pub term_months: Option<i32>,
}

/// The relevant slice of an already-active sale record.
#[derive(Debug, Clone, Copy)]
pub struct ActiveSale {
    /// Current status.
    pub status: SaleStatus,
    /// Previously computed monthly payment, if any.
    pub monthly_payment: Option<Decimal>,
}

/// The resolved fields to persist after a successful negotiation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationOutcome {
    /// Deposit to store (cleared for Cash/Credit past Under Contract).
    pub deposit: Option<Decimal>,
    /// Interest rate to store.
    pub interest_rate: Option<Decimal>,
    /// Credit band to store.
    pub credit_band: Option<CreditBand>,
    /// Loan term to store.
    pub term_months: Option<i32>,
    /// Monthly payment, once both rate and term are known.
    pub monthly_payment: Option<Decimal>,
    /// Status to push onto the linked inventory record, if any.
    pub inventory_status: Option<VehicleStatus>,
}

impl NegotiationOutcome {
    /// Outcome with every loan field cleared (Cash/Credit deals).
    #[must_use]
    pub const fn cleared(inventory_status: Option<VehicleStatus>) -> Self {
        Self {
            deposit: None,
            interest_rate: None,
            credit_band: None,
            term_months: None,
            monthly_payment: None,
            inventory_status,
        }
    }
}
