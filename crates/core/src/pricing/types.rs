//! Price-change requests and accepted decisions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Which acquisition surface a vehicle price arrives through.
///
/// The profit floors differ per path; in particular the BuyerRep floor on
/// the interactive paths (21.5%) diverges from the batch-import floor
/// (35%). Both are preserved as written pending product clarification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionPath {
    /// Interactive single-vehicle creation.
    Create,
    /// Batch import row.
    Import,
    /// Update of an existing vehicle.
    Update,
}

/// Vehicle attributes checked at acquisition time.
#[derive(Debug, Clone, Copy)]
pub struct AcquisitionInput {
    /// Model year.
    pub year: i32,
    /// Odometer reading.
    pub mileage: i32,
    /// Acquisition cost.
    pub cost: Decimal,
    /// Proposed sale price.
    pub sale_price: Decimal,
}

/// A proposed promotion price change; exactly one form at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceChange {
    /// Replace the price outright.
    Absolute(Decimal),
    /// Lower the price by a percentage of the current price.
    DiscountPercent(Decimal),
    /// Raise the price by a percentage of the current price.
    RaisePercent(Decimal),
}

impl PriceChange {
    /// Builds a change from the three optional request fields, enforcing
    /// that exactly one is present.
    pub fn from_options(
        sale_price: Option<Decimal>,
        discount_percent: Option<Decimal>,
        raise_percent: Option<Decimal>,
    ) -> Result<Self, PricingError> {
        match (sale_price, discount_percent, raise_percent) {
            (Some(price), None, None) => Ok(Self::Absolute(price)),
            (None, Some(discount), None) => Ok(Self::DiscountPercent(discount)),
            (None, None, Some(raise)) => Ok(Self::RaisePercent(raise)),
            _ => Err(PricingError::ExactlyOneChangeRequired),
        }
    }
}

/// An accepted price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDecision {
    /// The price to persist.
    pub new_price: Decimal,
    /// The recomputed profit percent to cache alongside it.
    pub profit_percent: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exactly_one_change_form() {
        assert!(PriceChange::from_options(Some(dec!(100)), None, None).is_ok());
        assert!(PriceChange::from_options(None, Some(dec!(5)), None).is_ok());
        assert!(PriceChange::from_options(None, None, Some(dec!(5))).is_ok());
        assert!(PriceChange::from_options(None, None, None).is_err());
        assert!(PriceChange::from_options(Some(dec!(100)), Some(dec!(5)), None).is_err());
        assert!(
            PriceChange::from_options(Some(dec!(100)), Some(dec!(5)), Some(dec!(5))).is_err()
        );
    }
}
