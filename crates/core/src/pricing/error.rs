//! Pricing rule rejections.

use lotworks_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::inventory::VehicleStatus;

/// Pricing-rule errors.
///
/// Every rejection carries the specific reason so callers can surface it
/// verbatim; a rejected mutation is never partially applied.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Exactly one of absolute price, discount percent, or raise percent
    /// must be supplied.
    #[error("Exactly one of sale price, discount percent, or raise percent must be provided")]
    ExactlyOneChangeRequired,

    /// Cost must be greater than zero.
    #[error("Cost must be greater than 0")]
    NonPositiveCost,

    /// Sale price must be greater than zero.
    #[error("Sale price must be greater than 0")]
    NonPositivePrice,

    /// Percent adjustments must be greater than zero.
    #[error("Percent change must be greater than 0")]
    NonPositivePercent,

    /// Vehicle age exceeds the acquisition limit.
    #[error("Car age exceeds {limit} years limit")]
    VehicleTooOld {
        /// Maximum age in years.
        limit: i32,
    },

    /// Mileage exceeds the acquisition limit.
    #[error("Mileage must be less than {limit}")]
    MileageTooHigh {
        /// Exclusive mileage bound.
        limit: i32,
    },

    /// Resulting profit falls below the role's floor.
    #[error("Profit below minimum threshold ({minimum}%)")]
    ProfitBelowMinimum {
        /// Role-specific profit floor, in percent.
        minimum: Decimal,
    },

    /// Sales reps may not discount more than 10% below the listed price.
    #[error("SalesRep cannot discount more than 10%")]
    DiscountExceedsLimit,

    /// Promotion updates are capped at a 10% change per update.
    #[error("Price change exceeds allowed 10% limit")]
    ChangeExceedsLimit,

    /// The per-vehicle promotion update quota is spent.
    #[error("Maximum number of promotion price updates reached for this car")]
    UpdateQuotaExhausted,

    /// The vehicle's status does not allow promotion pricing.
    #[error("Car status {status} does not allow promotion price changes")]
    PromotionNotAllowed {
        /// Current vehicle status.
        status: VehicleStatus,
    },
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::ExactlyOneChangeRequired
            | PricingError::NonPositiveCost
            | PricingError::NonPositivePrice
            | PricingError::NonPositivePercent => Self::Validation(err.to_string()),
            _ => Self::PolicyViolation(err.to_string()),
        }
    }
}
