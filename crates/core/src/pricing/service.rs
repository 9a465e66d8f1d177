//! Pricing rule validation.

use lotworks_shared::Role;
use rust_decimal::Decimal;

use crate::inventory::VehicleStatus;

use super::error::PricingError;
use super::types::{AcquisitionInput, AcquisitionPath, PriceChange, PriceDecision};

/// Maximum vehicle age accepted at acquisition, in years.
const MAX_VEHICLE_AGE_YEARS: i32 = 25;
/// Exclusive mileage bound accepted at acquisition.
const MAX_MILEAGE: i32 = 150_000;
/// Successful promotion updates allowed per vehicle for the PR role.
pub const PROMOTION_UPDATE_QUOTA: i32 = 2;

/// Stateless pricing rule engine.
///
/// All methods are pure: they validate a proposed change against the
/// caller's role and return either an accepted decision or a rejection
/// with a specific reason. Persisting an accepted decision is the
/// repository's job; nothing is written on rejection.
pub struct PricingService;

impl PricingService {
    /// Profit percent for a cost/price pair: `(price - cost) / cost * 100`.
    ///
    /// Returns zero for a non-positive cost; acquisition paths reject such
    /// costs before this matters.
    #[must_use]
    pub fn profit_percent(cost: Decimal, sale_price: Decimal) -> Decimal {
        if cost <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (sale_price - cost) / cost * Decimal::ONE_HUNDRED
    }

    /// Minimum profit percent for an acquisition, by role and path.
    #[must_use]
    pub fn acquisition_floor(role: Role, path: AcquisitionPath) -> Decimal {
        match (role, path) {
            (Role::Admin, _) => Decimal::new(5, 0),
            (Role::BuyerRep, AcquisitionPath::Create | AcquisitionPath::Update) => {
                Decimal::new(215, 1)
            }
            _ => Decimal::new(35, 0),
        }
    }

    /// Validates a vehicle's attributes and pricing at acquisition.
    ///
    /// Checks age, mileage, and cost bounds, then the role-specific profit
    /// floor. Returns the computed profit percent on acceptance. Any
    /// violation rejects the whole mutation.
    pub fn validate_acquisition(
        role: Role,
        path: AcquisitionPath,
        input: &AcquisitionInput,
        current_year: i32,
    ) -> Result<Decimal, PricingError> {
        if current_year - input.year > MAX_VEHICLE_AGE_YEARS {
            return Err(PricingError::VehicleTooOld {
                limit: MAX_VEHICLE_AGE_YEARS,
            });
        }
        if input.mileage >= MAX_MILEAGE {
            return Err(PricingError::MileageTooHigh { limit: MAX_MILEAGE });
        }
        if input.cost <= Decimal::ZERO {
            return Err(PricingError::NonPositiveCost);
        }

        let profit = Self::profit_percent(input.cost, input.sale_price);
        let floor = Self::acquisition_floor(role, path);
        if profit < floor {
            return Err(PricingError::ProfitBelowMinimum { minimum: floor });
        }

        Ok(profit)
    }

    /// Validates a negotiated sale price against the listed inventory price.
    ///
    /// A SalesRep may discount at most 10% below the listed price and must
    /// keep profit at or above 20%; privileged roles have no discount cap
    /// but must keep profit at or above 5%. Returns the profit percent on
    /// acceptance.
    pub fn validate_sale_price(
        role: Role,
        cost: Decimal,
        listed_price: Decimal,
        proposed_price: Decimal,
    ) -> Result<Decimal, PricingError> {
        if proposed_price <= Decimal::ZERO {
            return Err(PricingError::NonPositivePrice);
        }

        let profit = Self::profit_percent(cost, proposed_price);

        if role == Role::SalesRep {
            let min_allowed = listed_price * Decimal::new(90, 2);
            if proposed_price < min_allowed {
                return Err(PricingError::DiscountExceedsLimit);
            }
            if profit < Decimal::new(20, 0) {
                return Err(PricingError::ProfitBelowMinimum {
                    minimum: Decimal::new(20, 0),
                });
            }
        } else if profit < Decimal::new(5, 0) {
            return Err(PricingError::ProfitBelowMinimum {
                minimum: Decimal::new(5, 0),
            });
        }

        Ok(profit)
    }

    /// Validates a promotion price change and computes the resulting price.
    ///
    /// The PR role is capped at a 10% change per update, a 20% profit
    /// floor, and `PROMOTION_UPDATE_QUOTA` successful updates per vehicle
    /// (`update_count` is the number already spent). Unrestricted roles
    /// skip the cap and quota but keep a 5% profit floor. Vehicles whose
    /// status is not promotable are rejected for every role.
    pub fn promotion_decision(
        role: Role,
        status: VehicleStatus,
        cost: Decimal,
        old_price: Decimal,
        change: PriceChange,
        update_count: i32,
    ) -> Result<PriceDecision, PricingError> {
        if !status.allows_promotion_pricing() {
            return Err(PricingError::PromotionNotAllowed { status });
        }
        if cost <= Decimal::ZERO {
            return Err(PricingError::NonPositiveCost);
        }
        if old_price <= Decimal::ZERO {
            return Err(PricingError::NonPositivePrice);
        }

        let (new_price, change_percent) = match change {
            PriceChange::Absolute(price) => {
                if price <= Decimal::ZERO {
                    return Err(PricingError::NonPositivePrice);
                }
                (price, (price - old_price) * Decimal::ONE_HUNDRED / old_price)
            }
            PriceChange::DiscountPercent(discount) => {
                if discount <= Decimal::ZERO {
                    return Err(PricingError::NonPositivePercent);
                }
                let new_price = old_price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED);
                (new_price, -discount)
            }
            PriceChange::RaisePercent(raise) => {
                if raise <= Decimal::ZERO {
                    return Err(PricingError::NonPositivePercent);
                }
                let new_price = old_price * (Decimal::ONE + raise / Decimal::ONE_HUNDRED);
                (new_price, raise)
            }
        };
        let new_price = new_price.round_dp(2);

        if role == Role::Pr {
            if change_percent.abs() > Decimal::new(10, 0) {
                return Err(PricingError::ChangeExceedsLimit);
            }
            if update_count >= PROMOTION_UPDATE_QUOTA {
                return Err(PricingError::UpdateQuotaExhausted);
            }
        }

        let profit = Self::profit_percent(cost, new_price);
        let floor = if role == Role::Pr {
            Decimal::new(20, 0)
        } else {
            Decimal::new(5, 0)
        };
        if profit < floor {
            return Err(PricingError::ProfitBelowMinimum { minimum: floor });
        }

        Ok(PriceDecision {
            new_price,
            profit_percent: profit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_profit_percent_formula() {
        assert_eq!(
            PricingService::profit_percent(dec!(10000), dec!(12000)),
            dec!(20)
        );
        assert_eq!(
            PricingService::profit_percent(dec!(8000), dec!(8400)),
            dec!(5)
        );
        assert_eq!(PricingService::profit_percent(dec!(0), dec!(100)), dec!(0));
    }

    #[test]
    fn test_acquisition_floors_by_role_and_path() {
        assert_eq!(
            PricingService::acquisition_floor(Role::Admin, AcquisitionPath::Create),
            dec!(5)
        );
        assert_eq!(
            PricingService::acquisition_floor(Role::BuyerRep, AcquisitionPath::Create),
            dec!(21.5)
        );
        assert_eq!(
            PricingService::acquisition_floor(Role::BuyerRep, AcquisitionPath::Update),
            dec!(21.5)
        );
        // The import path keeps its own stricter BuyerRep floor.
        assert_eq!(
            PricingService::acquisition_floor(Role::BuyerRep, AcquisitionPath::Import),
            dec!(35)
        );
    }

    fn acquisition(cost: Decimal, price: Decimal) -> AcquisitionInput {
        AcquisitionInput {
            year: 2020,
            mileage: 40_000,
            cost,
            sale_price: price,
        }
    }

    #[test]
    fn test_acquisition_age_limit() {
        let input = AcquisitionInput {
            year: 2000,
            ..acquisition(dec!(5000), dec!(8000))
        };
        let err = PricingService::validate_acquisition(
            Role::Admin,
            AcquisitionPath::Create,
            &input,
            2026,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::VehicleTooOld { .. }));

        // Exactly 25 years old is still acceptable.
        let input = AcquisitionInput {
            year: 2001,
            ..acquisition(dec!(5000), dec!(8000))
        };
        assert!(
            PricingService::validate_acquisition(
                Role::Admin,
                AcquisitionPath::Create,
                &input,
                2026
            )
            .is_ok()
        );
    }

    #[test]
    fn test_acquisition_mileage_limit() {
        let input = AcquisitionInput {
            mileage: 150_000,
            ..acquisition(dec!(5000), dec!(8000))
        };
        let err = PricingService::validate_acquisition(
            Role::Admin,
            AcquisitionPath::Create,
            &input,
            2026,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::MileageTooHigh { .. }));
    }

    #[test]
    fn test_acquisition_rejects_non_positive_cost() {
        let input = acquisition(dec!(0), dec!(8000));
        let err = PricingService::validate_acquisition(
            Role::Admin,
            AcquisitionPath::Create,
            &input,
            2026,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::NonPositiveCost));
    }

    #[test]
    fn test_acquisition_profit_floor_per_role() {
        // 20% profit: fine for Admin, under the BuyerRep floor.
        let input = acquisition(dec!(10000), dec!(12000));
        assert!(
            PricingService::validate_acquisition(
                Role::Admin,
                AcquisitionPath::Create,
                &input,
                2026
            )
            .is_ok()
        );
        assert!(
            PricingService::validate_acquisition(
                Role::BuyerRep,
                AcquisitionPath::Create,
                &input,
                2026
            )
            .is_err()
        );

        // 21.5% exactly passes the BuyerRep create floor but not import.
        let input = acquisition(dec!(10000), dec!(12150));
        assert_eq!(
            PricingService::validate_acquisition(
                Role::BuyerRep,
                AcquisitionPath::Create,
                &input,
                2026
            )
            .unwrap(),
            dec!(21.5)
        );
        assert!(
            PricingService::validate_acquisition(
                Role::BuyerRep,
                AcquisitionPath::Import,
                &input,
                2026
            )
            .is_err()
        );
    }

    #[test]
    fn test_sales_rep_discount_cap() {
        // Listed 12000, cost 9000. Exactly 10% off is allowed.
        assert!(
            PricingService::validate_sale_price(Role::SalesRep, dec!(9000), dec!(12000), dec!(10800))
                .is_ok()
        );
        // A cent below the cap is rejected.
        let err = PricingService::validate_sale_price(
            Role::SalesRep,
            dec!(9000),
            dec!(12000),
            dec!(10799.99),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::DiscountExceedsLimit));
    }

    #[test]
    fn test_sales_rep_profit_floor() {
        // Within the discount cap but profit drops under 20%.
        let err = PricingService::validate_sale_price(
            Role::SalesRep,
            dec!(10000),
            dec!(12000),
            dec!(11500),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::ProfitBelowMinimum { .. }));
    }

    #[test]
    fn test_privileged_sale_price_has_no_discount_cap() {
        // 40% below listed price, profit still over 5%.
        assert!(
            PricingService::validate_sale_price(Role::Admin, dec!(6000), dec!(12000), dec!(7200))
                .is_ok()
        );
        let err =
            PricingService::validate_sale_price(Role::Admin, dec!(7000), dec!(12000), dec!(7200))
                .unwrap_err();
        assert!(matches!(err, PricingError::ProfitBelowMinimum { .. }));
    }

    #[test]
    fn test_promotion_rejects_ineligible_status() {
        let err = PricingService::promotion_decision(
            Role::Admin,
            VehicleStatus::UnderContract,
            dec!(8000),
            dec!(12000),
            PriceChange::RaisePercent(dec!(5)),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::PromotionNotAllowed { .. }));
    }

    #[test]
    fn test_promotion_pr_change_cap() {
        // 12% absolute raise.
        let err = PricingService::promotion_decision(
            Role::Pr,
            VehicleStatus::Available,
            dec!(8000),
            dec!(12000),
            PriceChange::Absolute(dec!(13440)),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::ChangeExceedsLimit));

        // Admin is not capped.
        assert!(
            PricingService::promotion_decision(
                Role::Admin,
                VehicleStatus::Available,
                dec!(8000),
                dec!(12000),
                PriceChange::Absolute(dec!(13440)),
                0,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_promotion_pr_quota() {
        let change = PriceChange::RaisePercent(dec!(2));
        assert!(
            PricingService::promotion_decision(
                Role::Pr,
                VehicleStatus::Available,
                dec!(8000),
                dec!(12000),
                change,
                1,
            )
            .is_ok()
        );
        let err = PricingService::promotion_decision(
            Role::Pr,
            VehicleStatus::Available,
            dec!(8000),
            dec!(12000),
            change,
            PROMOTION_UPDATE_QUOTA,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::UpdateQuotaExhausted));

        // The quota does not bind unrestricted roles.
        assert!(
            PricingService::promotion_decision(
                Role::Admin,
                VehicleStatus::Available,
                dec!(8000),
                dec!(12000),
                change,
                5,
            )
            .is_ok()
        );
    }

    #[test]
    fn test_promotion_discount_computes_rounded_price() {
        let decision = PricingService::promotion_decision(
            Role::Pr,
            VehicleStatus::Available,
            dec!(8000),
            dec!(11999),
            PriceChange::DiscountPercent(dec!(7.5)),
            0,
        )
        .unwrap();
        assert_eq!(decision.new_price, dec!(11099.08));
        assert_eq!(
            decision.profit_percent,
            PricingService::profit_percent(dec!(8000), dec!(11099.08))
        );
    }

    #[test]
    fn test_promotion_pr_profit_floor() {
        // 10% discount takes profit below 20%.
        let err = PricingService::promotion_decision(
            Role::Pr,
            VehicleStatus::Available,
            dec!(10000),
            dec!(12500),
            PriceChange::DiscountPercent(dec!(10)),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::ProfitBelowMinimum { .. }));
    }
}
