//! Property-based tests for the pricing rules.

use lotworks_shared::Role;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::inventory::VehicleStatus;

use super::error::PricingError;
use super::service::{PROMOTION_UPDATE_QUOTA, PricingService};
use super::types::{AcquisitionInput, AcquisitionPath, PriceChange};

/// Strategy for money amounts between 1.00 and 1,000,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (100i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Admin),
        Just(Role::Finance),
        Just(Role::SalesRep),
        Just(Role::BuyerRep),
        Just(Role::ServiceRep),
        Just(Role::Pr),
    ]
}

fn arb_path() -> impl Strategy<Value = AcquisitionPath> {
    prop_oneof![
        Just(AcquisitionPath::Create),
        Just(AcquisitionPath::Import),
        Just(AcquisitionPath::Update),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// For any positive cost and price, the profit formula is exact:
    /// `(price - cost) / cost * 100`.
    #[test]
    fn prop_profit_percent_is_exact(cost in arb_amount(), price in arb_amount()) {
        let profit = PricingService::profit_percent(cost, price);
        prop_assert_eq!(profit, (price - cost) / cost * Decimal::ONE_HUNDRED);
    }

    /// An in-bounds acquisition is accepted iff its profit percent reaches
    /// the role- and path-specific floor.
    #[test]
    fn prop_acquisition_rejects_iff_below_floor(
        role in arb_role(),
        path in arb_path(),
        cost in arb_amount(),
        price in arb_amount(),
    ) {
        let input = AcquisitionInput {
            year: 2022,
            mileage: 10_000,
            cost,
            sale_price: price,
        };
        let floor = PricingService::acquisition_floor(role, path);
        let profit = PricingService::profit_percent(cost, price);

        let result = PricingService::validate_acquisition(role, path, &input, 2026);
        if profit < floor {
            let matched = matches!(
                result,
                Err(PricingError::ProfitBelowMinimum { .. })
            );
            prop_assert!(matched);
        } else {
            prop_assert_eq!(result.unwrap(), profit);
        }
    }

    /// A promotion discount or raise above 10% is always rejected for the
    /// PR role, regardless of the vehicle's numbers.
    #[test]
    fn prop_pr_large_percent_always_rejected(
        cost in arb_amount(),
        price in arb_amount(),
        percent in (1001i64..10_000i64).prop_map(|n| Decimal::new(n, 2)),
        discount in any::<bool>(),
    ) {
        let change = if discount {
            PriceChange::DiscountPercent(percent)
        } else {
            PriceChange::RaisePercent(percent)
        };
        let result = PricingService::promotion_decision(
            Role::Pr,
            VehicleStatus::Available,
            cost,
            price,
            change,
            0,
        );
        prop_assert!(matches!(result, Err(PricingError::ChangeExceedsLimit)));
    }

    /// Once the per-vehicle quota is spent, every further PR update is
    /// rejected regardless of magnitude.
    #[test]
    fn prop_pr_quota_binds(
        cost in arb_amount(),
        price in arb_amount(),
        spent in PROMOTION_UPDATE_QUOTA..10,
        percent in (1i64..1000i64).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let result = PricingService::promotion_decision(
            Role::Pr,
            VehicleStatus::Available,
            cost,
            price,
            PriceChange::RaisePercent(percent),
            spent,
        );
        prop_assert!(matches!(result, Err(PricingError::UpdateQuotaExhausted)));
    }

    /// An accepted promotion decision always carries the recomputed profit
    /// of its own new price.
    #[test]
    fn prop_promotion_decision_is_self_consistent(
        role in arb_role(),
        cost in arb_amount(),
        price in arb_amount(),
        percent in (1i64..1000i64).prop_map(|n| Decimal::new(n, 2)),
    ) {
        let result = PricingService::promotion_decision(
            role,
            VehicleStatus::Available,
            cost,
            price,
            PriceChange::RaisePercent(percent),
            0,
        );
        if let Ok(decision) = result {
            prop_assert_eq!(
                decision.profit_percent,
                PricingService::profit_percent(cost, decision.new_price)
            );
            prop_assert!(decision.new_price.scale() <= 2);
        }
    }
}
