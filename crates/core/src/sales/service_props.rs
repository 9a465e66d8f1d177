//! Property-based tests for the negotiation state machine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::loan::CreditBand;

use super::error::SaleError;
use super::service::NegotiationService;
use super::types::{ActiveSale, NegotiationRequest, PaymentMethod, SaleStatus};

fn arb_status() -> impl Strategy<Value = SaleStatus> {
    prop_oneof![
        Just(SaleStatus::UnderContract),
        Just(SaleStatus::UnderWriting),
        Just(SaleStatus::Sold),
    ]
}

fn arb_method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::Credit),
        Just(PaymentMethod::Loan),
    ]
}

/// A request whose fields satisfy every per-status contract, so only the
/// transition rules decide the outcome.
fn well_formed_request(status: SaleStatus, method: PaymentMethod) -> NegotiationRequest {
    NegotiationRequest {
        vin_number: "080720261".into(),
        sale_price: Decimal::new(2_000_000, 2),
        status,
        payment_method: method,
        deposit: Some(Decimal::new(200_000, 2)),
        interest_rate: Some(Decimal::new(500, 2)),
        credit_band: Some(CreditBand::Good),
        term_months: Some(36),
    }
}

fn rank(status: SaleStatus) -> u8 {
    match status {
        SaleStatus::UnderContract => 0,
        SaleStatus::UnderWriting => 1,
        SaleStatus::Sold => 2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A well-formed step is accepted iff the status does not move
    /// backwards; the ordering Under Contract < Under Writing < Sold is
    /// total.
    #[test]
    fn prop_transition_accepted_iff_forward(
        from in arb_status(),
        to in arb_status(),
        method in arb_method(),
    ) {
        let active = ActiveSale { status: from, monthly_payment: None };
        let request = well_formed_request(to, method);
        let result = NegotiationService::resolve(&request, Some(&active), |_| Decimal::new(500, 2));

        if rank(to) >= rank(from) {
            prop_assert!(result.is_ok(), "forward step {from} -> {to} rejected");
        } else {
            prop_assert!(
                matches!(result, Err(SaleError::InvalidTransition { .. })),
                "backward step {from} -> {to} accepted"
            );
        }
    }

    /// Cash and Credit deals never leave Under Contract carrying loan
    /// fields or a monthly payment.
    #[test]
    fn prop_non_loan_deals_carry_no_loan_fields(
        to in prop_oneof![Just(SaleStatus::UnderWriting), Just(SaleStatus::Sold)],
        method in prop_oneof![Just(PaymentMethod::Cash), Just(PaymentMethod::Credit)],
    ) {
        let active = ActiveSale {
            status: SaleStatus::UnderContract,
            monthly_payment: Some(Decimal::new(12_345, 2)),
        };
        let request = well_formed_request(to, method);
        let outcome =
            NegotiationService::resolve(&request, Some(&active), |_| Decimal::ZERO).unwrap();

        prop_assert_eq!(outcome.deposit, None);
        prop_assert_eq!(outcome.interest_rate, None);
        prop_assert_eq!(outcome.credit_band, None);
        prop_assert_eq!(outcome.term_months, None);
        prop_assert_eq!(outcome.monthly_payment, None);
    }

    /// Whenever a loan outcome carries a monthly payment, it equals the
    /// amortized installment of `sale_price - deposit` at the resolved
    /// rate and term.
    #[test]
    fn prop_loan_payment_matches_amortization(
        to in prop_oneof![Just(SaleStatus::UnderWriting), Just(SaleStatus::Sold)],
        deposit_cents in 100_000i64..500_000i64,
        rate_bps in 0i64..1000i64,
        term in 12i32..=48i32,
    ) {
        let mut request = well_formed_request(to, PaymentMethod::Loan);
        request.deposit = Some(Decimal::new(deposit_cents, 2));
        request.interest_rate = Some(Decimal::new(rate_bps, 2));
        request.term_months = Some(term);

        let active = ActiveSale { status: SaleStatus::UnderContract, monthly_payment: None };
        let outcome =
            NegotiationService::resolve(&request, Some(&active), |_| Decimal::ZERO).unwrap();

        let principal = request.sale_price - Decimal::new(deposit_cents, 2);
        let expected = crate::loan::monthly_payment(
            principal,
            Decimal::new(rate_bps, 2),
            term,
        ).unwrap();
        prop_assert_eq!(outcome.monthly_payment, Some(expected));
    }
}
