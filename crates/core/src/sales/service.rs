//! The sale negotiation state machine.

use rust_decimal::Decimal;

use crate::inventory::VehicleStatus;
use crate::loan::{self, CreditBand};

use super::error::SaleError;
use super::types::{
    ActiveSale, NegotiationOutcome, NegotiationRequest, PaymentMethod, SaleStatus,
};

/// Underwritable loan term window, in months.
const TERM_BOUNDS: std::ops::RangeInclusive<i32> = 12..=48;

/// Stateless sale negotiation service.
///
/// `resolve` validates one negotiation step and produces the fields to
/// persist. The interest auto-fill is injected so callers choose the rate
/// source (the repositories pass the credit-band draw; tests pass a fixed
/// rate).
pub struct NegotiationService;

impl NegotiationService {
    /// Validates a negotiation step against the active sale (if any) and
    /// resolves the loan fields, monthly payment, and inventory side
    /// effect for the requested status.
    ///
    /// # Errors
    ///
    /// Rejects backward transitions, loan deals that do not start in
    /// Under Contract, and every per-status field-contract violation. On
    /// rejection nothing may be persisted.
    pub fn resolve<R>(
        request: &NegotiationRequest,
        existing: Option<&ActiveSale>,
        rate_for_band: R,
    ) -> Result<NegotiationOutcome, SaleError>
    where
        R: Fn(CreditBand) -> Decimal,
    {
        if let Some(active) = existing {
            if !active.status.allows_transition_to(request.status) {
                return Err(SaleError::InvalidTransition {
                    from: active.status,
                    to: request.status,
                });
            }
        } else if request.payment_method == PaymentMethod::Loan
            && request.status != SaleStatus::UnderContract
        {
            return Err(SaleError::LoanMustStartUnderContract);
        }

        match request.status {
            SaleStatus::UnderContract => Self::resolve_under_contract(request, existing, rate_for_band),
            SaleStatus::UnderWriting => Self::resolve_under_writing(request, rate_for_band),
            SaleStatus::Sold => Self::resolve_sold(request, rate_for_band),
        }
    }

    /// 5% of the sale price, the minimum acceptable deposit.
    #[must_use]
    pub fn minimum_deposit(sale_price: Decimal) -> Decimal {
        (sale_price * Decimal::new(5, 2)).round_dp(2)
    }

    fn check_deposit(deposit: Decimal, sale_price: Decimal) -> Result<(), SaleError> {
        let minimum = Self::minimum_deposit(sale_price);
        if deposit < minimum {
            return Err(SaleError::DepositBelowMinimum { minimum });
        }
        Ok(())
    }

    fn resolve_under_contract<R>(
        request: &NegotiationRequest,
        existing: Option<&ActiveSale>,
        rate_for_band: R,
    ) -> Result<NegotiationOutcome, SaleError>
    where
        R: Fn(CreditBand) -> Decimal,
    {
        // Every payment method requires the deposit up front.
        let deposit = request.deposit.ok_or(SaleError::DepositRequired)?;
        Self::check_deposit(deposit, request.sale_price)?;

        let mut interest_rate = request.interest_rate;
        if request.payment_method == PaymentMethod::Loan {
            let band = request.credit_band.ok_or(SaleError::CreditBandRequired)?;
            let term = request.term_months.ok_or(SaleError::TermRequired)?;
            if term < 1 {
                return Err(SaleError::Loan(loan::LoanError::InvalidTerm(term)));
            }
            if interest_rate.is_none() {
                interest_rate = Some(rate_for_band(band));
            }
        }

        // No monthly payment yet; a previously computed one is carried.
        Ok(NegotiationOutcome {
            deposit: Some(deposit),
            interest_rate,
            credit_band: request.credit_band,
            term_months: request.term_months,
            monthly_payment: existing.and_then(|sale| sale.monthly_payment),
            inventory_status: None,
        })
    }

    fn resolve_under_writing<R>(
        request: &NegotiationRequest,
        rate_for_band: R,
    ) -> Result<NegotiationOutcome, SaleError>
    where
        R: Fn(CreditBand) -> Decimal,
    {
        if request.payment_method != PaymentMethod::Loan {
            return Ok(NegotiationOutcome::cleared(Some(
                VehicleStatus::UnderWriting,
            )));
        }

        // Deposit and term are optional here but must obey the rules when present.
        if let Some(deposit) = request.deposit {
            Self::check_deposit(deposit, request.sale_price)?;
        }
        if let Some(term) = request.term_months {
            if !TERM_BOUNDS.contains(&term) {
                return Err(SaleError::TermOutOfBounds(term));
            }
        }

        let mut interest_rate = request.interest_rate;
        if interest_rate.is_none() {
            if let Some(band) = request.credit_band {
                interest_rate = Some(rate_for_band(band));
            }
        }

        let mut monthly_payment = None;
        if let (Some(rate), Some(term)) = (interest_rate, request.term_months) {
            let principal = request.sale_price - request.deposit.unwrap_or(Decimal::ZERO);
            monthly_payment = Some(loan::monthly_payment(principal, rate, term)?);
        }

        Ok(NegotiationOutcome {
            deposit: request.deposit,
            interest_rate,
            credit_band: request.credit_band,
            term_months: request.term_months,
            monthly_payment,
            inventory_status: Some(VehicleStatus::UnderWriting),
        })
    }

    fn resolve_sold<R>(
        request: &NegotiationRequest,
        rate_for_band: R,
    ) -> Result<NegotiationOutcome, SaleError>
    where
        R: Fn(CreditBand) -> Decimal,
    {
        if request.payment_method != PaymentMethod::Loan {
            return Ok(NegotiationOutcome::cleared(Some(VehicleStatus::Sold)));
        }

        // Closing a loan deal requires the complete field set.
        let deposit = request.deposit.ok_or(SaleError::DepositRequired)?;
        Self::check_deposit(deposit, request.sale_price)?;
        let band = request.credit_band.ok_or(SaleError::CreditBandRequired)?;
        let term = request.term_months.ok_or(SaleError::TermRequired)?;

        let interest_rate = request
            .interest_rate
            .unwrap_or_else(|| rate_for_band(band));

        let principal = request.sale_price - deposit;
        let monthly_payment = loan::monthly_payment(principal, interest_rate, term)?;

        Ok(NegotiationOutcome {
            deposit: Some(deposit),
            interest_rate: Some(interest_rate),
            credit_band: Some(band),
            term_months: Some(term),
            monthly_payment: Some(monthly_payment),
            inventory_status: Some(VehicleStatus::Sold),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fixed_rate(_: CreditBand) -> Decimal {
        dec!(6)
    }

    fn loan_request(status: SaleStatus) -> NegotiationRequest {
        NegotiationRequest {
            vin_number: "080720261".into(),
            sale_price: dec!(20000),
            status,
            payment_method: PaymentMethod::Loan,
            deposit: Some(dec!(2000)),
            interest_rate: None,
            credit_band: Some(CreditBand::Good),
            term_months: Some(36),
        }
    }

    #[test]
    fn test_new_loan_deal_must_start_under_contract() {
        let request = loan_request(SaleStatus::UnderWriting);
        let err = NegotiationService::resolve(&request, None, fixed_rate).unwrap_err();
        assert!(matches!(err, SaleError::LoanMustStartUnderContract));

        let request = loan_request(SaleStatus::UnderContract);
        assert!(NegotiationService::resolve(&request, None, fixed_rate).is_ok());
    }

    #[test]
    fn test_forward_transitions_accepted() {
        let active = |status| ActiveSale {
            status,
            monthly_payment: None,
        };

        let request = loan_request(SaleStatus::UnderWriting);
        assert!(
            NegotiationService::resolve(&request, Some(&active(SaleStatus::UnderContract)), fixed_rate)
                .is_ok()
        );

        let request = loan_request(SaleStatus::Sold);
        assert!(
            NegotiationService::resolve(&request, Some(&active(SaleStatus::UnderWriting)), fixed_rate)
                .is_ok()
        );
    }

    #[test]
    fn test_backward_transitions_rejected() {
        let active = |status| ActiveSale {
            status,
            monthly_payment: None,
        };

        let request = loan_request(SaleStatus::UnderContract);
        let err = NegotiationService::resolve(
            &request,
            Some(&active(SaleStatus::UnderWriting)),
            fixed_rate,
        )
        .unwrap_err();
        assert!(matches!(err, SaleError::InvalidTransition { .. }));

        let err =
            NegotiationService::resolve(&request, Some(&active(SaleStatus::Sold)), fixed_rate)
                .unwrap_err();
        assert!(matches!(err, SaleError::InvalidTransition { .. }));
    }

    #[test]
    fn test_under_contract_requires_deposit_for_every_method() {
        let mut request = loan_request(SaleStatus::UnderContract);
        request.payment_method = PaymentMethod::Cash;
        request.deposit = None;
        let err = NegotiationService::resolve(&request, None, fixed_rate).unwrap_err();
        assert!(matches!(err, SaleError::DepositRequired));

        // 5% of 20000 is 1000; 999.99 misses it.
        request.deposit = Some(dec!(999.99));
        let err = NegotiationService::resolve(&request, None, fixed_rate).unwrap_err();
        assert!(matches!(err, SaleError::DepositBelowMinimum { .. }));

        request.deposit = Some(dec!(1000));
        assert!(NegotiationService::resolve(&request, None, fixed_rate).is_ok());
    }

    #[test]
    fn test_under_contract_loan_requires_band_and_term() {
        let mut request = loan_request(SaleStatus::UnderContract);
        request.credit_band = None;
        let err = NegotiationService::resolve(&request, None, fixed_rate).unwrap_err();
        assert!(matches!(err, SaleError::CreditBandRequired));

        let mut request = loan_request(SaleStatus::UnderContract);
        request.term_months = None;
        let err = NegotiationService::resolve(&request, None, fixed_rate).unwrap_err();
        assert!(matches!(err, SaleError::TermRequired));
    }

    #[test]
    fn test_under_contract_fills_rate_but_no_payment() {
        let request = loan_request(SaleStatus::UnderContract);
        let outcome = NegotiationService::resolve(&request, None, fixed_rate).unwrap();
        assert_eq!(outcome.interest_rate, Some(dec!(6)));
        assert_eq!(outcome.monthly_payment, None);
        assert_eq!(outcome.inventory_status, None);
    }

    #[test]
    fn test_under_writing_computes_payment_once_rate_and_term_known() {
        let active = ActiveSale {
            status: SaleStatus::UnderContract,
            monthly_payment: None,
        };
        let request = loan_request(SaleStatus::UnderWriting);
        let outcome = NegotiationService::resolve(&request, Some(&active), fixed_rate).unwrap();
        // Principal 18000 at 6% over 36 months.
        assert_eq!(outcome.monthly_payment, Some(dec!(547.59)));
        assert_eq!(outcome.inventory_status, Some(VehicleStatus::UnderWriting));
    }

    #[test]
    fn test_under_writing_term_bounds() {
        let active = ActiveSale {
            status: SaleStatus::UnderContract,
            monthly_payment: None,
        };
        for term in [11, 49] {
            let mut request = loan_request(SaleStatus::UnderWriting);
            request.term_months = Some(term);
            let err =
                NegotiationService::resolve(&request, Some(&active), fixed_rate).unwrap_err();
            assert!(matches!(err, SaleError::TermOutOfBounds(t) if t == term));
        }
    }

    #[test]
    fn test_under_writing_clears_loan_fields_for_cash() {
        let active = ActiveSale {
            status: SaleStatus::UnderContract,
            monthly_payment: Some(dec!(547.59)),
        };
        let mut request = loan_request(SaleStatus::UnderWriting);
        request.payment_method = PaymentMethod::Cash;
        let outcome = NegotiationService::resolve(&request, Some(&active), fixed_rate).unwrap();
        assert_eq!(
            outcome,
            NegotiationOutcome::cleared(Some(VehicleStatus::UnderWriting))
        );
    }

    #[test]
    fn test_sold_loan_requires_full_field_set_and_recomputes() {
        let active = ActiveSale {
            status: SaleStatus::UnderWriting,
            monthly_payment: Some(dec!(111.11)),
        };
        let request = loan_request(SaleStatus::Sold);
        let outcome = NegotiationService::resolve(&request, Some(&active), fixed_rate).unwrap();
        assert_eq!(outcome.monthly_payment, Some(dec!(547.59)));
        assert_eq!(outcome.inventory_status, Some(VehicleStatus::Sold));

        let mut request = loan_request(SaleStatus::Sold);
        request.deposit = None;
        let err = NegotiationService::resolve(&request, Some(&active), fixed_rate).unwrap_err();
        assert!(matches!(err, SaleError::DepositRequired));
    }

    #[test]
    fn test_sold_cash_clears_loan_fields() {
        let active = ActiveSale {
            status: SaleStatus::UnderWriting,
            monthly_payment: Some(dec!(547.59)),
        };
        let mut request = loan_request(SaleStatus::Sold);
        request.payment_method = PaymentMethod::Credit;
        let outcome = NegotiationService::resolve(&request, Some(&active), fixed_rate).unwrap();
        assert_eq!(
            outcome,
            NegotiationOutcome::cleared(Some(VehicleStatus::Sold))
        );
    }
}
