//! Payment and installment calculations.

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rust_decimal::{Decimal, MathematicalOps};

use super::error::LoanError;
use super::types::CreditBand;

/// Computes the fixed monthly installment for a loan.
///
/// A non-positive annual rate degrades to a straight-line split of the
/// principal over the term. Otherwise the standard fixed-rate amortization
/// formula applies: `P * r / (1 - (1 + r)^-n)` with `r` the monthly rate.
/// The result is rounded to two decimal places.
///
/// # Errors
///
/// Returns `LoanError::InvalidTerm` for a term below one month.
pub fn monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: i32,
) -> Result<Decimal, LoanError> {
    if term_months < 1 {
        return Err(LoanError::InvalidTerm(term_months));
    }

    if annual_rate_percent <= Decimal::ZERO {
        return Ok((principal / Decimal::from(term_months)).round_dp(2));
    }

    let monthly_rate = annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12);
    let discount = (Decimal::ONE + monthly_rate).powi(-i64::from(term_months));
    let payment = principal * monthly_rate / (Decimal::ONE - discount);

    Ok(payment.round_dp(2))
}

/// Counts loan installments paid between the sale date and `today`.
///
/// Installments are due on the 10th of each calendar month. The first due
/// date is the earliest 10th on or after the sale date (same month when the
/// sale day is on or before the 10th, next month otherwise). The count is
/// the number of whole months elapsed since the first due date, plus one
/// when today's day-of-month has reached the 10th, clamped to
/// `[0, term_months]`.
#[must_use]
pub fn months_paid_since(sale_date: NaiveDate, today: NaiveDate, term_months: i32) -> i32 {
    if term_months <= 0 || sale_date > today {
        return 0;
    }

    let first_due = if sale_date.day() <= 10 {
        tenth_of(sale_date.year(), sale_date.month())
    } else if sale_date.month() == 12 {
        tenth_of(sale_date.year() + 1, 1)
    } else {
        tenth_of(sale_date.year(), sale_date.month() + 1)
    };

    if today < first_due {
        return 0;
    }

    let mut months = (today.year() - first_due.year()) * 12 + today.month() as i32
        - first_due.month() as i32;
    if today.day() >= 10 {
        months += 1;
    }

    months.clamp(0, term_months)
}

fn tenth_of(year: i32, month: u32) -> NaiveDate {
    // The 10th exists in every month.
    NaiveDate::from_ymd_opt(year, month, 10).expect("valid calendar date")
}

/// Draws a random annual interest rate within the band's closed interval.
///
/// The draw happens in integer basis points, so the result carries exactly
/// two decimal places and both interval endpoints are reachable.
pub fn random_rate<R: Rng + ?Sized>(band: CreditBand, rng: &mut R) -> Decimal {
    let (lo, hi) = band.rate_bounds_bps();
    Decimal::new(rng.random_range(lo..=hi), 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(
            monthly_payment(dec!(10000), dec!(0), 10).unwrap(),
            dec!(1000.00)
        );
    }

    #[test]
    fn test_amortized_payment() {
        // 20000 sale with 2000 down at 6% over 36 months.
        let payment = monthly_payment(dec!(18000), dec!(6), 36).unwrap();
        assert_eq!(payment, dec!(547.59));
    }

    #[test]
    fn test_negative_rate_treated_as_interest_free() {
        assert_eq!(
            monthly_payment(dec!(1200), dec!(-1), 12).unwrap(),
            dec!(100.00)
        );
    }

    #[test]
    fn test_rejects_non_positive_term() {
        assert!(monthly_payment(dec!(1000), dec!(5), 0).is_err());
        assert!(monthly_payment(dec!(1000), dec!(5), -12).is_err());
    }

    #[rstest]
    // First due 2024-01-10; two whole months to March plus the 15th >= 10.
    #[case("2024-01-05", "2024-03-15", 12, 3)]
    // Before the first due date nothing is paid.
    #[case("2024-01-05", "2024-01-09", 12, 0)]
    // Sale after the 10th pushes the first due date into February.
    #[case("2024-01-15", "2024-02-09", 12, 0)]
    #[case("2024-01-15", "2024-02-10", 12, 1)]
    // December sale rolls the first due date into January.
    #[case("2023-12-20", "2024-01-10", 12, 1)]
    // Never exceeds the loan term.
    #[case("2020-01-05", "2024-03-15", 12, 12)]
    // Sale date in the future pays nothing.
    #[case("2024-06-01", "2024-03-15", 12, 0)]
    fn test_months_paid_since(
        #[case] sale_date: &str,
        #[case] today: &str,
        #[case] term: i32,
        #[case] expected: i32,
    ) {
        let sale_date = sale_date.parse::<NaiveDate>().unwrap();
        let today = today.parse::<NaiveDate>().unwrap();
        assert_eq!(months_paid_since(sale_date, today, term), expected);
    }

    #[test]
    fn test_months_paid_without_term() {
        let sale = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(months_paid_since(sale, today, 0), 0);
        assert_eq!(months_paid_since(sale, today, -3), 0);
    }

    #[test]
    fn test_random_rate_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for band in [
            CreditBand::Excellent,
            CreditBand::VeryGood,
            CreditBand::Good,
            CreditBand::Average,
            CreditBand::Poor,
        ] {
            let (lo, hi) = band.rate_bounds();
            for _ in 0..100 {
                let rate = random_rate(band, &mut rng);
                assert!(rate >= lo && rate <= hi, "{rate} outside {band} bounds");
                assert!(rate.scale() <= 2);
            }
        }
    }
}
