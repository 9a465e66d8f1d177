//! Finance figure computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::loan;
use crate::sales::PaymentMethod;

use super::types::{FinanceSummary, LoanPosition, SaleFigures, SoldRow, StockRow};

/// Stateless finance math used by the snapshot builder.
pub struct FinanceService;

impl FinanceService {
    /// Computes the full figure set for a sold deal.
    ///
    /// Tax is 6% of the negotiated price, the card fee 5% for Credit
    /// deals. For loans with a known term and installment, paid/remaining
    /// amounts follow the months-paid count as of `today`; other deals
    /// carry zeros. `profit_now` is the net profit for Cash/Credit and the
    /// collected installments minus cost for Loan. Every figure is rounded
    /// at its own computation boundary.
    #[must_use]
    pub fn sold_figures(
        sale_price: Decimal,
        payment_method: PaymentMethod,
        position: Option<&LoanPosition>,
        cost: Decimal,
        sale_date: NaiveDate,
        today: NaiveDate,
    ) -> SaleFigures {
        let tax = (sale_price * Decimal::new(6, 2)).round_dp(2);
        let cc_fee = if payment_method == PaymentMethod::Credit {
            (sale_price * Decimal::new(5, 2)).round_dp(2)
        } else {
            Decimal::ZERO
        };
        let final_sale_price = (sale_price + tax).round_dp(2);

        let (amount_paid, amount_remaining) = match (payment_method, position) {
            (PaymentMethod::Loan, Some(position)) => {
                let months_paid =
                    loan::months_paid_since(sale_date, today, position.term_months);
                let paid = (Decimal::from(months_paid) * position.monthly_payment).round_dp(2);
                let outstanding_months = (position.term_months - months_paid).max(0);
                let remaining =
                    (Decimal::from(outstanding_months) * position.monthly_payment).round_dp(2);
                (paid, remaining)
            }
            _ => (Decimal::ZERO, Decimal::ZERO),
        };

        let net_profit = (final_sale_price - (cc_fee + tax + cost)).round_dp(2);
        let profit_now = match payment_method {
            PaymentMethod::Cash | PaymentMethod::Credit => net_profit,
            PaymentMethod::Loan => (amount_paid - cost).round_dp(2),
        };

        SaleFigures {
            tax,
            cc_fee,
            final_sale_price,
            amount_paid,
            amount_remaining,
            net_profit,
            profit_now,
        }
    }

    /// Aggregates the snapshot into the high-level metrics.
    #[must_use]
    pub fn summarize(stock: &[StockRow], sold: &[SoldRow]) -> FinanceSummary {
        let total_assets: Decimal = stock.iter().map(|row| row.cost).sum();
        let projected_sale: Decimal = stock.iter().map(|row| row.sale_price).sum();

        let total_final_sold: Decimal = sold.iter().map(|row| row.final_sale_price).sum();
        let total_tax_sold: Decimal = sold.iter().map(|row| row.tax).sum();
        let total_cost_sold: Decimal = sold.iter().map(|row| row.cost).sum();

        let total_available_funds: Decimal = sold
            .iter()
            .map(|row| match row.payment_method {
                PaymentMethod::Cash | PaymentMethod::Credit => row.final_sale_price,
                PaymentMethod::Loan => row.amount_paid,
            })
            .sum();

        FinanceSummary {
            total_assets: total_assets.round_dp(2),
            projected_sale: projected_sale.round_dp(2),
            projected_profit: (projected_sale - total_assets).round_dp(2),
            total_final_sold: total_final_sold.round_dp(2),
            total_tax_sold: total_tax_sold.round_dp(2),
            total_available_funds: total_available_funds.round_dp(2),
            total_profit_now: (total_available_funds - total_cost_sold).round_dp(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_cash_deal_figures() {
        let figures = FinanceService::sold_figures(
            dec!(10000),
            PaymentMethod::Cash,
            None,
            dec!(8000),
            date("2024-01-05"),
            date("2024-03-15"),
        );
        assert_eq!(figures.tax, dec!(600.00));
        assert_eq!(figures.cc_fee, dec!(0));
        assert_eq!(figures.final_sale_price, dec!(10600.00));
        assert_eq!(figures.amount_paid, dec!(0));
        assert_eq!(figures.amount_remaining, dec!(0));
        // 10600 - (0 + 600 + 8000)
        assert_eq!(figures.net_profit, dec!(2000.00));
        assert_eq!(figures.profit_now, dec!(2000.00));
    }

    #[test]
    fn test_credit_deal_pays_card_fee() {
        let figures = FinanceService::sold_figures(
            dec!(10000),
            PaymentMethod::Credit,
            None,
            dec!(8000),
            date("2024-01-05"),
            date("2024-03-15"),
        );
        assert_eq!(figures.cc_fee, dec!(500.00));
        // 10600 - (500 + 600 + 8000)
        assert_eq!(figures.net_profit, dec!(1500.00));
        assert_eq!(figures.profit_now, dec!(1500.00));
    }

    #[test]
    fn test_loan_deal_tracks_installments() {
        let position = LoanPosition {
            term_months: 12,
            monthly_payment: dec!(547.59),
        };
        // Sold 2024-01-05, checked 2024-03-15: three installments paid.
        let figures = FinanceService::sold_figures(
            dec!(20000),
            PaymentMethod::Loan,
            Some(&position),
            dec!(15000),
            date("2024-01-05"),
            date("2024-03-15"),
        );
        assert_eq!(figures.amount_paid, dec!(1642.77));
        assert_eq!(figures.amount_remaining, dec!(4928.31));
        assert_eq!(figures.profit_now, dec!(1642.77) - dec!(15000));
    }

    #[test]
    fn test_loan_deal_without_position_has_no_installments() {
        let figures = FinanceService::sold_figures(
            dec!(20000),
            PaymentMethod::Loan,
            None,
            dec!(15000),
            date("2024-01-05"),
            date("2024-03-15"),
        );
        assert_eq!(figures.amount_paid, dec!(0));
        assert_eq!(figures.amount_remaining, dec!(0));
        assert_eq!(figures.profit_now, dec!(-15000));
    }

    #[test]
    fn test_summary_aggregation() {
        let stock = [
            StockRow {
                cost: dec!(8000),
                sale_price: dec!(10000),
            },
            StockRow {
                cost: dec!(12000),
                sale_price: dec!(15000),
            },
        ];
        let sold = [
            SoldRow {
                cost: dec!(9000),
                final_sale_price: dec!(12720),
                tax: dec!(720),
                amount_paid: dec!(0),
                payment_method: PaymentMethod::Cash,
            },
            SoldRow {
                cost: dec!(7000),
                final_sale_price: dec!(10600),
                tax: dec!(600),
                amount_paid: dec!(1642.77),
                payment_method: PaymentMethod::Loan,
            },
        ];

        let summary = FinanceService::summarize(&stock, &sold);
        assert_eq!(summary.total_assets, dec!(20000));
        assert_eq!(summary.projected_sale, dec!(25000));
        assert_eq!(summary.projected_profit, dec!(5000));
        assert_eq!(summary.total_final_sold, dec!(23320));
        assert_eq!(summary.total_tax_sold, dec!(1320));
        // Cash deal contributes its full price, the loan only what was paid.
        assert_eq!(summary.total_available_funds, dec!(14362.77));
        assert_eq!(summary.total_profit_now, dec!(14362.77) - dec!(16000));
    }
}
