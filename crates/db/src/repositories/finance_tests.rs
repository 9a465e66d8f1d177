//! Tests for the pure snapshot-row assembly helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::entities::sea_orm_active_enums::{
    CreditBand as DbCreditBand, PaymentMethod as DbPaymentMethod, SaleStatus as DbSaleStatus,
    VehicleCondition as DbVehicleCondition, VehicleStatus as DbVehicleStatus,
};
use crate::entities::{inventory, sales};
use crate::repositories::finance::{snapshot_row_from_sale, snapshot_row_from_stock};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn timestamp(s: &str) -> chrono::DateTime<chrono::FixedOffset> {
    format!("{s}T10:30:00+00:00").parse().unwrap()
}

fn sold_loan_sale() -> sales::Model {
    sales::Model {
        id: 7,
        sale_id: "040920247".into(),
        vin_number: "010320241".into(),
        sale_price: dec!(20000),
        status: DbSaleStatus::Sold,
        payment_method: DbPaymentMethod::Loan,
        deposit: Some(dec!(2000)),
        interest_rate: Some(dec!(6.00)),
        credit_band: Some(DbCreditBand::Good),
        term_months: Some(36),
        monthly_payment: Some(dec!(547.59)),
        created_at: timestamp("2024-01-03"),
        updated_at: timestamp("2024-01-05"),
        status_under_contract_at: Some(timestamp("2024-01-03")),
        status_under_writing_at: Some(timestamp("2024-01-04")),
        status_sold_at: Some(timestamp("2024-01-05")),
    }
}

fn stock_vehicle(status: DbVehicleStatus) -> inventory::Model {
    inventory::Model {
        id: 3,
        vin_number: "020120243".into(),
        make: "Toyota".into(),
        model: "Camry".into(),
        year: 2021,
        mileage: 32_000,
        condition_type: DbVehicleCondition::Normal,
        cost: dec!(15000),
        sale_price: dec!(18500),
        profit_percent: dec!(23.33),
        status,
        location: "Denver".into(),
        pr_update_count: 0,
        created_at: timestamp("2024-02-01"),
        updated_at: timestamp("2024-02-01"),
    }
}

#[test]
fn test_sold_loan_row_carries_full_figures() {
    let sale = sold_loan_sale();
    let row = snapshot_row_from_sale(&sale, dec!(15000), date("2024-03-15"));

    assert_eq!(row.status.clone().unwrap(), DbVehicleStatus::Sold);
    assert_eq!(row.sale_id.clone().unwrap(), Some("040920247".to_string()));
    assert_eq!(row.sale_date.clone().unwrap(), Some(date("2024-01-05")));
    assert_eq!(row.tax.clone().unwrap(), dec!(1200.00));
    assert_eq!(row.cc_fee.clone().unwrap(), dec!(0));
    assert_eq!(row.final_sale_price.clone().unwrap(), dec!(21200.00));
    // Sold 2024-01-05, snapshot 2024-03-15: three installments collected.
    assert_eq!(row.amount_paid.clone().unwrap(), dec!(1642.77));
    assert_eq!(row.amount_remaining.clone().unwrap(), dec!(18070.47));
    // 21200 - (0 + 1200 + 15000)
    assert_eq!(row.net_profit.clone().unwrap(), dec!(5000.00));
    // Loan profit-now is what was collected minus the cost.
    assert_eq!(row.profit_now.clone().unwrap(), dec!(1642.77) - dec!(15000));
    assert_eq!(row.loan_term.clone().unwrap(), Some(36));
    assert_eq!(row.monthly_payment.clone().unwrap(), Some(dec!(547.59)));
}

#[test]
fn test_sold_credit_row_pays_card_fee() {
    let mut sale = sold_loan_sale();
    sale.payment_method = DbPaymentMethod::Credit;
    sale.deposit = None;
    sale.interest_rate = None;
    sale.credit_band = None;
    sale.term_months = None;
    sale.monthly_payment = None;

    let row = snapshot_row_from_sale(&sale, dec!(15000), date("2024-03-15"));
    assert_eq!(row.cc_fee.clone().unwrap(), dec!(1000.00));
    assert_eq!(row.amount_paid.clone().unwrap(), dec!(0));
    // 21200 - (1000 + 1200 + 15000)
    assert_eq!(row.net_profit.clone().unwrap(), dec!(4000.00));
    assert_eq!(row.profit_now.clone().unwrap(), dec!(4000.00));
    assert_eq!(row.deposit.clone().unwrap(), dec!(0));
}

#[test]
fn test_non_sold_sale_produces_partial_row() {
    let mut sale = sold_loan_sale();
    sale.status = DbSaleStatus::UnderWriting;
    sale.status_sold_at = None;

    let row = snapshot_row_from_sale(&sale, dec!(15000), date("2024-03-15"));
    assert_eq!(row.status.clone().unwrap(), DbVehicleStatus::UnderWriting);
    assert_eq!(row.vin_number.clone().unwrap(), "010320241");
    assert_eq!(row.cost.clone().unwrap(), dec!(15000));
    assert_eq!(row.sale_price.clone().unwrap(), dec!(20000));
    // Everything financial stays blank on a partial row.
    assert_eq!(row.payment_type.clone().unwrap(), None);
    assert_eq!(row.deposit.clone().unwrap(), dec!(0));
    assert_eq!(row.loan_term.clone().unwrap(), None);
    assert_eq!(row.monthly_payment.clone().unwrap(), None);
    assert_eq!(row.tax.clone().unwrap(), dec!(0));
    assert_eq!(row.final_sale_price.clone().unwrap(), dec!(0));
    assert_eq!(row.net_profit.clone().unwrap(), dec!(0));
    assert_eq!(row.profit_now.clone().unwrap(), dec!(0));
    assert_eq!(row.sale_date.clone().unwrap(), None);
}

#[test]
fn test_sold_without_sold_timestamp_falls_back_to_updated_at() {
    let mut sale = sold_loan_sale();
    sale.status_sold_at = None;

    let row = snapshot_row_from_sale(&sale, dec!(15000), date("2024-03-15"));
    assert_eq!(row.sale_date.clone().unwrap(), Some(date("2024-01-05")));
}

#[test]
fn test_removed_vehicle_counts_cost_zero() {
    let sale = sold_loan_sale();
    let row = snapshot_row_from_sale(&sale, Decimal::ZERO, date("2024-03-15"));
    assert_eq!(row.cost.clone().unwrap(), dec!(0));
    // 21200 - (0 + 1200 + 0)
    assert_eq!(row.net_profit.clone().unwrap(), dec!(20000.00));
}

#[test]
fn test_stock_row_is_partial() {
    let vehicle = stock_vehicle(DbVehicleStatus::InService);
    let row = snapshot_row_from_stock(&vehicle);

    assert_eq!(row.vin_number.clone().unwrap(), "020120243");
    assert_eq!(row.status.clone().unwrap(), DbVehicleStatus::InService);
    assert_eq!(row.cost.clone().unwrap(), dec!(15000));
    assert_eq!(row.sale_price.clone().unwrap(), dec!(18500));
    assert_eq!(row.sale_id.clone().unwrap(), None);
    assert_eq!(row.payment_type.clone().unwrap(), None);
    assert_eq!(row.final_sale_price.clone().unwrap(), dec!(0));
    assert_eq!(row.profit_now.clone().unwrap(), dec!(0));
}
