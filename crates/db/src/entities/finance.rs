//! `SeaORM` Entity for the finance table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentMethod, VehicleStatus};

/// A derived finance snapshot row.
///
/// The table is exclusively owned by the snapshot builder: every rebuild
/// clears it and regenerates one row per VIN. Sold deals carry the full
/// figure set; everything else is a partial row where only VIN, cost,
/// sale price, and status carry meaning.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "finance")]
pub struct Model {
    /// Row id; the sequence part of the business id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business id: `F` + 6-digit sequence for sale-derived rows,
    /// `I` + 6-digit sequence for inventory-only rows.
    #[sea_orm(unique)]
    pub finance_id: String,
    /// Business id of the originating sale, when sale-derived.
    pub sale_id: Option<String>,
    /// Vehicle this row describes.
    pub vin_number: String,
    /// Acquisition cost (zero when the vehicle was removed).
    pub cost: Decimal,
    /// Negotiated or listed sale price.
    pub sale_price: Decimal,
    /// Pipeline status at snapshot time.
    pub status: VehicleStatus,
    /// Payment method; null on partial rows.
    pub payment_type: Option<PaymentMethod>,
    /// Down payment.
    pub deposit: Decimal,
    /// Loan term in months.
    pub loan_term: Option<i32>,
    /// Annual interest rate in percent.
    pub loan_interest: Option<Decimal>,
    /// Fixed monthly installment.
    pub monthly_payment: Option<Decimal>,
    /// Card-processing fee.
    pub cc_fee: Decimal,
    /// Sales tax.
    pub tax: Decimal,
    /// Sale price plus tax.
    pub final_sale_price: Decimal,
    /// Installments collected so far.
    pub amount_paid: Decimal,
    /// Installments outstanding.
    pub amount_remaining: Decimal,
    /// Profit once fully collected.
    pub net_profit: Decimal,
    /// Profit realized as of the snapshot.
    pub profit_now: Decimal,
    /// Date the deal became Sold, when applicable.
    pub sale_date: Option<Date>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
