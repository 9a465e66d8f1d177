//! `SeaORM` Entity for the sales table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{CreditBand, PaymentMethod, SaleStatus};

/// A sale negotiation record.
///
/// At most one non-Sold row exists per VIN; repeated negotiation updates
/// for the same VIN mutate that row in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Row id; the sequence part of the business id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business id: MMDDYYYY + row id.
    #[sea_orm(unique)]
    pub sale_id: String,
    /// Vehicle under negotiation.
    pub vin_number: String,
    /// Negotiated sale price.
    pub sale_price: Decimal,
    /// Negotiation status.
    pub status: SaleStatus,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Down payment (Loan deals; required in Under Contract for all).
    pub deposit: Option<Decimal>,
    /// Annual interest rate in percent.
    pub interest_rate: Option<Decimal>,
    /// Credit-score band.
    pub credit_band: Option<CreditBand>,
    /// Loan term in months.
    pub term_months: Option<i32>,
    /// Fixed monthly installment, once computable.
    pub monthly_payment: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
    /// First time the sale entered Under Contract; never overwritten.
    pub status_under_contract_at: Option<DateTimeWithTimeZone>,
    /// First time the sale entered Under Writing; never overwritten.
    pub status_under_writing_at: Option<DateTimeWithTimeZone>,
    /// First time the sale entered Sold; never overwritten.
    pub status_sold_at: Option<DateTimeWithTimeZone>,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The vehicle this sale negotiates.
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::VinNumber",
        to = "super::inventory::Column::VinNumber"
    )]
    Inventory,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
