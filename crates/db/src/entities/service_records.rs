//! `SeaORM` Entity for the service_records table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{Seriousness, ServiceStatus};

/// A workshop repair record.
///
/// At most one In Service row exists per VIN. `created_at` doubles as the
/// repair start date; the nightly sweep completes records whose start
/// date plus estimated days has passed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "service_records")]
pub struct Model {
    /// Row id; the sequence part of the business id.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Business id: MMDDYYYY + row id.
    #[sea_orm(unique)]
    pub service_id: String,
    /// Vehicle in the workshop.
    pub vin_number: String,
    /// Repair seriousness level.
    pub seriousness_level: Seriousness,
    /// Estimated repair duration in days.
    pub estimated_days: i32,
    /// Repair cost rolled into the vehicle's cost at completion.
    pub cost_added: Decimal,
    /// Record status.
    pub status: ServiceStatus,
    /// Creation timestamp; doubles as the repair start date.
    pub created_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The vehicle under repair.
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
