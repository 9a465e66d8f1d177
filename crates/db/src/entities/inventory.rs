//! `SeaORM` Entity for the inventory table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{VehicleCondition, VehicleStatus};

/// A vehicle on the lot.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    /// Row id; also the sequence used for generated VINs.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique vehicle identifier.
    #[sea_orm(unique)]
    pub vin_number: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Odometer reading.
    pub mileage: i32,
    /// Condition class at acquisition.
    pub condition_type: VehicleCondition,
    /// Acquisition cost; grows when repairs complete.
    pub cost: Decimal,
    /// Listed sale price.
    pub sale_price: Decimal,
    /// Cached profit percent, recomputed on every price mutation.
    pub profit_percent: Decimal,
    /// Lifecycle status.
    pub status: VehicleStatus,
    /// Dealership lot this vehicle belongs to.
    pub location: String,
    /// Successful promotion price updates spent on this vehicle.
    pub pr_update_count: i32,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Sales negotiated for this vehicle.
    #[sea_orm(has_many = "super::sales::Entity")]
    Sales,
    /// Service records for this vehicle.
    #[sea_orm(has_many = "super::service_records::Entity")]
    ServiceRecords,
}

impl Related<super::sales::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::service_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
