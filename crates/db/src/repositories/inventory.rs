//! Inventory repository for vehicle acquisition and upkeep.

use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use lotworks_core::ids;
use lotworks_core::inventory::{VehicleCondition, VehicleStatus};
use lotworks_core::pricing::{AcquisitionInput, AcquisitionPath, PricingError, PricingService};
use lotworks_core::servicing::Seriousness;
use lotworks_shared::{Actor, AppError, Role};

use crate::entities::sea_orm_active_enums::{
    ServiceStatus as DbServiceStatus, VehicleStatus as DbVehicleStatus,
};
use crate::entities::{inventory, service_records};
use crate::vin_lock;

use super::role_allowed;

/// Error types for inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Role or location does not allow the operation.
    #[error("Not enough permissions: {0}")]
    PermissionDenied(String),

    /// No vehicle with the given VIN.
    #[error("Car not found: {0}")]
    NotFound(String),

    /// Malformed input.
    #[error("{0}")]
    Validation(String),

    /// Pricing rule rejection.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            InventoryError::NotFound(msg) => Self::NotFound(msg),
            InventoryError::Validation(msg) => Self::Validation(msg),
            InventoryError::Pricing(inner) => inner.into(),
            InventoryError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Input for acquiring a vehicle.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    /// VIN; generated as MMDDYYYY + row id when absent.
    pub vin_number: Option<String>,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Model year.
    pub year: i32,
    /// Odometer reading.
    pub mileage: i32,
    /// Condition class.
    pub condition: VehicleCondition,
    /// Acquisition cost.
    pub cost: Decimal,
    /// Listed sale price.
    pub sale_price: Decimal,
    /// Target lot; mandatory for Admin, pinned for BuyerRep.
    pub location: Option<String>,
}

/// Input for updating a vehicle.
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    /// New manufacturer.
    pub make: Option<String>,
    /// New model name.
    pub model: Option<String>,
    /// New model year.
    pub year: Option<i32>,
    /// New odometer reading.
    pub mileage: Option<i32>,
    /// New condition class.
    pub condition: Option<VehicleCondition>,
    /// New acquisition cost.
    pub cost: Option<Decimal>,
    /// New listed sale price.
    pub sale_price: Option<Decimal>,
    /// New lot.
    pub location: Option<String>,
}

/// Equality and range filters for searching sellable stock.
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    /// VIN substring.
    pub vin_number: Option<String>,
    /// Manufacturer substring.
    pub make: Option<String>,
    /// Model substring.
    pub model: Option<String>,
    /// Condition class.
    pub condition: Option<VehicleCondition>,
    /// Minimum model year.
    pub year_min: Option<i32>,
    /// Maximum model year.
    pub year_max: Option<i32>,
    /// Minimum mileage.
    pub mileage_min: Option<i32>,
    /// Maximum mileage.
    pub mileage_max: Option<i32>,
    /// Minimum listed price.
    pub price_min: Option<Decimal>,
    /// Maximum listed price.
    pub price_max: Option<Decimal>,
}

/// Result of a batch import application.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Rows successfully imported.
    pub imported: u64,
    /// Rows rejected, with their reasons.
    pub errors: Vec<ImportRowError>,
}

/// One rejected import row.
#[derive(Debug, Clone)]
pub struct ImportRowError {
    /// 1-based row number in the submitted batch.
    pub row: usize,
    /// Why the row was rejected.
    pub reason: String,
}

/// Inventory repository.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Acquires a single vehicle.
    ///
    /// BuyerRep acquisitions are pinned to the rep's own location. The
    /// pricing rules (age, mileage, cost, role profit floor) gate the
    /// whole mutation. Damaged vehicles enter the workshop immediately:
    /// status In Service plus an automatic high-seriousness service
    /// record.
    pub async fn create(
        &self,
        actor: &Actor,
        input: NewVehicle,
    ) -> Result<inventory::Model, InventoryError> {
        if !role_allowed(actor, &[Role::Admin, Role::BuyerRep]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }
        let location = Self::resolve_location(actor, input.location.as_deref())?;

        let profit = PricingService::validate_acquisition(
            actor.role,
            AcquisitionPath::Create,
            &AcquisitionInput {
                year: input.year,
                mileage: input.mileage,
                cost: input.cost,
                sale_price: input.sale_price,
            },
            Local::now().year(),
        )?;

        let txn = self.db.begin().await?;
        let model = Self::insert_vehicle(&txn, &input, location, profit).await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Applies a batch of validated import rows.
    ///
    /// Every row runs in its own transaction; a rejected row is recorded
    /// with its reason and never blocks its siblings. The import path
    /// carries its own profit floor dispatch (Admin 5%, everyone else
    /// 35%).
    pub async fn import(
        &self,
        actor: &Actor,
        rows: Vec<NewVehicle>,
    ) -> Result<ImportOutcome, InventoryError> {
        if !role_allowed(actor, &[Role::Admin, Role::BuyerRep]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }

        let mut outcome = ImportOutcome::default();
        for (index, row) in rows.into_iter().enumerate() {
            match self.import_row(actor, row).await {
                Ok(()) => outcome.imported += 1,
                Err(err) => outcome.errors.push(ImportRowError {
                    row: index + 1,
                    reason: err.to_string(),
                }),
            }
        }
        Ok(outcome)
    }

    async fn import_row(&self, actor: &Actor, input: NewVehicle) -> Result<(), InventoryError> {
        let Some(location) = input.location.clone() else {
            return Err(InventoryError::Validation(
                "Location is required for import rows".into(),
            ));
        };
        if actor.role == Role::BuyerRep && location != actor.location {
            return Err(InventoryError::Validation(format!(
                "location '{location}' does not match buyer rep location '{}'",
                actor.location
            )));
        }

        let profit = PricingService::validate_acquisition(
            actor.role,
            AcquisitionPath::Import,
            &AcquisitionInput {
                year: input.year,
                mileage: input.mileage,
                cost: input.cost,
                sale_price: input.sale_price,
            },
            Local::now().year(),
        )?;

        let txn = self.db.begin().await?;
        Self::insert_vehicle(&txn, &input, location, profit).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn insert_vehicle(
        txn: &DatabaseTransaction,
        input: &NewVehicle,
        location: String,
        profit: Decimal,
    ) -> Result<inventory::Model, InventoryError> {
        let now = Local::now().fixed_offset();
        let status = VehicleStatus::initial_for(input.condition);

        let vehicle = inventory::ActiveModel {
            vin_number: Set(input.vin_number.clone().unwrap_or_default()),
            make: Set(input.make.clone()),
            model: Set(input.model.clone()),
            year: Set(input.year),
            mileage: Set(input.mileage),
            condition_type: Set(input.condition.into()),
            cost: Set(input.cost),
            sale_price: Set(input.sale_price),
            profit_percent: Set(profit.round_dp(2)),
            status: Set(status.into()),
            location: Set(location),
            pr_update_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let mut vehicle = vehicle.insert(txn).await?;

        // A caller-supplied VIN is honored; otherwise derive one from the
        // creation date and the row's own sequence.
        if input.vin_number.is_none() {
            let generated = ids::daily_record_id(now.date_naive(), vehicle.id);
            let mut update: inventory::ActiveModel = vehicle.into();
            update.vin_number = Set(generated);
            vehicle = update.update(txn).await?;
        }

        if input.condition == VehicleCondition::Damaged {
            Self::open_service_record(txn, &vehicle.vin_number).await?;
        }

        Ok(vehicle)
    }

    /// Opens the automatic workshop record for a damaged vehicle, unless
    /// one is already active.
    async fn open_service_record(
        txn: &DatabaseTransaction,
        vin_number: &str,
    ) -> Result<(), InventoryError> {
        let active = service_records::Entity::find()
            .filter(service_records::Column::VinNumber.eq(vin_number))
            .filter(service_records::Column::Status.eq(DbServiceStatus::InService))
            .one(txn)
            .await?;
        if active.is_some() {
            return Ok(());
        }

        let now = Local::now().fixed_offset();
        let record = service_records::ActiveModel {
            service_id: Set(String::new()),
            vin_number: Set(vin_number.to_string()),
            seriousness_level: Set(Seriousness::High.into()),
            estimated_days: Set(Seriousness::High.default_days()),
            cost_added: Set(Seriousness::High.default_cost()),
            status: Set(DbServiceStatus::InService),
            created_at: Set(now),
            ..Default::default()
        };
        let record = record.insert(txn).await?;

        let mut update: service_records::ActiveModel = record.clone().into();
        update.service_id = Set(ids::daily_record_id(now.date_naive(), record.id));
        update.update(txn).await?;
        Ok(())
    }

    /// Updates one or more properties of a vehicle.
    ///
    /// BuyerRep may only touch vehicles on their own lot. The full rule
    /// set re-validates against the updated values; switching the
    /// condition to Damaged re-enters the workshop.
    pub async fn update(
        &self,
        actor: &Actor,
        vin_number: &str,
        changes: VehicleChanges,
    ) -> Result<inventory::Model, InventoryError> {
        if !role_allowed(actor, &[Role::Admin, Role::BuyerRep]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }

        let txn = self.db.begin().await?;
        vin_lock::acquire(&txn, vin_number).await?;

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(vin_number))
            .one(&txn)
            .await?
            .ok_or_else(|| InventoryError::NotFound(vin_number.to_string()))?;

        if !actor.can_access_location(&vehicle.location) {
            return Err(InventoryError::PermissionDenied(format!(
                "location {}",
                vehicle.location
            )));
        }

        let year = changes.year.unwrap_or(vehicle.year);
        let mileage = changes.mileage.unwrap_or(vehicle.mileage);
        let cost = changes.cost.unwrap_or(vehicle.cost);
        let sale_price = changes.sale_price.unwrap_or(vehicle.sale_price);
        let condition = changes
            .condition
            .unwrap_or_else(|| vehicle.condition_type.into());

        let profit = PricingService::validate_acquisition(
            actor.role,
            AcquisitionPath::Update,
            &AcquisitionInput {
                year,
                mileage,
                cost,
                sale_price,
            },
            Local::now().year(),
        )?;

        let vin = vehicle.vin_number.clone();
        let mut update: inventory::ActiveModel = vehicle.into();
        if let Some(make) = changes.make {
            update.make = Set(make);
        }
        if let Some(model) = changes.model {
            update.model = Set(model);
        }
        if let Some(location) = changes.location {
            update.location = Set(location);
        }
        update.year = Set(year);
        update.mileage = Set(mileage);
        update.cost = Set(cost);
        update.sale_price = Set(sale_price);
        update.condition_type = Set(condition.into());
        update.profit_percent = Set(profit.round_dp(2));
        update.updated_at = Set(Local::now().fixed_offset());

        if condition == VehicleCondition::Damaged {
            update.status = Set(DbVehicleStatus::InService);
        }

        let vehicle = update.update(&txn).await?;
        if condition == VehicleCondition::Damaged {
            Self::open_service_record(&txn, &vin).await?;
        }

        txn.commit().await?;
        Ok(vehicle)
    }

    /// Lists vehicles visible to the actor.
    ///
    /// Privileged roles see every lot; everyone else only their own.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<inventory::Model>, InventoryError> {
        if !role_allowed(actor, &[Role::Admin, Role::BuyerRep]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }

        let mut query = inventory::Entity::find();
        if !actor.role.is_privileged() {
            query = query.filter(inventory::Column::Location.eq(actor.location.clone()));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Searches sellable stock with equality and range filters.
    ///
    /// Sold vehicles are excluded; SalesRep results are scoped to the
    /// rep's own lot. Results come newest model year first.
    pub async fn search(
        &self,
        actor: &Actor,
        filter: &VehicleFilter,
    ) -> Result<Vec<inventory::Model>, InventoryError> {
        if !role_allowed(actor, &[Role::Admin, Role::SalesRep]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }

        let mut query =
            inventory::Entity::find().filter(inventory::Column::Status.ne(DbVehicleStatus::Sold));

        if !actor.role.is_privileged() {
            query = query.filter(inventory::Column::Location.eq(actor.location.clone()));
        }

        if let Some(vin) = &filter.vin_number {
            query = query.filter(inventory::Column::VinNumber.contains(vin));
        }
        if let Some(make) = &filter.make {
            query = query.filter(inventory::Column::Make.contains(make));
        }
        if let Some(model) = &filter.model {
            query = query.filter(inventory::Column::Model.contains(model));
        }
        if let Some(condition) = filter.condition {
            query = query.filter(inventory::Column::ConditionType.eq(
                crate::entities::sea_orm_active_enums::VehicleCondition::from(condition),
            ));
        }
        if let Some(year_min) = filter.year_min {
            query = query.filter(inventory::Column::Year.gte(year_min));
        }
        if let Some(year_max) = filter.year_max {
            query = query.filter(inventory::Column::Year.lte(year_max));
        }
        if let Some(mileage_min) = filter.mileage_min {
            query = query.filter(inventory::Column::Mileage.gte(mileage_min));
        }
        if let Some(mileage_max) = filter.mileage_max {
            query = query.filter(inventory::Column::Mileage.lte(mileage_max));
        }
        if let Some(price_min) = filter.price_min {
            query = query.filter(inventory::Column::SalePrice.gte(price_min));
        }
        if let Some(price_max) = filter.price_max {
            query = query.filter(inventory::Column::SalePrice.lte(price_max));
        }

        Ok(query
            .order_by_desc(inventory::Column::Year)
            .all(&self.db)
            .await?)
    }

    /// Fetches one vehicle by VIN, subject to location scoping.
    pub async fn get(
        &self,
        actor: &Actor,
        vin_number: &str,
    ) -> Result<inventory::Model, InventoryError> {
        if !role_allowed(actor, &[Role::Admin, Role::SalesRep, Role::BuyerRep]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(vin_number))
            .one(&self.db)
            .await?
            .ok_or_else(|| InventoryError::NotFound(vin_number.to_string()))?;

        if !actor.can_access_location(&vehicle.location) {
            return Err(InventoryError::PermissionDenied(format!(
                "location {}",
                vehicle.location
            )));
        }
        Ok(vehicle)
    }

    /// Administrative removal of a vehicle.
    pub async fn delete(&self, actor: &Actor, vin_number: &str) -> Result<(), InventoryError> {
        if !role_allowed(actor, &[Role::Admin]) {
            return Err(InventoryError::PermissionDenied(actor.role.to_string()));
        }

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(vin_number))
            .one(&self.db)
            .await?
            .ok_or_else(|| InventoryError::NotFound(vin_number.to_string()))?;

        inventory::Entity::delete_by_id(vehicle.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    fn resolve_location(
        actor: &Actor,
        requested: Option<&str>,
    ) -> Result<String, InventoryError> {
        if actor.role == Role::BuyerRep {
            // BuyerRep always acquires into their own lot.
            return Ok(actor.location.clone());
        }
        requested.map(str::to_string).ok_or_else(|| {
            InventoryError::Validation("Location is required".into())
        })
    }
}
