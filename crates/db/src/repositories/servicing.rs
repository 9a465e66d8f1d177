//! Servicing repository: workshop entries, updates, and completion.

use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::warn;

use lotworks_core::ids;
use lotworks_core::servicing::Seriousness;
use lotworks_shared::{Actor, AppError, Role};

use crate::entities::sea_orm_active_enums::{
    ServiceStatus as DbServiceStatus, VehicleStatus as DbVehicleStatus,
};
use crate::entities::{inventory, service_records};
use crate::vin_lock;

use super::{SweepFailure, SweepOutcome, role_allowed};

/// Error types for servicing operations.
#[derive(Debug, thiserror::Error)]
pub enum ServicingError {
    /// Role or location does not allow the operation.
    #[error("Not enough permissions: {0}")]
    PermissionDenied(String),

    /// Record or vehicle absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The vehicle already has an active workshop record.
    #[error("This car is already in service: {0}")]
    AlreadyInService(String),

    /// A service record points at a VIN with no inventory row.
    #[error("Inventory record missing for VIN {0}")]
    MissingInventory(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ServicingError> for AppError {
    fn from(err: ServicingError) -> Self {
        match err {
            ServicingError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            ServicingError::NotFound(msg) => Self::NotFound(msg),
            ServicingError::AlreadyInService(msg) => {
                Self::PolicyViolation(format!("This car is already in service: {msg}"))
            }
            ServicingError::MissingInventory(vin) => {
                Self::Consistency(format!("Inventory record missing for VIN {vin}"))
            }
            ServicingError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Input for opening a workshop entry.
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    /// Vehicle to service.
    pub vin_number: String,
    /// Seriousness level.
    pub seriousness: Seriousness,
    /// Estimated repair days; defaults by seriousness when absent.
    pub estimated_days: Option<i32>,
    /// Repair cost; defaults by seriousness when absent.
    pub cost_added: Option<Decimal>,
}

/// Input for updating a workshop entry.
#[derive(Debug, Clone, Default)]
pub struct ServiceChanges {
    /// New seriousness level.
    pub seriousness: Option<Seriousness>,
    /// New estimated repair days.
    pub estimated_days: Option<i32>,
    /// New repair start date.
    pub start_date: Option<NaiveDate>,
    /// New repair cost.
    pub cost_added: Option<Decimal>,
}

/// Servicing repository.
#[derive(Debug, Clone)]
pub struct ServicingRepository {
    db: DatabaseConnection,
}

impl ServicingRepository {
    /// Creates a new servicing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a workshop entry for a vehicle and moves it off the lot.
    ///
    /// At most one active record may exist per VIN; duplicates are
    /// rejected. Missing duration/cost fall back to the seriousness
    /// defaults.
    pub async fn create_entry(
        &self,
        actor: &Actor,
        input: ServiceEntry,
    ) -> Result<service_records::Model, ServicingError> {
        if !role_allowed(actor, &[Role::Admin, Role::ServiceRep]) {
            return Err(ServicingError::PermissionDenied(actor.role.to_string()));
        }

        let txn = self.db.begin().await?;
        vin_lock::acquire(&txn, &input.vin_number).await?;

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(input.vin_number.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| ServicingError::NotFound(input.vin_number.clone()))?;

        if !actor.can_access_location(&vehicle.location) {
            return Err(ServicingError::PermissionDenied(format!(
                "location {}",
                vehicle.location
            )));
        }

        let duplicate = service_records::Entity::find()
            .filter(service_records::Column::VinNumber.eq(input.vin_number.clone()))
            .filter(service_records::Column::Status.eq(DbServiceStatus::InService))
            .one(&txn)
            .await?;
        if duplicate.is_some() {
            return Err(ServicingError::AlreadyInService(input.vin_number.clone()));
        }

        let now = Local::now().fixed_offset();
        let record = service_records::ActiveModel {
            service_id: Set(String::new()),
            vin_number: Set(input.vin_number.clone()),
            seriousness_level: Set(input.seriousness.into()),
            estimated_days: Set(input
                .estimated_days
                .unwrap_or_else(|| input.seriousness.default_days())),
            cost_added: Set(input
                .cost_added
                .unwrap_or_else(|| input.seriousness.default_cost())),
            status: Set(DbServiceStatus::InService),
            created_at: Set(now),
            ..Default::default()
        };
        let record = record.insert(&txn).await?;

        let mut update: service_records::ActiveModel = record.clone().into();
        update.service_id = Set(ids::daily_record_id(now.date_naive(), record.id));
        let record = update.update(&txn).await?;

        let mut vehicle_update: inventory::ActiveModel = vehicle.into();
        vehicle_update.status = Set(DbVehicleStatus::InService);
        vehicle_update.updated_at = Set(now);
        vehicle_update.update(&txn).await?;

        txn.commit().await?;
        Ok(record)
    }

    /// Updates the workshop-managed fields of an entry.
    ///
    /// When the seriousness changes without an explicit new cost, the
    /// cost is recomputed from the seriousness default.
    pub async fn update_entry(
        &self,
        actor: &Actor,
        service_id: &str,
        changes: ServiceChanges,
    ) -> Result<service_records::Model, ServicingError> {
        if !role_allowed(actor, &[Role::Admin, Role::ServiceRep]) {
            return Err(ServicingError::PermissionDenied(actor.role.to_string()));
        }

        let txn = self.db.begin().await?;

        let record = service_records::Entity::find()
            .filter(service_records::Column::ServiceId.eq(service_id))
            .one(&txn)
            .await?
            .ok_or_else(|| ServicingError::NotFound(service_id.to_string()))?;

        vin_lock::acquire(&txn, &record.vin_number).await?;

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(record.vin_number.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| ServicingError::MissingInventory(record.vin_number.clone()))?;

        if !actor.can_access_location(&vehicle.location) {
            return Err(ServicingError::PermissionDenied(format!(
                "location {}",
                vehicle.location
            )));
        }

        let old_seriousness: Seriousness = record.seriousness_level.into();
        let old_cost = record.cost_added;
        let new_seriousness = changes.seriousness.unwrap_or(old_seriousness);
        let seriousness_changed = new_seriousness != old_seriousness;

        let mut update: service_records::ActiveModel = record.into();
        update.seriousness_level = Set(new_seriousness.into());
        if let Some(days) = changes.estimated_days {
            update.estimated_days = Set(days);
        }
        if let Some(start_date) = changes.start_date {
            // The entry date doubles as the repair start date.
            let start = start_date
                .and_hms_opt(0, 0, 0)
                .expect("midnight exists")
                .and_local_timezone(Local)
                .earliest()
                .map(|dt| dt.fixed_offset());
            if let Some(start) = start {
                update.created_at = Set(start);
            }
        }

        match changes.cost_added {
            Some(cost) if cost != old_cost => update.cost_added = Set(cost),
            _ if seriousness_changed => {
                update.cost_added = Set(new_seriousness.default_cost());
            }
            _ => {}
        }

        let record = update.update(&txn).await?;
        txn.commit().await?;
        Ok(record)
    }

    /// Manually completes a workshop entry.
    pub async fn complete(
        &self,
        actor: &Actor,
        service_id: &str,
    ) -> Result<service_records::Model, ServicingError> {
        if !role_allowed(actor, &[Role::ServiceRep]) {
            return Err(ServicingError::PermissionDenied(actor.role.to_string()));
        }

        let txn = self.db.begin().await?;

        let record = service_records::Entity::find()
            .filter(service_records::Column::ServiceId.eq(service_id))
            .filter(service_records::Column::Status.eq(DbServiceStatus::InService))
            .one(&txn)
            .await?
            .ok_or_else(|| ServicingError::NotFound(service_id.to_string()))?;

        vin_lock::acquire(&txn, &record.vin_number).await?;

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(record.vin_number.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| ServicingError::MissingInventory(record.vin_number.clone()))?;

        if !actor.can_access_location(&vehicle.location) {
            return Err(ServicingError::PermissionDenied(format!(
                "location {}",
                vehicle.location
            )));
        }

        let record = Self::complete_record(&txn, record, vehicle).await?;
        txn.commit().await?;
        Ok(record)
    }

    /// Rolls a finished repair back into inventory.
    ///
    /// The repair cost is added to the vehicle's cost, the vehicle
    /// returns to Available, and the record closes. Used by both manual
    /// completion and the nightly sweep.
    async fn complete_record(
        txn: &DatabaseTransaction,
        record: service_records::Model,
        vehicle: inventory::Model,
    ) -> Result<service_records::Model, ServicingError> {
        let now = Local::now().fixed_offset();

        let new_cost = vehicle.cost + record.cost_added;
        let mut vehicle_update: inventory::ActiveModel = vehicle.into();
        vehicle_update.cost = Set(new_cost);
        vehicle_update.status = Set(DbVehicleStatus::Available);
        vehicle_update.updated_at = Set(now);
        vehicle_update.update(txn).await?;

        let mut record_update: service_records::ActiveModel = record.into();
        record_update.status = Set(DbServiceStatus::Completed);
        let record = record_update.update(txn).await?;
        Ok(record)
    }

    /// Nightly sweep: completes every due repair.
    ///
    /// A record is due once its start date plus estimated days is on or
    /// before today. Candidates are processed independently; a record
    /// whose vehicle has gone missing is reported and skipped, and the
    /// sweep continues.
    pub async fn complete_due(&self) -> Result<SweepOutcome, ServicingError> {
        let today = Local::now().date_naive();

        let open_records = service_records::Entity::find()
            .filter(service_records::Column::Status.eq(DbServiceStatus::InService))
            .all(&self.db)
            .await?;

        let mut outcome = SweepOutcome::default();
        for record in open_records {
            if !due_for_completion(&record, today) {
                continue;
            }
            match self.complete_due_record(&record).await {
                Ok(()) => outcome.processed += 1,
                Err(err) => {
                    warn!(
                        service_id = %record.service_id,
                        vin_number = %record.vin_number,
                        error = %err,
                        "failed to complete due service record"
                    );
                    outcome.failures.push(SweepFailure {
                        record_id: record.service_id.clone(),
                        vin_number: record.vin_number.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(outcome)
    }

    async fn complete_due_record(
        &self,
        record: &service_records::Model,
    ) -> Result<(), ServicingError> {
        let txn = self.db.begin().await?;
        vin_lock::acquire(&txn, &record.vin_number).await?;

        // Re-read inside the transaction; the record may have been
        // completed manually since the sweep listed it.
        let Some(record) = service_records::Entity::find_by_id(record.id)
            .filter(service_records::Column::Status.eq(DbServiceStatus::InService))
            .one(&txn)
            .await?
        else {
            return Ok(());
        };

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(record.vin_number.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| ServicingError::MissingInventory(record.vin_number.clone()))?;

        Self::complete_record(&txn, record, vehicle).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Lists workshop records with their vehicles, scoped by location for
    /// non-privileged roles.
    pub async fn list(
        &self,
        actor: &Actor,
    ) -> Result<Vec<(service_records::Model, Option<inventory::Model>)>, ServicingError> {
        if !role_allowed(actor, &[Role::Admin, Role::ServiceRep]) {
            return Err(ServicingError::PermissionDenied(actor.role.to_string()));
        }

        let mut query = service_records::Entity::find().find_also_related(inventory::Entity);
        if !actor.role.is_privileged() {
            query = query.filter(inventory::Column::Location.eq(actor.location.clone()));
        }
        Ok(query.all(&self.db).await?)
    }
}

/// Returns true once the record's start date plus its estimated days has
/// passed.
fn due_for_completion(record: &service_records::Model, today: NaiveDate) -> bool {
    let start = record.created_at.date_naive();
    start + Duration::days(i64::from(record.estimated_days)) <= today
}
