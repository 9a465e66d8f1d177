//! Sale repository: negotiation upsert and the stalled-negotiation sweep.

use chrono::{Duration, Local};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::warn;

use lotworks_core::ids;
use lotworks_core::loan;
use lotworks_core::pricing::{PricingError, PricingService};
use lotworks_core::sales::{ActiveSale, NegotiationRequest, NegotiationService, SaleError, SaleStatus};
use lotworks_shared::{Actor, AppError, Role};

use crate::entities::sea_orm_active_enums::{
    SaleStatus as DbSaleStatus, VehicleStatus as DbVehicleStatus,
};
use crate::entities::{inventory, sales};
use crate::vin_lock;

use super::{SweepFailure, SweepOutcome, role_allowed};

/// How long a sale may sit in Under Writing before the morning sweep
/// abandons it.
const STALLED_AFTER_DAYS: i64 = 3;

/// Error types for sale operations.
#[derive(Debug, thiserror::Error)]
pub enum NegotiationError {
    /// Role or location does not allow the operation.
    #[error("Not enough permissions: {0}")]
    PermissionDenied(String),

    /// No vehicle with the given VIN.
    #[error("Car not found in inventory: {0}")]
    NotFound(String),

    /// Pricing rule rejection.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// State machine rejection.
    #[error(transparent)]
    Sale(#[from] SaleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<NegotiationError> for AppError {
    fn from(err: NegotiationError) -> Self {
        match err {
            NegotiationError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            NegotiationError::NotFound(msg) => Self::NotFound(msg),
            NegotiationError::Pricing(inner) => inner.into(),
            NegotiationError::Sale(inner) => inner.into(),
            NegotiationError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Sale repository.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    db: DatabaseConnection,
}

impl SaleRepository {
    /// Creates a new sale repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the first sale record for a VIN or advances the active one.
    ///
    /// The whole step runs in one transaction under the per-VIN advisory
    /// lock: pricing validation, the state machine, the sale row write,
    /// and the inventory status side effect either all land or none do.
    /// Status-entry timestamps are stamped the first time each status is
    /// reached and never overwritten.
    pub async fn upsert_negotiation(
        &self,
        actor: &Actor,
        request: NegotiationRequest,
    ) -> Result<sales::Model, NegotiationError> {
        if !role_allowed(actor, &[Role::Admin, Role::Finance, Role::SalesRep]) {
            return Err(NegotiationError::PermissionDenied(actor.role.to_string()));
        }

        let txn = self.db.begin().await?;
        vin_lock::acquire(&txn, &request.vin_number).await?;

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(request.vin_number.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| NegotiationError::NotFound(request.vin_number.clone()))?;

        if !actor.can_access_location(&vehicle.location) {
            return Err(NegotiationError::PermissionDenied(format!(
                "location {}",
                vehicle.location
            )));
        }

        PricingService::validate_sale_price(
            actor.role,
            vehicle.cost,
            vehicle.sale_price,
            request.sale_price,
        )?;

        let active = sales::Entity::find()
            .filter(sales::Column::VinNumber.eq(request.vin_number.clone()))
            .filter(sales::Column::Status.ne(DbSaleStatus::Sold))
            .one(&txn)
            .await?;
        let existing = active.as_ref().map(|sale| ActiveSale {
            status: sale.status.into(),
            monthly_payment: sale.monthly_payment,
        });

        let outcome = NegotiationService::resolve(&request, existing.as_ref(), |band| {
            loan::random_rate(band, &mut rand::rng())
        })?;

        let now = Local::now().fixed_offset();
        let model = match active {
            None => {
                let sale = sales::ActiveModel {
                    sale_id: Set(String::new()),
                    vin_number: Set(request.vin_number.clone()),
                    sale_price: Set(request.sale_price),
                    status: Set(request.status.into()),
                    payment_method: Set(request.payment_method.into()),
                    deposit: Set(outcome.deposit),
                    interest_rate: Set(outcome.interest_rate),
                    credit_band: Set(outcome.credit_band.map(Into::into)),
                    term_months: Set(outcome.term_months),
                    monthly_payment: Set(outcome.monthly_payment),
                    created_at: Set(now),
                    updated_at: Set(now),
                    status_under_contract_at: Set(
                        (request.status == SaleStatus::UnderContract).then_some(now)
                    ),
                    status_under_writing_at: Set(
                        (request.status == SaleStatus::UnderWriting).then_some(now)
                    ),
                    status_sold_at: Set((request.status == SaleStatus::Sold).then_some(now)),
                    ..Default::default()
                };
                let sale = sale.insert(&txn).await?;

                let mut update: sales::ActiveModel = sale.clone().into();
                update.sale_id = Set(ids::daily_record_id(now.date_naive(), sale.id));
                update.update(&txn).await?
            }
            Some(sale) => {
                let stamp_contract = sale.status_under_contract_at;
                let stamp_writing = sale.status_under_writing_at;
                let stamp_sold = sale.status_sold_at;

                let mut update: sales::ActiveModel = sale.into();
                update.sale_price = Set(request.sale_price);
                update.status = Set(request.status.into());
                update.payment_method = Set(request.payment_method.into());
                update.deposit = Set(outcome.deposit);
                update.interest_rate = Set(outcome.interest_rate);
                update.credit_band = Set(outcome.credit_band.map(Into::into));
                update.term_months = Set(outcome.term_months);
                update.monthly_payment = Set(outcome.monthly_payment);
                update.updated_at = Set(now);

                match request.status {
                    SaleStatus::UnderContract if stamp_contract.is_none() => {
                        update.status_under_contract_at = Set(Some(now));
                    }
                    SaleStatus::UnderWriting if stamp_writing.is_none() => {
                        update.status_under_writing_at = Set(Some(now));
                    }
                    SaleStatus::Sold if stamp_sold.is_none() => {
                        update.status_sold_at = Set(Some(now));
                    }
                    _ => {}
                }

                update.update(&txn).await?
            }
        };

        if let Some(status) = outcome.inventory_status {
            let mut update: inventory::ActiveModel = vehicle.into();
            update.status = Set(status.into());
            update.updated_at = Set(now);
            update.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(model)
    }

    /// Lists sale records with their vehicles.
    ///
    /// SalesRep results are scoped to sales of vehicles on the rep's lot.
    pub async fn list(
        &self,
        actor: &Actor,
    ) -> Result<Vec<(sales::Model, Option<inventory::Model>)>, NegotiationError> {
        if !role_allowed(actor, &[Role::Admin, Role::Finance, Role::SalesRep]) {
            return Err(NegotiationError::PermissionDenied(actor.role.to_string()));
        }

        let mut query = sales::Entity::find().find_also_related(inventory::Entity);
        if !actor.role.is_privileged() {
            query = query.filter(inventory::Column::Location.eq(actor.location.clone()));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Morning sweep: abandons negotiations stalled in Under Writing.
    ///
    /// Every sale whose entry into Under Writing is more than three days
    /// old is deleted outright and its vehicle restored to Available.
    /// Candidates are processed independently; failures are reported and
    /// skipped.
    pub async fn release_stalled(&self) -> Result<SweepOutcome, NegotiationError> {
        let cutoff = Local::now().fixed_offset() - Duration::days(STALLED_AFTER_DAYS);

        let stalled = sales::Entity::find()
            .filter(sales::Column::Status.eq(DbSaleStatus::UnderWriting))
            .filter(sales::Column::StatusUnderWritingAt.is_not_null())
            .filter(sales::Column::StatusUnderWritingAt.lt(cutoff))
            .all(&self.db)
            .await?;

        let mut outcome = SweepOutcome::default();
        for sale in stalled {
            match self.release_one(&sale).await {
                Ok(()) => outcome.processed += 1,
                Err(err) => {
                    warn!(
                        sale_id = %sale.sale_id,
                        vin_number = %sale.vin_number,
                        error = %err,
                        "failed to release stalled negotiation"
                    );
                    outcome.failures.push(SweepFailure {
                        record_id: sale.sale_id.clone(),
                        vin_number: sale.vin_number.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(outcome)
    }

    async fn release_one(&self, sale: &sales::Model) -> Result<(), NegotiationError> {
        let txn = self.db.begin().await?;
        vin_lock::acquire(&txn, &sale.vin_number).await?;

        // Restore the vehicle when it still exists; the sale goes either way.
        if let Some(vehicle) = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(sale.vin_number.clone()))
            .one(&txn)
            .await?
        {
            let mut update: inventory::ActiveModel = vehicle.into();
            update.status = Set(DbVehicleStatus::Available);
            update.updated_at = Set(Local::now().fixed_offset());
            update.update(&txn).await?;
        }

        sales::Entity::delete_by_id(sale.id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}
