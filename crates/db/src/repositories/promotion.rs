//! Promotion repository: role-quota'd price updates on sellable stock.

use std::collections::BTreeMap;

use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use lotworks_core::pricing::{PROMOTION_UPDATE_QUOTA, PriceChange, PricingError, PricingService};
use lotworks_shared::{Actor, AppError, Role};

use crate::entities::inventory;
use crate::entities::sea_orm_active_enums::VehicleStatus as DbVehicleStatus;
use crate::vin_lock;

use super::role_allowed;

/// Error types for promotion operations.
#[derive(Debug, thiserror::Error)]
pub enum PromotionError {
    /// Role or location does not allow the operation.
    #[error("Not enough permissions: {0}")]
    PermissionDenied(String),

    /// No vehicle with the given VIN.
    #[error("Car not found for given VIN: {0}")]
    NotFound(String),

    /// Pricing rule rejection.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<PromotionError> for AppError {
    fn from(err: PromotionError) -> Self {
        match err {
            PromotionError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            PromotionError::NotFound(msg) => Self::NotFound(msg),
            PromotionError::Pricing(inner) => inner.into(),
            PromotionError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// A promotion price-update request.
///
/// Exactly one of the three change fields must be supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionPriceUpdate {
    /// Vehicle to reprice.
    pub vin_number: String,
    /// Replace the price outright.
    pub sale_price: Option<Decimal>,
    /// Lower the price by a percentage.
    pub discount_percent: Option<Decimal>,
    /// Raise the price by a percentage.
    pub raise_percent: Option<Decimal>,
}

/// An applied promotion price change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionOutcome {
    /// Vehicle that was repriced.
    pub vin_number: String,
    /// The persisted price.
    pub new_sale_price: Decimal,
    /// The persisted profit percent.
    pub new_profit_percent: Decimal,
}

/// Promotion repository.
#[derive(Debug, Clone)]
pub struct PromotionRepository {
    db: DatabaseConnection,
}

impl PromotionRepository {
    /// Creates a new promotion repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns promotable stock grouped by lot.
    ///
    /// Vehicles under contract or sold are always hidden; workshop
    /// vehicles appear only when `include_service` is set (they remain
    /// ineligible for updates either way).
    pub async fn grouped_stock(
        &self,
        actor: &Actor,
        include_service: bool,
    ) -> Result<BTreeMap<String, Vec<inventory::Model>>, PromotionError> {
        if !role_allowed(actor, &[Role::Admin, Role::Pr]) {
            return Err(PromotionError::PermissionDenied(actor.role.to_string()));
        }

        let mut query = inventory::Entity::find().filter(
            inventory::Column::Status
                .is_not_in([DbVehicleStatus::UnderContract, DbVehicleStatus::Sold]),
        );
        if !include_service {
            query = query.filter(inventory::Column::Status.ne(DbVehicleStatus::InService));
        }

        let mut grouped: BTreeMap<String, Vec<inventory::Model>> = BTreeMap::new();
        for vehicle in query.all(&self.db).await? {
            grouped
                .entry(vehicle.location.clone())
                .or_default()
                .push(vehicle);
        }
        Ok(grouped)
    }

    /// Applies a promotion price change.
    ///
    /// The PR role is bound to its own lot and to the per-vehicle update
    /// quota; the quota is spent with an increment-if-below-limit UPDATE
    /// so two racing updates can never both consume the last slot.
    pub async fn update_price(
        &self,
        actor: &Actor,
        input: &PromotionPriceUpdate,
    ) -> Result<PromotionOutcome, PromotionError> {
        if !role_allowed(actor, &[Role::Admin, Role::Pr]) {
            return Err(PromotionError::PermissionDenied(actor.role.to_string()));
        }
        let change = PriceChange::from_options(
            input.sale_price,
            input.discount_percent,
            input.raise_percent,
        )?;

        let txn = self.db.begin().await?;
        vin_lock::acquire(&txn, &input.vin_number).await?;

        let vehicle = inventory::Entity::find()
            .filter(inventory::Column::VinNumber.eq(input.vin_number.clone()))
            .one(&txn)
            .await?
            .ok_or_else(|| PromotionError::NotFound(input.vin_number.clone()))?;

        if actor.role == Role::Pr && vehicle.location != actor.location {
            return Err(PromotionError::PermissionDenied(
                "VIN does not belong to your location".into(),
            ));
        }

        let decision = PricingService::promotion_decision(
            actor.role,
            vehicle.status.into(),
            vehicle.cost,
            vehicle.sale_price,
            change,
            vehicle.pr_update_count,
        )?;

        let now = Local::now().fixed_offset();
        if actor.role == Role::Pr {
            // Spend a quota slot atomically; zero rows means a racing
            // update exhausted the quota after our read.
            let result = inventory::Entity::update_many()
                .col_expr(inventory::Column::SalePrice, Expr::value(decision.new_price))
                .col_expr(
                    inventory::Column::ProfitPercent,
                    Expr::value(decision.profit_percent.round_dp(2)),
                )
                .col_expr(
                    inventory::Column::PrUpdateCount,
                    Expr::col(inventory::Column::PrUpdateCount).add(1),
                )
                .col_expr(inventory::Column::UpdatedAt, Expr::value(now))
                .filter(inventory::Column::Id.eq(vehicle.id))
                .filter(inventory::Column::PrUpdateCount.lt(PROMOTION_UPDATE_QUOTA))
                .exec(&txn)
                .await?;
            if result.rows_affected == 0 {
                return Err(PromotionError::Pricing(PricingError::UpdateQuotaExhausted));
            }
        } else {
            let mut update: inventory::ActiveModel = vehicle.into();
            update.sale_price = Set(decision.new_price);
            update.profit_percent = Set(decision.profit_percent.round_dp(2));
            update.updated_at = Set(now);
            update.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(PromotionOutcome {
            vin_number: input.vin_number.clone(),
            new_sale_price: decision.new_price,
            new_profit_percent: decision.profit_percent.round_dp(2),
        })
    }
}
