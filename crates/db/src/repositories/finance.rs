//! Finance repository: the snapshot builder and its read surface.
//!
//! The finance table is a materialized view of Sales + Inventory. It is
//! never updated in place: every rebuild clears it and regenerates one
//! row per VIN inside a single transaction, so readers always see either
//! the previous snapshot or the complete new one.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use rust_decimal::Decimal;

use lotworks_core::finance::{FinanceService, FinanceSummary, LoanPosition, SoldRow, StockRow};
use lotworks_core::ids;
use lotworks_shared::{Actor, AppError, Role};

use crate::entities::sea_orm_active_enums::{
    SaleStatus as DbSaleStatus, VehicleStatus as DbVehicleStatus,
};
use crate::entities::{finance, inventory, sales};

use super::role_allowed;

/// Error types for finance operations.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    /// Role does not allow the operation.
    #[error("Not enough permissions: {0}")]
    PermissionDenied(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FinanceError> for AppError {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::PermissionDenied(msg) => Self::PermissionDenied(msg),
            FinanceError::Database(inner) => Self::Database(inner.to_string()),
        }
    }
}

/// Finance repository.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    db: DatabaseConnection,
}

impl FinanceRepository {
    /// Creates a new finance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rebuilds the snapshot from the current Sales and Inventory tables.
    ///
    /// Inside one transaction: clear the table, emit a row per sale
    /// (full figures for Sold deals, partial rows otherwise), then a
    /// partial row per unsold vehicle not already covered by a sale.
    /// Business ids derive from each inserted row's own sequence. If
    /// anything fails the transaction rolls back and the prior snapshot
    /// stays untouched.
    pub async fn rebuild_snapshot(&self) -> Result<(), FinanceError> {
        let txn = self.db.begin().await?;
        Self::rebuild_in(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Lists the current snapshot, newest rows first.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<finance::Model>, FinanceError> {
        if !role_allowed(actor, &[Role::Admin, Role::Finance]) {
            return Err(FinanceError::PermissionDenied(actor.role.to_string()));
        }

        Ok(finance::Entity::find()
            .order_by_desc(finance::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Aggregated metrics over unsold inventory and the sold snapshot
    /// rows.
    pub async fn summary(&self, actor: &Actor) -> Result<FinanceSummary, FinanceError> {
        if !role_allowed(actor, &[Role::Admin, Role::Finance]) {
            return Err(FinanceError::PermissionDenied(actor.role.to_string()));
        }

        let stock: Vec<StockRow> = inventory::Entity::find()
            .filter(inventory::Column::Status.ne(DbVehicleStatus::Sold))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|vehicle| StockRow {
                cost: vehicle.cost,
                sale_price: vehicle.sale_price,
            })
            .collect();

        let sold: Vec<SoldRow> = finance::Entity::find()
            .filter(finance::Column::Status.eq(DbVehicleStatus::Sold))
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|row| {
                row.payment_type.map(|payment_type| SoldRow {
                    cost: row.cost,
                    final_sale_price: row.final_sale_price,
                    tax: row.tax,
                    amount_paid: row.amount_paid,
                    payment_method: payment_type.into(),
                })
            })
            .collect();

        Ok(FinanceService::summarize(&stock, &sold))
    }

    /// Runs the rebuild against an externally managed transaction.
    ///
    /// Exposed for callers that need to compose the rebuild with other
    /// work; `rebuild_snapshot` is the normal entry point.
    pub async fn rebuild_in(txn: &DatabaseTransaction) -> Result<(), DbErr> {
        let today = Local::now().date_naive();

        finance::Entity::delete_many().exec(txn).await?;

        let sale_rows = sales::Entity::find().all(txn).await?;
        let mut covered_vins: HashSet<String> = HashSet::with_capacity(sale_rows.len());

        for sale in &sale_rows {
            covered_vins.insert(sale.vin_number.clone());

            // Cost comes from inventory; a removed vehicle counts as zero.
            let cost = inventory::Entity::find()
                .filter(inventory::Column::VinNumber.eq(sale.vin_number.clone()))
                .one(txn)
                .await?
                .map_or(Decimal::ZERO, |vehicle| vehicle.cost);

            let inserted = snapshot_row_from_sale(sale, cost, today).insert(txn).await?;
            let mut update: finance::ActiveModel = inserted.clone().into();
            update.finance_id = Set(ids::finance_sale_id(inserted.id));
            update.update(txn).await?;
        }

        let stock = inventory::Entity::find()
            .filter(inventory::Column::Status.ne(DbVehicleStatus::Sold))
            .all(txn)
            .await?;
        for vehicle in stock {
            if covered_vins.contains(&vehicle.vin_number) {
                continue;
            }
            let inserted = snapshot_row_from_stock(&vehicle).insert(txn).await?;
            let mut update: finance::ActiveModel = inserted.clone().into();
            update.finance_id = Set(ids::finance_stock_id(inserted.id));
            update.update(txn).await?;
        }

        Ok(())
    }
}

/// Assembles the snapshot row for one sale record.
///
/// Sold deals carry the full figure set; everything else is a partial
/// row where only VIN, cost, sale price, and status carry meaning.
pub(crate) fn snapshot_row_from_sale(
    sale: &sales::Model,
    cost: Decimal,
    today: NaiveDate,
) -> finance::ActiveModel {
    let now = Local::now().fixed_offset();
    let sale_date = sale
        .status_sold_at
        .map_or_else(|| sale.updated_at.date_naive(), |at| at.date_naive());

    if sale.status == DbSaleStatus::Sold {
        let position = match (sale.term_months, sale.monthly_payment) {
            (Some(term_months), Some(monthly_payment)) => Some(LoanPosition {
                term_months,
                monthly_payment,
            }),
            _ => None,
        };
        let figures = FinanceService::sold_figures(
            sale.sale_price,
            sale.payment_method.into(),
            position.as_ref(),
            cost,
            sale_date,
            today,
        );

        finance::ActiveModel {
            finance_id: Set(String::new()),
            sale_id: Set(Some(sale.sale_id.clone())),
            vin_number: Set(sale.vin_number.clone()),
            cost: Set(cost),
            sale_price: Set(sale.sale_price),
            status: Set(DbVehicleStatus::Sold),
            payment_type: Set(Some(sale.payment_method)),
            deposit: Set(sale.deposit.unwrap_or(Decimal::ZERO)),
            loan_term: Set(sale.term_months),
            loan_interest: Set(sale.interest_rate),
            monthly_payment: Set(sale.monthly_payment),
            cc_fee: Set(figures.cc_fee),
            tax: Set(figures.tax),
            final_sale_price: Set(figures.final_sale_price),
            amount_paid: Set(figures.amount_paid),
            amount_remaining: Set(figures.amount_remaining),
            net_profit: Set(figures.net_profit),
            profit_now: Set(figures.profit_now),
            sale_date: Set(Some(sale_date)),
            created_at: Set(now),
            ..Default::default()
        }
    } else {
        finance::ActiveModel {
            finance_id: Set(String::new()),
            sale_id: Set(Some(sale.sale_id.clone())),
            vin_number: Set(sale.vin_number.clone()),
            cost: Set(cost),
            sale_price: Set(sale.sale_price),
            status: Set(sale.status.into()),
            payment_type: Set(None),
            deposit: Set(Decimal::ZERO),
            loan_term: Set(None),
            loan_interest: Set(None),
            monthly_payment: Set(None),
            cc_fee: Set(Decimal::ZERO),
            tax: Set(Decimal::ZERO),
            final_sale_price: Set(Decimal::ZERO),
            amount_paid: Set(Decimal::ZERO),
            amount_remaining: Set(Decimal::ZERO),
            net_profit: Set(Decimal::ZERO),
            profit_now: Set(Decimal::ZERO),
            sale_date: Set(None),
            created_at: Set(now),
            ..Default::default()
        }
    }
}

/// Assembles the partial snapshot row for an unsold vehicle with no sale.
pub(crate) fn snapshot_row_from_stock(vehicle: &inventory::Model) -> finance::ActiveModel {
    finance::ActiveModel {
        finance_id: Set(String::new()),
        sale_id: Set(None),
        vin_number: Set(vehicle.vin_number.clone()),
        cost: Set(vehicle.cost),
        sale_price: Set(vehicle.sale_price),
        status: Set(vehicle.status),
        payment_type: Set(None),
        deposit: Set(Decimal::ZERO),
        loan_term: Set(None),
        loan_interest: Set(None),
        monthly_payment: Set(None),
        cc_fee: Set(Decimal::ZERO),
        tax: Set(Decimal::ZERO),
        final_sale_price: Set(Decimal::ZERO),
        amount_paid: Set(Decimal::ZERO),
        amount_remaining: Set(Decimal::ZERO),
        net_profit: Set(Decimal::ZERO),
        profit_now: Set(Decimal::ZERO),
        sale_date: Set(None),
        created_at: Set(Local::now().fixed_offset()),
        ..Default::default()
    }
}
