//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Business rules themselves live in `lotworks-core`; the
//! repositories apply them and own the transactions.

pub mod finance;
pub mod inventory;
pub mod promotion;
pub mod sale;
pub mod servicing;

#[cfg(test)]
mod finance_tests;

pub use finance::{FinanceError, FinanceRepository};
pub use inventory::{
    ImportOutcome, ImportRowError, InventoryError, InventoryRepository, NewVehicle, VehicleChanges,
    VehicleFilter,
};
pub use promotion::{PromotionError, PromotionOutcome, PromotionPriceUpdate, PromotionRepository};
pub use sale::{NegotiationError, SaleRepository};
pub use servicing::{ServiceChanges, ServiceEntry, ServicingError, ServicingRepository};

use lotworks_shared::{Actor, Role};

/// Failure of one candidate inside a sweep.
#[derive(Debug, Clone)]
pub struct SweepFailure {
    /// Business id of the record that failed.
    pub record_id: String,
    /// VIN the record points at.
    pub vin_number: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Result of one sweep run.
///
/// A sweep processes every candidate independently; a failure is recorded
/// here and the sweep moves on, so one broken record never starves the
/// rest.
#[derive(Debug, Clone, Default)]
pub struct SweepOutcome {
    /// Records successfully processed.
    pub processed: u64,
    /// Records skipped with their reasons.
    pub failures: Vec<SweepFailure>,
}

impl SweepOutcome {
    /// Returns true if every candidate was processed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Returns true if the actor's role is one of `allowed`.
pub(crate) fn role_allowed(actor: &Actor, allowed: &[Role]) -> bool {
    allowed.contains(&actor.role)
}
