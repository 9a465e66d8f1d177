//! Daily consistency sweeps.
//!
//! Three independent loops keep Inventory, Sales, and Finance mutually
//! consistent without a central transaction log:
//!
//! - nightly service completion (default 21:00)
//! - morning stalled-negotiation cleanup (default 09:00)
//! - daily finance snapshot refresh (default 09:00)
//!
//! Each runner is a zero-argument entry point invokable both by the
//! scheduler and ad hoc (manual re-trigger, tests). A runner opens its
//! storage session for the duration of the run, processes candidates
//! independently, and reports per-item failures without aborting.

pub mod schedule;

use lotworks_db::repositories::SweepOutcome;
use lotworks_db::{FinanceRepository, SaleRepository, ServicingRepository};
use lotworks_shared::config::SchedulerConfig;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

/// Nightly sweep: completes every workshop record whose estimated repair
/// window has elapsed.
pub async fn run_service_completion(db: &DatabaseConnection) -> Option<SweepOutcome> {
    match ServicingRepository::new(db.clone()).complete_due().await {
        Ok(outcome) => {
            report("service completion", &outcome);
            Some(outcome)
        }
        Err(err) => {
            error!(error = %err, "service completion sweep failed to run");
            None
        }
    }
}

/// Morning sweep: abandons negotiations stalled in Under Writing and
/// returns their vehicles to the lot.
pub async fn run_negotiation_cleanup(db: &DatabaseConnection) -> Option<SweepOutcome> {
    match SaleRepository::new(db.clone()).release_stalled().await {
        Ok(outcome) => {
            report("negotiation cleanup", &outcome);
            Some(outcome)
        }
        Err(err) => {
            error!(error = %err, "negotiation cleanup sweep failed to run");
            None
        }
    }
}

/// Daily sweep: rebuilds the finance snapshot from Sales + Inventory.
pub async fn run_finance_refresh(db: &DatabaseConnection) -> bool {
    match FinanceRepository::new(db.clone()).rebuild_snapshot().await {
        Ok(()) => {
            info!("finance snapshot rebuilt");
            true
        }
        Err(err) => {
            error!(error = %err, "finance snapshot rebuild failed");
            false
        }
    }
}

fn report(sweep: &str, outcome: &SweepOutcome) {
    if outcome.is_clean() {
        info!(sweep, processed = outcome.processed, "sweep finished");
    } else {
        warn!(
            sweep,
            processed = outcome.processed,
            failed = outcome.failures.len(),
            "sweep finished with failures"
        );
    }
}

/// Spawns the three daily scheduler loops onto the current runtime.
///
/// Each loop owns a clone of the connection pool and runs until the
/// process exits; there is no drain on shutdown beyond the pool itself.
pub fn spawn_schedulers(db: DatabaseConnection, config: &SchedulerConfig) {
    let service_db = db.clone();
    tokio::spawn(schedule::run_daily(
        "service-completion",
        config.service_completion,
        move || {
            let db = service_db.clone();
            async move {
                run_service_completion(&db).await;
            }
        },
    ));

    let cleanup_db = db.clone();
    tokio::spawn(schedule::run_daily(
        "negotiation-cleanup",
        config.negotiation_cleanup,
        move || {
            let db = cleanup_db.clone();
            async move {
                run_negotiation_cleanup(&db).await;
            }
        },
    ));

    tokio::spawn(schedule::run_daily(
        "finance-refresh",
        config.finance_refresh,
        move || {
            let db = db.clone();
            async move {
                run_finance_refresh(&db).await;
            }
        },
    ));
}
