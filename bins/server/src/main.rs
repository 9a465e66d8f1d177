//! Lotworks service
//!
//! Main entry point for the Lotworks backend service: loads
//! configuration, connects to the database, and keeps the three daily
//! consistency sweeps running until the process is stopped.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lotworks_jobs::spawn_schedulers;
use lotworks_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lotworks=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = lotworks_db::connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    // Start the three daily sweeps
    let scheduler = &config.scheduler;
    spawn_schedulers(db, scheduler);
    info!(
        service_completion = %clock(scheduler.service_completion),
        negotiation_cleanup = %clock(scheduler.negotiation_cleanup),
        finance_refresh = %clock(scheduler.finance_refresh),
        "Schedulers running"
    );

    // The sweeps are not cancellable; shutdown terminates them abruptly.
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}

fn clock(time: lotworks_shared::config::JobTime) -> String {
    format!("{:02}:{:02}", time.hour, time.minute)
}
