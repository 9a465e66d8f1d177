//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Scheduled sweep configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Local wall-clock time at which a daily sweep fires.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct JobTime {
    /// Hour of day (0-23).
    pub hour: u32,
    /// Minute of hour (0-59).
    pub minute: u32,
}

/// Scheduled sweep configuration.
///
/// Each sweep runs at most once per day at the configured local time;
/// runs missed while the process was down are not replayed.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Nightly service-completion sweep.
    #[serde(default = "default_service_completion")]
    pub service_completion: JobTime,
    /// Morning stalled-negotiation cleanup.
    #[serde(default = "default_negotiation_cleanup")]
    pub negotiation_cleanup: JobTime,
    /// Daily finance snapshot refresh.
    #[serde(default = "default_finance_refresh")]
    pub finance_refresh: JobTime,
}

fn default_service_completion() -> JobTime {
    JobTime {
        hour: 21,
        minute: 0,
    }
}

fn default_negotiation_cleanup() -> JobTime {
    JobTime { hour: 9, minute: 0 }
}

fn default_finance_refresh() -> JobTime {
    JobTime { hour: 9, minute: 0 }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            service_completion: default_service_completion(),
            negotiation_cleanup: default_negotiation_cleanup(),
            finance_refresh: default_finance_refresh(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LOTWORKS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
