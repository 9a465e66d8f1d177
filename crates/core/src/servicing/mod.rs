//! Repair seriousness levels and defaults.

pub mod types;

pub use types::{Seriousness, ServiceStatus};
