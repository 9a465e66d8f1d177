//! Vehicle condition and lifecycle status.

pub mod types;

pub use types::{VehicleCondition, VehicleStatus};
