//! Role-scoped price and profit rules.
//!
//! Every price mutation in the system - acquisition, negotiation, and
//! promotion - passes through this module before anything is written.
//!
//! # Modules
//!
//! - `types` - Price-change requests and accepted decisions
//! - `error` - Rule rejections with specific reasons
//! - `service` - The validation functions themselves

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::PricingError;
pub use service::{PROMOTION_UPDATE_QUOTA, PricingService};
pub use types::{AcquisitionInput, AcquisitionPath, PriceChange, PriceDecision};
