//! Shared types, errors, and configuration for Lotworks.
//!
//! This crate provides common types used across all other crates:
//! - The resolved staff identity (`Actor`) and role model
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{Actor, Role};
