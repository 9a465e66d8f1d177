//! Common types used across the application.

pub mod actor;

pub use actor::{Actor, Role};
