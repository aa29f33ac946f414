//! Shared types and computation core for the Shopstock platform
//!
//! This crate contains the domain models, the reporting aggregation
//! functions, and the batch lifecycle rules. It performs no I/O so the
//! backend can exercise every rule here without a database.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
