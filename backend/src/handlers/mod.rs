//! HTTP request handlers for the Shopstock backend

pub mod auth;
pub mod batches;
pub mod health;
pub mod orders;
pub mod products;
pub mod reporting;
pub mod reviews;
pub mod suppliers;

/// Evaluation date for derived batch status and expiry windows. The clock
/// enters here; services take the date as a parameter.
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

pub use auth::*;
pub use batches::*;
pub use health::*;
pub use orders::*;
pub use products::*;
pub use reporting::*;
pub use reviews::*;
pub use suppliers::*;
