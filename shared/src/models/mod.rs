//! Domain models for the Shopstock platform

pub mod batch;
pub mod order;
pub mod product;
pub mod reporting;
pub mod review;
pub mod supplier;
pub mod user;

pub use batch::*;
pub use order::*;
pub use product::*;
pub use reporting::*;
pub use review::*;
pub use supplier::*;
pub use user::*;
