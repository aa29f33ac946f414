//! Business logic services for the Shopstock backend

pub mod auth;
pub mod batch;
pub mod order;
pub mod product;
pub mod reporting;
pub mod review;
pub mod supplier;

pub use auth::AuthService;
pub use batch::BatchService;
pub use order::OrderService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use review::ReviewService;
pub use supplier::SupplierService;
