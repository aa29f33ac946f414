//! Route definitions for the Shopstock backend
//!
//! Storefront reads and reporting are public; everything that mutates the
//! catalog, batches, or orders sits behind the JWT middleware. Reviews are
//! readable by anyone but posted by authenticated users.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(public_routes()).merge(protected_routes())
}

/// Public routes: health, auth, reporting, and storefront reads
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Auth
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/reset-password", post(handlers::reset_password))
        .route("/auth/change-password", post(handlers::change_password))
        // Reporting
        .route("/top-selling-products", get(handlers::top_selling_products))
        .route("/reports/stock-turnover", get(handlers::stock_turnover))
        .route("/reports/profit-analysis", get(handlers::profit_analysis))
        .route("/reports/export/csv", get(handlers::export_csv))
        .route("/reports/export/pdf", get(handlers::export_pdf))
        // Batch reads
        .route("/batches", get(handlers::list_batches))
        .route("/batches/aging-report/", get(handlers::aging_report))
        .route("/batches/expiring-soon/", get(handlers::expiring_soon))
        .route("/batches/:product_id", get(handlers::batches_for_product))
        .route(
            "/batches/products/:batch_number",
            get(handlers::products_by_batch_number),
        )
        // Catalog reads
        .route("/products", get(handlers::list_products))
        .route("/products/low-stock", get(handlers::low_stock_products))
        .route("/products/:product_id", get(handlers::get_product))
        .route("/products/:product_id/reviews", get(handlers::list_reviews))
        // Supplier reads
        .route("/suppliers", get(handlers::list_suppliers))
        .route("/suppliers/:supplier_id", get(handlers::get_supplier))
}

/// Protected routes: every mutation behind JWT auth
fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/batches", post(handlers::create_batch))
        .route("/batches/:batch_id/sold-out", post(handlers::mark_sold_out))
        .route("/products", post(handlers::create_product))
        .route(
            "/products/:product_id/reviews",
            post(handlers::create_review),
        )
        .route("/suppliers", post(handlers::create_supplier))
        .route("/orders", post(handlers::record_sale))
        .route_layer(middleware::from_fn(auth_middleware))
}
