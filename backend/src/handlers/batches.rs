//! Batch tracking HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::batch::CreateBatchInput;
use crate::services::BatchService;
use crate::AppState;
use shared::models::{Batch, Product};

use super::today;

#[derive(Debug, Deserialize)]
pub struct ExpiringSoonQuery {
    pub days: Option<u64>,
}

/// List all batches with their product names
pub async fn list_batches(State(state): State<AppState>) -> AppResult<Json<Vec<Batch>>> {
    let service = BatchService::new(state.db.clone());
    let batches = service.list_batches(today()).await?;
    Ok(Json(batches))
}

/// Receive a new batch of stock
pub async fn create_batch(
    State(state): State<AppState>,
    Json(input): Json<CreateBatchInput>,
) -> AppResult<(StatusCode, Json<Batch>)> {
    let service = BatchService::new(state.db.clone());
    let batch = service.create_batch(input, today()).await?;
    Ok((StatusCode::CREATED, Json(batch)))
}

/// Batches for one product. 404 only when the product id is unknown; an
/// existing product with no batches returns an empty list.
pub async fn batches_for_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<Batch>>> {
    let service = BatchService::new(state.db.clone());
    let batches = service.batches_for_product(product_id, today()).await?;
    Ok(Json(batches))
}

/// Batches expiring within the given window (default from configuration)
pub async fn expiring_soon(
    State(state): State<AppState>,
    Query(query): Query<ExpiringSoonQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let days = query
        .days
        .unwrap_or(state.config.reporting.expiring_soon_days);
    let service = BatchService::new(state.db.clone());
    let batches = service.batches_expiring_within(today(), days).await?;

    if batches.is_empty() {
        return Ok(Json(
            serde_json::json!({ "message": "No batches expiring soon" }),
        ));
    }
    Ok(Json(serde_json::json!({ "expiring_batches": batches })))
}

/// All batches ordered by expiration date, non-perishable batches last
pub async fn aging_report(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    let service = BatchService::new(state.db.clone());
    let batches = service.aging_report(today()).await?;
    Ok(Json(serde_json::json!({ "aging_report": batches })))
}

/// Persist the terminal Sold Out transition for an Active batch
pub async fn mark_sold_out(
    State(state): State<AppState>,
    Path(batch_id): Path<Uuid>,
) -> AppResult<Json<Batch>> {
    let service = BatchService::new(state.db.clone());
    let batch = service.mark_sold_out(batch_id, today()).await?;
    Ok(Json(batch))
}

/// Products that arrived under the given batch number
pub async fn products_by_batch_number(
    State(state): State<AppState>,
    Path(batch_number): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let service = BatchService::new(state.db.clone());
    let products = service.products_by_batch_number(&batch_number).await?;
    Ok(Json(products))
}
