//! Supplier management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::supplier::CreateSupplierInput;
use crate::services::SupplierService;
use crate::AppState;
use shared::models::Supplier;

/// List all suppliers
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db.clone());
    let suppliers = service.list_suppliers().await?;
    Ok(Json(suppliers))
}

/// Fetch one supplier
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db.clone());
    let supplier = service.get_supplier(supplier_id).await?;
    Ok(Json(supplier))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.db.clone());
    let supplier = service.create_supplier(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}
