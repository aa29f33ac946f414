//! Order recording HTTP handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::services::order::RecordSaleInput;
use crate::services::OrderService;
use crate::AppState;
use shared::models::OrderItem;

/// Record a completed sale
pub async fn record_sale(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let service = OrderService::new(state.db.clone());
    let order = service.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
