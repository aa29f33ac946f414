//! Order and stock movement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed transaction line. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub sold_at: DateTime<Utc>,
}

/// A signed stock delta: positive quantities are received stock, negative
/// quantities are sales or adjustments. Consumed only by the turnover report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub moved_at: DateTime<Utc>,
}
