//! Order recording service
//!
//! A sale writes three facts atomically: the immutable order line, the
//! negative stock movement, and the decremented product stock level. When
//! stock reaches zero the product's remaining Active batches are marked
//! Sold Out in the same transaction.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::OrderItem;
use shared::validation::validate_quantity;

/// Order recording service
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Input for recording a sale
#[derive(Debug, Deserialize)]
pub struct RecordSaleInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    sold_at: DateTime<Utc>,
}

impl OrderService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a completed sale
    pub async fn record_sale(&self, input: RecordSaleInput) -> AppResult<OrderItem> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        // Lock the product row so concurrent sales cannot oversell.
        let stock_level = sqlx::query_scalar::<_, i32>(
            "SELECT stock_level FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(input.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        if stock_level < input.quantity {
            return Err(AppError::InsufficientStock(format!(
                "Requested {} units but only {} in stock",
                input.quantity, stock_level
            )));
        }

        let row = sqlx::query_as::<_, OrderItemRow>(
            r#"
            INSERT INTO order_items (product_id, quantity)
            VALUES ($1, $2)
            RETURNING id, product_id, quantity, sold_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.quantity)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO stock_movements (product_id, quantity) VALUES ($1, $2)")
            .bind(input.product_id)
            .bind(-input.quantity)
            .execute(&mut *tx)
            .await?;

        let remaining = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE products SET stock_level = stock_level - $1, updated_at = NOW()
            WHERE id = $2
            RETURNING stock_level
            "#,
        )
        .bind(input.quantity)
        .bind(input.product_id)
        .fetch_one(&mut *tx)
        .await?;

        // Stock exhausted: the product's open batches have nothing left to
        // allocate, so persist their terminal transition here.
        if remaining == 0 {
            sqlx::query(
                "UPDATE batches SET batch_status = 'Sold Out' WHERE product_id = $1 AND batch_status = 'Active'",
            )
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderItem {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            sold_at: row.sold_at,
        })
    }
}
