//! Batch tracking service
//!
//! Owns batch receipt, the persisted Sold Out transition, and the
//! expiration queries. Expired status is derived per read from the
//! evaluation date handed in by the caller; it is never written back.

use chrono::{Days, NaiveDate};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Batch, BatchStatus, Product};
use shared::validation::validate_quantity;

/// Batch tracking service
#[derive(Clone)]
pub struct BatchService {
    db: PgPool,
}

/// Input for receiving a new batch of stock
#[derive(Debug, Deserialize)]
pub struct CreateBatchInput {
    pub product_id: Uuid,
    pub supplier_id: Uuid,
    pub batch_number: String,
    pub quantity_received: i32,
    pub received_date: NaiveDate,
    pub expiration_date: Option<NaiveDate>,
}

/// Batch row joined with its product name
#[derive(Debug, FromRow)]
struct BatchRow {
    id: Uuid,
    batch_number: String,
    product_id: Uuid,
    product_name: String,
    supplier_id: Uuid,
    quantity_received: i32,
    received_date: NaiveDate,
    expiration_date: Option<NaiveDate>,
    batch_status: String,
}

impl BatchRow {
    /// Convert to the API shape, deriving Expired from the evaluation date.
    fn into_batch(self, today: NaiveDate) -> AppResult<Batch> {
        let stored = BatchStatus::from_str(&self.batch_status)
            .map_err(AppError::Internal)?;
        Ok(Batch {
            id: self.id,
            batch_number: self.batch_number,
            product_id: self.product_id,
            product_name: self.product_name,
            supplier_id: self.supplier_id,
            quantity_received: self.quantity_received,
            received_date: self.received_date,
            expiration_date: self.expiration_date,
            batch_status: BatchStatus::effective(stored, self.expiration_date, today),
        })
    }
}

const BATCH_COLUMNS: &str = r#"
    b.id, b.batch_number, b.product_id, p.name as product_name, b.supplier_id,
    b.quantity_received, b.received_date, b.expiration_date, b.batch_status
"#;

impl BatchService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List every batch with its product name
    pub async fn list_batches(&self, today: NaiveDate) -> AppResult<Vec<Batch>> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            SELECT {BATCH_COLUMNS}
            FROM batches b
            JOIN products p ON p.id = b.product_id
            ORDER BY b.received_date DESC, b.id
            "#,
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_batch(today)).collect()
    }

    /// Receive a new batch: validates the references, records the batch,
    /// books a positive stock movement, and raises the product stock level.
    pub async fn create_batch(&self, input: CreateBatchInput, today: NaiveDate) -> AppResult<Batch> {
        validate_quantity(input.quantity_received).map_err(|msg| AppError::Validation {
            field: "quantity_received".to_string(),
            message: msg.to_string(),
        })?;

        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(input.product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&self.db)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM batches WHERE batch_number = $1)",
        )
        .bind(&input.batch_number)
        .fetch_one(&self.db)
        .await?;
        if duplicate {
            return Err(AppError::DuplicateEntry("batch_number".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let batch_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO batches (product_id, supplier_id, batch_number, quantity_received,
                                 received_date, expiration_date, batch_status)
            VALUES ($1, $2, $3, $4, $5, $6, 'Active')
            RETURNING id
            "#,
        )
        .bind(input.product_id)
        .bind(input.supplier_id)
        .bind(&input.batch_number)
        .bind(input.quantity_received)
        .bind(input.received_date)
        .bind(input.expiration_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO stock_movements (product_id, quantity) VALUES ($1, $2)")
            .bind(input.product_id)
            .bind(input.quantity_received)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE products SET stock_level = stock_level + $1 WHERE id = $2")
            .bind(input.quantity_received)
            .bind(input.product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_batch(batch_id, today).await
    }

    /// Fetch a single batch
    pub async fn get_batch(&self, batch_id: Uuid, today: NaiveDate) -> AppResult<Batch> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            SELECT {BATCH_COLUMNS}
            FROM batches b
            JOIN products p ON p.id = b.product_id
            WHERE b.id = $1
            "#,
        ))
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        row.into_batch(today)
    }

    /// Batches for one product. A missing product is NotFound; an existing
    /// product with no batches is an empty list, not an error.
    pub async fn batches_for_product(
        &self,
        product_id: Uuid,
        today: NaiveDate,
    ) -> AppResult<Vec<Batch>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            SELECT {BATCH_COLUMNS}
            FROM batches b
            JOIN products p ON p.id = b.product_id
            WHERE b.product_id = $1
            ORDER BY b.received_date DESC, b.id
            "#,
        ))
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_batch(today)).collect()
    }

    /// Batches expiring within `days` of `today`. Non-perishable batches
    /// never appear.
    pub async fn batches_expiring_within(
        &self,
        today: NaiveDate,
        days: u64,
    ) -> AppResult<Vec<Batch>> {
        let threshold = today
            .checked_add_days(Days::new(days))
            .ok_or_else(|| AppError::ValidationError("days window out of range".to_string()))?;

        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            SELECT {BATCH_COLUMNS}
            FROM batches b
            JOIN products p ON p.id = b.product_id
            WHERE b.expiration_date IS NOT NULL AND b.expiration_date <= $1
            ORDER BY b.expiration_date ASC, b.id
            "#,
        ))
        .bind(threshold)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_batch(today)).collect()
    }

    /// Full batch list ordered by expiration date ascending, batches with no
    /// expiration date last.
    pub async fn aging_report(&self, today: NaiveDate) -> AppResult<Vec<Batch>> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            SELECT {BATCH_COLUMNS}
            FROM batches b
            JOIN products p ON p.id = b.product_id
            ORDER BY b.expiration_date ASC NULLS LAST, b.id
            "#,
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_batch(today)).collect()
    }

    /// Persist the terminal Sold Out transition. Only an Active batch may
    /// transition; Expired and Sold Out are terminal.
    pub async fn mark_sold_out(&self, batch_id: Uuid, today: NaiveDate) -> AppResult<Batch> {
        let batch = self.get_batch(batch_id, today).await?;

        if batch.batch_status != BatchStatus::Active {
            return Err(AppError::InvalidStateTransition(format!(
                "Batch {} is {} and cannot be marked sold out",
                batch.batch_number,
                batch.batch_status.as_str()
            )));
        }

        sqlx::query("UPDATE batches SET batch_status = 'Sold Out' WHERE id = $1")
            .bind(batch_id)
            .execute(&self.db)
            .await?;

        self.get_batch(batch_id, today).await
    }

    /// Products that arrived under a given batch number
    pub async fn products_by_batch_number(&self, batch_number: &str) -> AppResult<Vec<Product>> {
        let service = super::product::ProductService::new(self.db.clone());
        let products = service.products_for_batch(batch_number).await?;

        if products.is_empty() {
            return Err(AppError::NotFound("Batch".to_string()));
        }

        Ok(products)
    }
}
