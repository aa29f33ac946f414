//! Reporting service for sales analytics
//!
//! Fetches flat sale/movement records for the requested date range and runs
//! them through the aggregation core in `shared`. All grouping, ordering,
//! and rounding decisions live there; this service only owns the queries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    profit_analysis, stock_turnover, top_selling_products, MovementRecord, ProfitRow, SaleRecord,
    TopSellerRow, TurnoverRow,
};
use shared::types::DateRange;
use shared::validation::validate_limit;

/// Default row cap for the top-sellers report
pub const DEFAULT_TOP_SELLERS_LIMIT: i64 = 10;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
    cost_ratio: Decimal,
}

/// Order line joined with its product, as fetched for aggregation
#[derive(Debug, FromRow)]
struct SaleRow {
    product_id: Uuid,
    product_name: String,
    quantity: i32,
    price: Decimal,
    cost_price: Option<Decimal>,
}

/// Stock movement joined with the product's current stock level
#[derive(Debug, FromRow)]
struct MovementRow {
    product_id: Uuid,
    product_name: String,
    quantity: i32,
    stock_level: i32,
}

impl ReportingService {
    pub fn new(db: PgPool, cost_ratio: Decimal) -> Self {
        Self { db, cost_ratio }
    }

    /// Top sellers by total quantity sold within the range
    pub async fn top_selling_products(
        &self,
        range: &DateRange,
        limit: Option<i64>,
    ) -> AppResult<Vec<TopSellerRow>> {
        let limit = limit.unwrap_or(DEFAULT_TOP_SELLERS_LIMIT);
        validate_limit(limit).map_err(|msg| AppError::Validation {
            field: "limit".to_string(),
            message: msg.to_string(),
        })?;

        let sales = self.fetch_sales(range).await?;
        Ok(top_selling_products(&sales, limit as usize))
    }

    /// Stock turnover rate per product within the range
    pub async fn stock_turnover(&self, range: &DateRange) -> AppResult<Vec<TurnoverRow>> {
        let movements = self.fetch_movements(range).await?;
        Ok(stock_turnover(&movements))
    }

    /// Revenue, cost, and profit per product within the range
    pub async fn profit_analysis(&self, range: &DateRange) -> AppResult<Vec<ProfitRow>> {
        let sales = self.fetch_sales(range).await?;
        Ok(profit_analysis(&sales, self.cost_ratio))
    }

    /// Fetch order lines joined with products, restricted to the range.
    /// The range is validated here so every report call rejects inverted
    /// bounds before touching the database.
    async fn fetch_sales(&self, range: &DateRange) -> AppResult<Vec<SaleRecord>> {
        let (start, end) = resolve_bounds(range)?;

        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT p.id as product_id,
                   p.name as product_name,
                   o.quantity,
                   p.price,
                   p.cost_price
            FROM order_items o
            JOIN products p ON p.id = o.product_id
            WHERE o.sold_at::date BETWEEN $1 AND $2
            ORDER BY o.sold_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SaleRecord {
                product_id: r.product_id,
                product_name: r.product_name,
                quantity: r.quantity,
                price: r.price,
                cost_price: r.cost_price,
            })
            .collect())
    }

    /// Fetch stock movements joined with products (inner join: products with
    /// no movements in range never appear), restricted to the range.
    async fn fetch_movements(&self, range: &DateRange) -> AppResult<Vec<MovementRecord>> {
        let (start, end) = resolve_bounds(range)?;

        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT p.id as product_id,
                   p.name as product_name,
                   m.quantity,
                   p.stock_level
            FROM stock_movements m
            JOIN products p ON p.id = m.product_id
            WHERE m.moved_at::date BETWEEN $1 AND $2
            ORDER BY m.moved_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MovementRecord {
                product_id: r.product_id,
                product_name: r.product_name,
                quantity: r.quantity,
                stock_level: r.stock_level,
            })
            .collect())
    }
}

/// Validate the range and widen missing bounds to sentinel dates for the
/// BETWEEN clause.
fn resolve_bounds(range: &DateRange) -> AppResult<(NaiveDate, NaiveDate)> {
    range
        .validate()
        .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

    let start = range
        .start
        .or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1))
        .ok_or_else(|| AppError::Internal("invalid sentinel start date".to_string()))?;
    let end = range
        .end
        .or_else(|| NaiveDate::from_ymd_opt(2100, 12, 31))
        .ok_or_else(|| AppError::Internal("invalid sentinel end date".to_string()))?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn inverted_range_is_a_validation_error() {
        let range = DateRange::new(Some(d(2025, 5, 1)), Some(d(2025, 1, 1)));
        let err = resolve_bounds(&range).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn missing_bounds_widen_to_sentinels() {
        let (start, end) = resolve_bounds(&DateRange::default()).unwrap();
        assert_eq!(start, d(2000, 1, 1));
        assert_eq!(end, d(2100, 12, 31));

        let (start, end) =
            resolve_bounds(&DateRange::new(Some(d(2025, 2, 1)), None)).unwrap();
        assert_eq!(start, d(2025, 2, 1));
        assert_eq!(end, d(2100, 12, 31));
    }
}
