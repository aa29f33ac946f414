//! Product catalog service

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Product;

/// Product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub category: String,
    pub stock_level: i32,
    pub reorder_threshold: i32,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub supplier_id: Uuid,
    pub image_url: Option<String>,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    category: String,
    stock_level: i32,
    reorder_threshold: i32,
    price: Decimal,
    cost_price: Option<Decimal>,
    supplier_id: Uuid,
    image_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(r: ProductRow) -> Self {
        Product {
            id: r.id,
            name: r.name,
            category: r.category,
            stock_level: r.stock_level,
            reorder_threshold: r.reorder_threshold,
            price: r.price,
            cost_price: r.cost_price,
            supplier_id: r.supplier_id,
            image_url: r.image_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = r#"
    id, name, category, stock_level, reorder_threshold, price, cost_price,
    supplier_id, image_url, created_at, updated_at
"#;

impl ProductService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the full catalog
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name",
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Fetch one product
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1",
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name must not be empty".to_string(),
            });
        }
        if input.stock_level < 0 {
            return Err(AppError::Validation {
                field: "stock_level".to_string(),
                message: "Stock level must not be negative".to_string(),
            });
        }
        if input.price <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "price".to_string(),
                message: "Price must be positive".to_string(),
            });
        }

        let supplier_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(input.supplier_id)
                .fetch_one(&self.db)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let duplicate =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE name = $1)")
                .bind(&input.name)
                .fetch_one(&self.db)
                .await?;
        if duplicate {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, category, stock_level, reorder_threshold,
                                  price, cost_price, supplier_id, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#,
        ))
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.stock_level)
        .bind(input.reorder_threshold)
        .bind(input.price)
        .bind(input.cost_price)
        .bind(input.supplier_id)
        .bind(&input.image_url)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Products at or below their reorder threshold
    pub async fn low_stock_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE stock_level <= reorder_threshold
            ORDER BY stock_level ASC, name
            "#,
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Products that arrived under the given batch number
    pub async fn products_for_batch(&self, batch_number: &str) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT DISTINCT p.id, p.name, p.category, p.stock_level, p.reorder_threshold,
                   p.price, p.cost_price, p.supplier_id, p.image_url, p.created_at, p.updated_at
            FROM products p
            JOIN batches b ON b.product_id = p.id
            WHERE b.batch_number = $1
            ORDER BY p.name
            "#,
        )
        .bind(batch_number)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
