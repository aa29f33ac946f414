//! Supplier management service

use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Supplier;
use shared::validation::validate_email;

/// Supplier management service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    contact_person: String,
    phone: String,
    email: String,
    address: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(r: SupplierRow) -> Self {
        Supplier {
            id: r.id,
            name: r.name,
            contact_person: r.contact_person,
            phone: r.phone,
            email: r.email,
            address: r.address,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl SupplierService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all suppliers
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, contact_person, phone, email, address, created_at, updated_at
            FROM suppliers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    /// Fetch one supplier
    pub async fn get_supplier(&self, supplier_id: Uuid) -> AppResult<Supplier> {
        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT id, name, contact_person, phone, email, address, created_at, updated_at
            FROM suppliers
            WHERE id = $1
            "#,
        )
        .bind(supplier_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supplier".to_string()))?;

        Ok(row.into())
    }

    /// Create a supplier
    pub async fn create_supplier(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Supplier name must not be empty".to_string(),
            });
        }
        validate_email(&input.email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
        })?;

        let duplicate =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM suppliers WHERE email = $1)")
                .bind(&input.email)
                .fetch_one(&self.db)
                .await?;
        if duplicate {
            return Err(AppError::DuplicateEntry("email".to_string()));
        }

        let row = sqlx::query_as::<_, SupplierRow>(
            r#"
            INSERT INTO suppliers (name, contact_person, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, contact_person, phone, email, address, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
