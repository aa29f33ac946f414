//! Product review service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::Review;
use shared::validation::validate_rating;

/// Product review service
#[derive(Clone)]
pub struct ReviewService {
    db: PgPool,
}

/// Input for posting a review
#[derive(Debug, Deserialize)]
pub struct CreateReviewInput {
    pub rating: i32,
    pub review_text: String,
}

#[derive(Debug, FromRow)]
struct ReviewRow {
    id: Uuid,
    product_id: Uuid,
    user_id: Uuid,
    rating: i32,
    review_text: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(r: ReviewRow) -> Self {
        Review {
            id: r.id,
            product_id: r.product_id,
            user_id: r.user_id,
            rating: r.rating,
            review_text: r.review_text,
            created_at: r.created_at,
        }
    }
}

impl ReviewService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Reviews for a product, newest first
    pub async fn list_for_product(&self, product_id: Uuid) -> AppResult<Vec<Review>> {
        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT id, product_id, user_id, rating, review_text, created_at
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    /// Post a review for a product
    pub async fn create_review(
        &self,
        product_id: Uuid,
        user_id: Uuid,
        input: CreateReviewInput,
    ) -> AppResult<Review> {
        validate_rating(input.rating).map_err(|msg| AppError::Validation {
            field: "rating".to_string(),
            message: msg.to_string(),
        })?;

        let product_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (product_id, user_id, rating, review_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, user_id, rating, review_text, created_at
            "#,
        )
        .bind(product_id)
        .bind(user_id)
        .bind(input.rating)
        .bind(&input.review_text)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }
}
