//! Product review HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::review::CreateReviewInput;
use crate::services::ReviewService;
use crate::AppState;
use shared::models::Review;

/// Reviews for a product, newest first
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<Review>>> {
    let service = ReviewService::new(state.db.clone());
    let reviews = service.list_for_product(product_id).await?;
    Ok(Json(reviews))
}

/// Post a review for a product as the authenticated user
pub async fn create_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<CreateReviewInput>,
) -> AppResult<(StatusCode, Json<Review>)> {
    let service = ReviewService::new(state.db.clone());
    let review = service
        .create_review(product_id, user.0.user_id, input)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}
