//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::services::auth::{AuthTokens, RegisterInput};
use crate::services::AuthService;
use crate::AppState;
use shared::models::User;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// The reset token is returned in the response body instead of being
/// emailed; delivery is outside this service.
#[derive(Serialize)]
pub struct ResetPasswordResponse {
    pub reset_token: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub reset_token: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Register a new customer account
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let user = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let tokens = service.login(&body.email, &body.password).await?;
    Ok(Json(tokens))
}

/// Issue a password reset token
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> AppResult<Json<ResetPasswordResponse>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    let reset_token = service.request_password_reset(&body.email).await?;
    Ok(Json(ResetPasswordResponse { reset_token }))
}

/// Consume a reset token and set a new password
pub async fn change_password(
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let service = AuthService::new(state.db.clone(), &state.config);
    service
        .change_password(&body.reset_token, &body.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "Password updated",
    }))
}
