//! Authentication service for user registration, login, and password reset
//!
//! Identity is persisted in the `users` table, including reset tokens;
//! there is no process-global session or token state.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::models::{Role, User};
use shared::validation::validate_email;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
}

/// Input for registering a user account
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User row from the database
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    is_active: bool,
    role: String,
}

impl UserRow {
    fn into_user(self) -> AppResult<User> {
        let role = Role::from_str(&self.role).map_err(AppError::Internal)?;
        Ok(User {
            id: self.id,
            email: self.email,
            username: self.username,
            is_active: self.is_active,
            role,
        })
    }
}

impl AuthService {
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
        }
    }

    /// Register a new account with the default customer role
    pub async fn register(&self, input: RegisterInput) -> AppResult<User> {
        validate_email(&input.email).map_err(|msg| AppError::Validation {
            field: "email".to_string(),
            message: msg.to_string(),
        })?;
        if input.password.len() < 8 {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: "Password must be at least 8 characters".to_string(),
            });
        }

        let duplicate = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR username = $2)",
        )
        .bind(&input.email)
        .bind(&input.username)
        .fetch_one(&self.db)
        .await?;
        if duplicate {
            return Err(AppError::DuplicateEntry("email or username".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, username, password_hash, role)
            VALUES ($1, $2, $3, 'customer')
            RETURNING id, email, username, password_hash, is_active, role
            "#,
        )
        .bind(&input.email)
        .bind(&input.username)
        .bind(&password_hash)
        .fetch_one(&self.db)
        .await?;

        row.into_user()
    }

    /// Log in with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, username, password_hash, is_active, role
            FROM users
            WHERE email = $1 AND is_active = true
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let user = row.into_user()?;
        self.issue_tokens(&user)
    }

    /// Issue a reset token and persist it on the user row. The caller is
    /// responsible for delivering it; nothing is emailed here.
    pub async fn request_password_reset(&self, email: &str) -> AppResult<String> {
        let reset_token = Uuid::new_v4().simple().to_string();

        let updated = sqlx::query("UPDATE users SET reset_token = $1 WHERE email = $2")
            .bind(&reset_token)
            .bind(email)
            .execute(&self.db)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(reset_token)
    }

    /// Consume a reset token and set a new password
    pub async fn change_password(&self, token: &str, new_password: &str) -> AppResult<()> {
        if new_password.len() < 8 {
            return Err(AppError::Validation {
                field: "new_password".to_string(),
                message: "Password must be at least 8 characters".to_string(),
            });
        }

        let password_hash = hash(new_password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let updated = sqlx::query(
            "UPDATE users SET password_hash = $1, reset_token = NULL WHERE reset_token = $2",
        )
        .bind(&password_hash)
        .bind(token)
        .execute(&self.db)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::InvalidToken);
        }

        Ok(())
    }

    fn issue_tokens(&self, user: &User) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.as_str().to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))?;

        Ok(AuthTokens {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }
}
