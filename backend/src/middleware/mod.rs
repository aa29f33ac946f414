//! Middleware for the Shopstock backend

pub mod auth;

pub use auth::{auth_middleware, AuthUser, CurrentUser};
