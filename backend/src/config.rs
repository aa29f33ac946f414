//! Configuration management for the Shopstock backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with SHOPSTOCK_ prefix

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// Reporting configuration
    pub reporting: ReportingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportingConfig {
    /// Fraction of revenue treated as cost of goods sold when a product has
    /// no recorded cost price. Stored as a string so it round-trips into
    /// Decimal without a float detour.
    pub cost_ratio: String,

    /// Default window, in days, for the expiring-soon batch query
    pub expiring_soon_days: u64,
}

impl ReportingConfig {
    pub fn cost_ratio(&self) -> Result<Decimal, ConfigError> {
        self.cost_ratio
            .parse::<Decimal>()
            .map_err(|e| ConfigError::Message(format!("invalid reporting.cost_ratio: {}", e)))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("SHOPSTOCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("jwt.access_token_expiry", 1800)?
            .set_default("reporting.cost_ratio", "0.7")?
            .set_default("reporting.expiring_soon_days", 30)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SHOPSTOCK_ prefix)
            .add_source(
                Environment::with_prefix("SHOPSTOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn cost_ratio_parses_to_decimal() {
        let reporting = ReportingConfig {
            cost_ratio: "0.7".to_string(),
            expiring_soon_days: 30,
        };
        assert_eq!(
            reporting.cost_ratio().unwrap(),
            Decimal::from_str("0.7").unwrap()
        );
    }

    #[test]
    fn bad_cost_ratio_is_an_error() {
        let reporting = ReportingConfig {
            cost_ratio: "not-a-number".to_string(),
            expiring_soon_days: 30,
        };
        assert!(reporting.cost_ratio().is_err());
    }
}
