//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product. `stock_level` is the current on-hand quantity and is
/// never negative; `cost_price` is optional and falls back to the configured
/// cost ratio in profit reports when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub stock_level: i32,
    pub reorder_threshold: i32,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
    pub supplier_id: Uuid,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// A product is flagged for reorder once on-hand stock falls to or below
    /// its threshold.
    pub fn needs_reorder(&self) -> bool {
        self.stock_level <= self.reorder_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(stock_level: i32, reorder_threshold: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Tote Bag".to_string(),
            category: "Bag".to_string(),
            stock_level,
            reorder_threshold,
            price: Decimal::from_str("15.00").unwrap(),
            cost_price: None,
            supplier_id: Uuid::new_v4(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn reorder_at_or_below_threshold() {
        assert!(product(5, 5).needs_reorder());
        assert!(product(0, 5).needs_reorder());
        assert!(!product(6, 5).needs_reorder());
    }
}
