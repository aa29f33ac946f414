//! Batch models and lifecycle rules
//!
//! A batch is a discrete received lot of a product with its own expiration
//! and quantity tracking. Its state machine is:
//!
//! ```text
//! Active -> Expired    (expiration_date < evaluation date, derived per read)
//! Active -> SoldOut    (remaining allocation reaches zero, persisted)
//! ```
//!
//! Expired and SoldOut are terminal. Expiration is never written back to
//! storage on ordinary reads; callers compute it against "today" each time.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Lifecycle status of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Active,
    Expired,
    #[serde(rename = "Sold Out")]
    SoldOut,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Active => "Active",
            BatchStatus::Expired => "Expired",
            BatchStatus::SoldOut => "Sold Out",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Expired | BatchStatus::SoldOut)
    }

    /// The status visible to callers on a given evaluation date. Terminal
    /// stored states win; an Active batch with a past expiration date reads
    /// as Expired without a write.
    pub fn effective(
        stored: BatchStatus,
        expiration_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> BatchStatus {
        if stored.is_terminal() {
            return stored;
        }
        match expiration_date {
            Some(exp) if exp < today => BatchStatus::Expired,
            _ => BatchStatus::Active,
        }
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(BatchStatus::Active),
            "Expired" => Ok(BatchStatus::Expired),
            "Sold Out" => Ok(BatchStatus::SoldOut),
            other => Err(format!("unknown batch status: {}", other)),
        }
    }
}

/// A batch row as exposed over the API, joined with its product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    pub batch_number: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub supplier_id: Uuid,
    pub quantity_received: i32,
    pub received_date: NaiveDate,
    pub expiration_date: Option<NaiveDate>,
    pub batch_status: BatchStatus,
}

/// True when the batch expires within `days` of `today`. Non-perishable
/// batches (no expiration date) never match.
pub fn expires_within(expiration_date: Option<NaiveDate>, today: NaiveDate, days: u64) -> bool {
    match (expiration_date, today.checked_add_days(Days::new(days))) {
        (Some(exp), Some(threshold)) => exp <= threshold,
        _ => false,
    }
}

/// Ordering for the aging report: expiration date ascending, batches with no
/// expiration date sorted last.
pub fn aging_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort batches into aging-report order. Ties on expiration date keep a
/// deterministic order by batch id.
pub fn sort_for_aging(batches: &mut [Batch]) {
    batches.sort_by(|a, b| {
        aging_order(a.expiration_date, b.expiration_date).then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn batch(expiration_date: Option<NaiveDate>) -> Batch {
        Batch {
            id: Uuid::new_v4(),
            batch_number: "ABC123".to_string(),
            product_id: Uuid::new_v4(),
            product_name: "Mug".to_string(),
            supplier_id: Uuid::new_v4(),
            quantity_received: 100,
            received_date: d(2025, 2, 10),
            expiration_date,
            batch_status: BatchStatus::Active,
        }
    }

    #[test]
    fn active_batch_expires_by_date() {
        let today = d(2025, 6, 1);
        assert_eq!(
            BatchStatus::effective(BatchStatus::Active, Some(d(2025, 5, 31)), today),
            BatchStatus::Expired
        );
        // Expiring today is still active; only past dates expire.
        assert_eq!(
            BatchStatus::effective(BatchStatus::Active, Some(today), today),
            BatchStatus::Active
        );
        assert_eq!(
            BatchStatus::effective(BatchStatus::Active, None, today),
            BatchStatus::Active
        );
    }

    #[test]
    fn terminal_states_do_not_transition() {
        let today = d(2025, 6, 1);
        // A sold-out batch stays sold out even past its expiration date.
        assert_eq!(
            BatchStatus::effective(BatchStatus::SoldOut, Some(d(2025, 1, 1)), today),
            BatchStatus::SoldOut
        );
        assert_eq!(
            BatchStatus::effective(BatchStatus::Expired, None, today),
            BatchStatus::Expired
        );
    }

    #[test]
    fn expiring_within_window() {
        let today = d(2025, 6, 1);
        assert!(expires_within(Some(d(2025, 6, 30)), today, 30));
        assert!(expires_within(Some(d(2025, 7, 1)), today, 30));
        assert!(!expires_within(Some(d(2025, 7, 2)), today, 30));
        // Already-expired batches fall inside the window too.
        assert!(expires_within(Some(d(2025, 1, 1)), today, 30));
        // Non-perishable batches never match.
        assert!(!expires_within(None, today, 30));
    }

    #[test]
    fn aging_sort_places_nulls_last() {
        let mut batches = vec![
            batch(Some(d(2025, 8, 1))),
            batch(None),
            batch(Some(d(2025, 2, 5))),
        ];
        sort_for_aging(&mut batches);
        let order: Vec<Option<NaiveDate>> =
            batches.iter().map(|b| b.expiration_date).collect();
        assert_eq!(
            order,
            vec![Some(d(2025, 2, 5)), Some(d(2025, 8, 1)), None]
        );
    }

    #[test]
    fn status_serializes_with_legacy_labels() {
        assert_eq!(
            serde_json::to_string(&BatchStatus::SoldOut).unwrap(),
            "\"Sold Out\""
        );
        assert_eq!(
            serde_json::to_string(&BatchStatus::Active).unwrap(),
            "\"Active\""
        );
    }
}
