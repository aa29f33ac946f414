//! Common types used across the platform

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Inclusive date range filter for reports. Either bound may be absent,
/// meaning unbounded on that side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range with an end before its start is rejected rather than
    /// silently producing an empty report.
    pub fn validate(&self) -> Result<(), &'static str> {
        match (self.start, self.end) {
            (Some(s), Some(e)) if s > e => Err("end_date must not be before start_date"),
            _ => Ok(()),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Caption text for rendered reports, e.g. "2025-01-01 to 2025-03-31".
    pub fn caption(&self) -> Option<String> {
        match (self.start, self.end) {
            (None, None) => None,
            (Some(s), Some(e)) => Some(format!("{} to {}", s, e)),
            (Some(s), None) => Some(format!("from {}", s)),
            (None, Some(e)) => Some(format!("until {}", e)),
        }
    }

    /// Suffix for export filenames: `report_{start}_{end}.csv` when both
    /// bounds are present, plain `report.csv` otherwise.
    pub fn file_suffix(&self) -> Option<String> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(format!("{}_{}", s, e)),
            _ => None,
        }
    }
}

/// Monetary rounding policy: round-half-even at 2 decimal places.
///
/// Every aggregation and every renderer goes through this single function so
/// that exported values agree bit-for-bit with the JSON reports.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
