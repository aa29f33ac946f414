//! Report renderers
//!
//! Pure formatting over already-computed report rows. Renderers never query
//! or filter; they receive a [`ReportTable`] and produce bytes, so their
//! correctness is testable without a database. Cell text is produced from
//! the aggregation core's rounded `Decimal` values, which keeps the exported
//! numbers identical to the JSON reports.

pub mod csv;
pub mod pdf;

pub use self::csv::render_csv;
pub use self::pdf::render_pdf;

use shared::models::ProfitRow;
use shared::types::DateRange;

/// A rendered report: a title, an optional date-range caption, named
/// columns, and rows of preformatted cells in engine order.
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub title: String,
    pub caption: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Tabulate profit-analysis rows, preserving the engine's row order.
    pub fn profit(rows: &[ProfitRow], range: &DateRange) -> Self {
        Self {
            title: "Sales & Profit Report".to_string(),
            caption: range.caption(),
            columns: ["Product Name", "Total Sold", "Revenue", "Cost", "Profit"]
                .into_iter()
                .map(String::from)
                .collect(),
            rows: rows
                .iter()
                .map(|r| {
                    vec![
                        r.name.clone(),
                        r.total_sold.to_string(),
                        r.revenue.to_string(),
                        r.cost.to_string(),
                        r.profit.to_string(),
                    ]
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn profit_table_preserves_row_order_and_formatting() {
        let rows = vec![
            ProfitRow {
                name: "Mug".to_string(),
                total_sold: 8,
                revenue: dec("80.00"),
                cost: dec("56.00"),
                profit: dec("24.00"),
            },
            ProfitRow {
                name: "Hat".to_string(),
                total_sold: 2,
                revenue: dec("50.00"),
                cost: dec("36.00"),
                profit: dec("14.00"),
            },
        ];
        let table = ReportTable::profit(&rows, &DateRange::default());
        assert_eq!(table.caption, None);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["Mug", "8", "80.00", "56.00", "24.00"]);
        assert_eq!(table.rows[1][0], "Hat");
    }
}
