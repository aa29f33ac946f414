//! Reporting aggregation core
//!
//! Pure functions that turn flat sale and stock-movement records into report
//! rows. The backend fetches the records from Postgres (already restricted
//! to the requested date range) and the renderers consume the rows exactly
//! as produced here; nothing in this module filters, queries, or formats.
//!
//! Determinism rules, pinned deliberately:
//! - top sellers order by quantity descending, ties broken by product id;
//! - turnover and profit rows order by product id;
//! - all monetary values pass through [`round_money`](crate::types::round_money).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::types::round_money;

/// One order line joined with its product, as fetched for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub cost_price: Option<Decimal>,
}

/// One stock movement joined with its product's current stock level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRecord {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub stock_level: i32,
}

/// Row of the top-sellers report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSellerRow {
    pub name: String,
    pub total_sold: i64,
}

/// Row of the stock-turnover report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnoverRow {
    pub name: String,
    pub turnover_rate: Decimal,
}

/// Row of the profit-analysis report. `profit == revenue - cost` holds
/// exactly: profit is computed from the already-rounded operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitRow {
    pub name: String,
    pub total_sold: i64,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
}

/// Total quantity sold per product, descending, at most `limit` rows.
pub fn top_selling_products(sales: &[SaleRecord], limit: usize) -> Vec<TopSellerRow> {
    let mut totals: BTreeMap<Uuid, (String, i64)> = BTreeMap::new();
    for sale in sales {
        let entry = totals
            .entry(sale.product_id)
            .or_insert_with(|| (sale.product_name.clone(), 0));
        entry.1 += i64::from(sale.quantity);
    }

    let mut rows: Vec<(Uuid, String, i64)> = totals
        .into_iter()
        .map(|(id, (name, total))| (id, name, total))
        .collect();
    rows.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(limit);

    rows.into_iter()
        .map(|(_, name, total_sold)| TopSellerRow { name, total_sold })
        .collect()
}

/// Inventory velocity per product: total absolute movement divided by the
/// current stock level (floored to 1, so the division is always defined).
/// Products with no stock on hand or no movements are excluded.
pub fn stock_turnover(movements: &[MovementRecord]) -> Vec<TurnoverRow> {
    let mut totals: BTreeMap<Uuid, (String, i64, i32)> = BTreeMap::new();
    for movement in movements {
        if movement.stock_level <= 0 {
            continue;
        }
        let entry = totals
            .entry(movement.product_id)
            .or_insert_with(|| (movement.product_name.clone(), 0, movement.stock_level));
        entry.1 += i64::from(movement.quantity).abs();
    }

    totals
        .into_values()
        .map(|(name, total_moved, stock_level)| {
            let denominator = i64::from(stock_level.abs()).max(1);
            let rate = Decimal::from(total_moved) / Decimal::from(denominator);
            TurnoverRow {
                name,
                turnover_rate: round_money(rate),
            }
        })
        .collect()
}

/// Revenue, cost, and profit per product. Cost comes from the recorded
/// `cost_price` when the product has one, otherwise from the configured
/// cost ratio applied to revenue.
pub fn profit_analysis(sales: &[SaleRecord], cost_ratio: Decimal) -> Vec<ProfitRow> {
    struct Acc {
        name: String,
        total_sold: i64,
        price: Decimal,
        cost_price: Option<Decimal>,
    }

    let mut totals: BTreeMap<Uuid, Acc> = BTreeMap::new();
    for sale in sales {
        let entry = totals.entry(sale.product_id).or_insert_with(|| Acc {
            name: sale.product_name.clone(),
            total_sold: 0,
            price: sale.price,
            cost_price: sale.cost_price,
        });
        entry.total_sold += i64::from(sale.quantity);
    }

    totals
        .into_values()
        .map(|acc| {
            let sold = Decimal::from(acc.total_sold);
            let revenue = round_money(sold * acc.price);
            let cost = round_money(match acc.cost_price {
                Some(cost_price) => sold * cost_price,
                None => sold * acc.price * cost_ratio,
            });
            ProfitRow {
                name: acc.name,
                total_sold: acc.total_sold,
                revenue,
                cost,
                profit: revenue - cost,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sale(id: Uuid, name: &str, quantity: i32, price: &str) -> SaleRecord {
        SaleRecord {
            product_id: id,
            product_name: name.to_string(),
            quantity,
            price: dec(price),
            cost_price: None,
        }
    }

    #[test]
    fn top_sellers_groups_and_orders() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let sales = vec![
            sale(a, "Mug", 3, "15.00"),
            sale(b, "Tote Bag", 10, "15.00"),
            sale(a, "Mug", 4, "15.00"),
        ];
        let rows = top_selling_products(&sales, 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Tote Bag");
        assert_eq!(rows[0].total_sold, 10);
        assert_eq!(rows[1].name, "Mug");
        assert_eq!(rows[1].total_sold, 7);
    }

    #[test]
    fn top_sellers_limit_and_tie_break() {
        let mut ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        ids.sort();
        let sales: Vec<SaleRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| sale(*id, &format!("P{}", i), 5, "10.00"))
            .collect();

        let rows = top_selling_products(&sales, 2);
        assert_eq!(rows.len(), 2);
        // All tied on quantity, so the two smallest product ids win.
        assert_eq!(rows[0].name, "P0");
        assert_eq!(rows[1].name, "P1");
    }

    #[test]
    fn top_sellers_empty_input_is_empty() {
        assert!(top_selling_products(&[], 10).is_empty());
    }

    #[test]
    fn turnover_excludes_zero_stock_and_guards_division() {
        let live = Uuid::new_v4();
        let dead = Uuid::new_v4();
        let movements = vec![
            MovementRecord {
                product_id: live,
                product_name: "Mug".to_string(),
                quantity: -6,
                stock_level: 4,
            },
            MovementRecord {
                product_id: live,
                product_name: "Mug".to_string(),
                quantity: 10,
                stock_level: 4,
            },
            MovementRecord {
                product_id: dead,
                product_name: "Hat".to_string(),
                quantity: -3,
                stock_level: 0,
            },
        ];
        let rows = stock_turnover(&movements);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Mug");
        // (|-6| + |10|) / 4 = 4.00
        assert_eq!(rows[0].turnover_rate, dec("4.00"));
    }

    #[test]
    fn turnover_rounds_to_two_places() {
        let id = Uuid::new_v4();
        let movements = vec![MovementRecord {
            product_id: id,
            product_name: "Mug".to_string(),
            quantity: 10,
            stock_level: 3,
        }];
        let rows = stock_turnover(&movements);
        assert_eq!(rows[0].turnover_rate, dec("3.33"));
    }

    #[test]
    fn profit_worked_example() {
        // 5 + 3 units at $10 with cost ratio 0.7.
        let a = Uuid::new_v4();
        let sales = vec![sale(a, "A", 5, "10.00"), sale(a, "A", 3, "10.00")];
        let rows = profit_analysis(&sales, dec("0.7"));
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "A");
        assert_eq!(row.total_sold, 8);
        assert_eq!(row.revenue, dec("80.00"));
        assert_eq!(row.cost, dec("56.00"));
        assert_eq!(row.profit, dec("24.00"));
    }

    #[test]
    fn profit_prefers_recorded_cost_price() {
        let a = Uuid::new_v4();
        let mut record = sale(a, "Truck Shirt", 2, "25.00");
        record.cost_price = Some(dec("18.00"));
        let rows = profit_analysis(&[record], dec("0.7"));
        assert_eq!(rows[0].revenue, dec("50.00"));
        assert_eq!(rows[0].cost, dec("36.00"));
        assert_eq!(rows[0].profit, dec("14.00"));
    }

    #[test]
    fn profit_identity_holds_after_rounding() {
        let a = Uuid::new_v4();
        // 3 * 9.99 = 29.97 revenue; cost ratio produces a value that must be
        // rounded before the subtraction.
        let sales = vec![sale(a, "Sticker", 3, "9.99")];
        let rows = profit_analysis(&sales, dec("0.7"));
        let row = &rows[0];
        assert_eq!(row.profit, row.revenue - row.cost);
        assert_eq!(row.revenue, dec("29.97"));
        assert_eq!(row.cost, dec("20.98"));
        assert_eq!(row.profit, dec("8.99"));
    }

    #[test]
    fn all_reports_return_empty_for_no_matches() {
        assert!(profit_analysis(&[], dec("0.7")).is_empty());
        assert!(stock_turnover(&[]).is_empty());
        assert!(top_selling_products(&[], 10).is_empty());
    }
}
