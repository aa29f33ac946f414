//! Tests for the reporting aggregation core
//! Covers top-seller ordering, turnover guards, and the profit identity

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    profit_analysis, round_money, stock_turnover, top_selling_products, MovementRecord, SaleRecord,
};
use uuid::Uuid;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sale(id: Uuid, name: &str, quantity: i32, price: &str, cost_price: Option<&str>) -> SaleRecord {
    SaleRecord {
        product_id: id,
        product_name: name.to_string(),
        quantity,
        price: dec(price),
        cost_price: cost_price.map(dec),
    }
}

// =============================================================================
// Top sellers: row cap, ordering, determinism
// =============================================================================

mod top_sellers {
    use super::*;

    #[test]
    fn quantities_accumulate_across_order_lines() {
        let id = Uuid::new_v4();
        let sales = vec![
            sale(id, "Mug", 5, "10.00", None),
            sale(id, "Mug", 3, "10.00", None),
        ];
        let rows = top_selling_products(&sales, 10);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Mug");
        assert_eq!(rows[0].total_sold, 8);
    }

    #[test]
    fn ties_break_on_product_id() {
        let low = Uuid::from_u128(1);
        let high = Uuid::from_u128(2);
        // Insert in reverse id order; equal quantities must still come out
        // low id first.
        let sales = vec![
            sale(high, "Hat", 4, "25.00", None),
            sale(low, "Mug", 4, "10.00", None),
        ];
        let rows = top_selling_products(&sales, 10);
        assert_eq!(rows[0].name, "Mug");
        assert_eq!(rows[1].name, "Hat");
    }

    #[test]
    fn empty_sales_produce_empty_report() {
        assert!(top_selling_products(&[], 10).is_empty());
    }
}

// =============================================================================
// Stock turnover: exclusion and denominator guards
// =============================================================================

mod turnover {
    use super::*;

    fn movement(id: Uuid, name: &str, quantity: i32, stock_level: i32) -> MovementRecord {
        MovementRecord {
            product_id: id,
            product_name: name.to_string(),
            quantity,
            stock_level,
        }
    }

    #[test]
    fn sums_absolute_deltas_over_stock_level() {
        let id = Uuid::new_v4();
        let movements = vec![movement(id, "Mug", 20, 10), movement(id, "Mug", -10, 10)];
        let rows = stock_turnover(&movements);
        assert_eq!(rows.len(), 1);
        // (|20| + |-10|) / 10
        assert_eq!(rows[0].turnover_rate, dec("3.00"));
    }

    #[test]
    fn non_positive_stock_is_excluded() {
        let movements = vec![
            movement(Uuid::new_v4(), "Gone", 5, 0),
            movement(Uuid::new_v4(), "Negative", 5, -3),
        ];
        assert!(stock_turnover(&movements).is_empty());
    }
}

// =============================================================================
// Profit analysis: worked example and cost model
// =============================================================================

mod profit {
    use super::*;

    #[test]
    fn worked_example_eight_units_at_ten() {
        // Two lines of 5 and 3 units at $10.00 with the default 0.7 ratio
        let id = Uuid::new_v4();
        let sales = vec![
            sale(id, "Mug", 5, "10.00", None),
            sale(id, "Mug", 3, "10.00", None),
        ];
        let rows = profit_analysis(&sales, dec("0.7"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_sold, 8);
        assert_eq!(rows[0].revenue, dec("80.00"));
        assert_eq!(rows[0].cost, dec("56.00"));
        assert_eq!(rows[0].profit, dec("24.00"));
    }

    #[test]
    fn recorded_cost_price_wins_over_ratio() {
        let id = Uuid::new_v4();
        let sales = vec![sale(id, "Hat", 2, "25.00", Some("18.00"))];
        let rows = profit_analysis(&sales, dec("0.7"));
        assert_eq!(rows[0].cost, dec("36.00"));
        assert_eq!(rows[0].profit, dec("14.00"));
    }

    #[test]
    fn profit_identity_survives_rounding() {
        // 3 x 9.99 at ratio 0.7: both operands round before subtraction
        let id = Uuid::new_v4();
        let rows = profit_analysis(&[sale(id, "Pin", 3, "9.99", None)], dec("0.7"));
        assert_eq!(rows[0].revenue, dec("29.97"));
        assert_eq!(rows[0].cost, dec("20.98"));
        assert_eq!(rows[0].profit, dec("8.99"));
        assert_eq!(rows[0].profit, rows[0].revenue - rows[0].cost);
    }
}

// =============================================================================
// Property tests
// =============================================================================

fn arb_sales() -> impl Strategy<Value = Vec<SaleRecord>> {
    prop::collection::vec(
        (
            0u128..8,
            1i32..500,
            1u32..100_000u32,
            prop::option::of(1u32..100_000u32),
        )
            .prop_map(|(id, quantity, price_cents, cost_cents)| SaleRecord {
                product_id: Uuid::from_u128(id),
                product_name: format!("product-{}", id),
                quantity,
                price: Decimal::new(i64::from(price_cents), 2),
                cost_price: cost_cents.map(|c| Decimal::new(i64::from(c), 2)),
            }),
        0..50,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn top_sellers_respect_limit_and_order(sales in arb_sales(), limit in 1usize..12) {
        let rows = top_selling_products(&sales, limit);
        prop_assert!(rows.len() <= limit);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].total_sold >= pair[1].total_sold);
        }
    }

    #[test]
    fn top_sellers_are_deterministic(sales in arb_sales()) {
        prop_assert_eq!(
            top_selling_products(&sales, 10),
            top_selling_products(&sales, 10)
        );
    }

    #[test]
    fn profit_equals_revenue_minus_cost(sales in arb_sales()) {
        for row in profit_analysis(&sales, dec("0.7")) {
            prop_assert_eq!(row.profit, row.revenue - row.cost);
            prop_assert_eq!(row.revenue, round_money(row.revenue));
            prop_assert_eq!(row.cost, round_money(row.cost));
        }
    }

    #[test]
    fn turnover_rates_are_finite_and_rounded(
        movements in prop::collection::vec(
            (0u128..8, -500i32..500, -50i32..200).prop_map(|(id, quantity, stock_level)| {
                MovementRecord {
                    product_id: Uuid::from_u128(id),
                    product_name: format!("product-{}", id),
                    quantity,
                    stock_level,
                }
            }),
            0..50,
        )
    ) {
        for row in stock_turnover(&movements) {
            prop_assert!(row.turnover_rate >= Decimal::ZERO);
            prop_assert_eq!(row.turnover_rate, round_money(row.turnover_rate));
        }
    }
}
