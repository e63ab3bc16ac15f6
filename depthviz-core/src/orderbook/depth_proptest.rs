//! Property-based tests for depth curves and book statistics
//!
//! These run the analyzer over randomized books to check the invariants the
//! charts rely on: monotone curves, totals matching raw sums, and the
//! missing-side fallback never producing NaN or infinity.

#[cfg(test)]
mod tests {
    use super::super::{
        compute_depth_curve, compute_statistics, OrderBookSnapshot, PriceLevel,
    };
    use crate::core::DepthError;
    use proptest::prelude::*;

    fn quantities() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(0.0..1_000.0_f64, 1..50)
    }

    fn bid_levels(qty: &[f64]) -> Vec<PriceLevel> {
        qty.iter()
            .enumerate()
            .map(|(i, q)| PriceLevel::new(100.0 - i as f64 * 0.5, *q))
            .collect()
    }

    fn ask_levels(qty: &[f64]) -> Vec<PriceLevel> {
        qty.iter()
            .enumerate()
            .map(|(i, q)| PriceLevel::new(101.0 + i as f64 * 0.5, *q))
            .collect()
    }

    /// Property: cumulative quantity never decreases along the curve
    #[test]
    fn prop_curve_is_non_decreasing() {
        proptest!(|(qty in quantities())| {
            let curve = compute_depth_curve(&bid_levels(&qty)).unwrap();
            let cumulative = curve.cumulative();

            for pair in cumulative.windows(2) {
                prop_assert!(pair[1] >= pair[0],
                    "Curve decreased: {} -> {}", pair[0], pair[1]);
            }
        });
    }

    /// Property: last point equals the sum of all input quantities
    #[test]
    fn prop_curve_total_equals_sum() {
        proptest!(|(qty in quantities())| {
            let curve = compute_depth_curve(&bid_levels(&qty)).unwrap();
            let sum: f64 = qty.iter().sum();

            prop_assert_eq!(curve.len(), qty.len());
            prop_assert_eq!(curve.total(), sum);
        });
    }

    /// Property: re-sorting an already descending bid side keeps the total
    #[test]
    fn prop_resort_keeps_total() {
        proptest!(|(qty in quantities())| {
            let levels = bid_levels(&qty);
            let mut resorted = levels.clone();
            resorted.sort_by(|a, b| b.price.total_cmp(&a.price));

            let before = compute_depth_curve(&levels).unwrap();
            let after = compute_depth_curve(&resorted).unwrap();
            prop_assert_eq!(before.total(), after.total());
        });
    }

    /// Property: a single negative quantity anywhere fails the whole curve
    #[test]
    fn prop_negative_anywhere_is_invalid() {
        proptest!(|(qty in quantities(), idx in any::<prop::sample::Index>(), neg in -1_000.0..-0.001_f64)| {
            let mut qty = qty;
            let at = idx.index(qty.len());
            qty[at] = neg;

            match compute_depth_curve(&bid_levels(&qty)) {
                Err(DepthError::InvalidInput { level, .. }) => prop_assert_eq!(level, at),
                other => prop_assert!(false, "Expected InvalidInput, got {:?}", other),
            }
        });
    }

    /// Property: side volumes do not depend on level order
    #[test]
    fn prop_volume_order_independent() {
        proptest!(|(bids in quantities(), asks in quantities())| {
            let forward = OrderBookSnapshot::new("X", bid_levels(&bids), ask_levels(&asks));
            let mut reversed = forward.clone();
            reversed.bids.reverse();
            reversed.asks.reverse();

            let a = compute_statistics(&forward).unwrap();
            let b = compute_statistics(&reversed).unwrap();

            let tolerance = 1e-9 * (1.0 + a.bid_volume + a.ask_volume);
            prop_assert!((a.bid_volume - b.bid_volume).abs() <= tolerance);
            prop_assert!((a.ask_volume - b.ask_volume).abs() <= tolerance);
        });
    }

    /// Property: statistics are always finite, even with a side missing
    #[test]
    fn prop_statistics_always_finite() {
        proptest!(|(bids in prop::collection::vec(0.0..1_000.0_f64, 0..20),
                    asks in prop::collection::vec(0.0..1_000.0_f64, 0..20))| {
            let snapshot = OrderBookSnapshot::new("X", bid_levels(&bids), ask_levels(&asks));
            let stats = compute_statistics(&snapshot).unwrap();

            prop_assert!(stats.volume_ratio.is_finite());
            prop_assert!(stats.spread.is_finite());
            prop_assert!(stats.spread_pct.is_finite());
            prop_assert!(stats.imbalance >= -1.0 && stats.imbalance <= 1.0);

            if bids.is_empty() || asks.is_empty() {
                prop_assert_eq!(stats.spread, 0.0);
            }
        });
    }
}
