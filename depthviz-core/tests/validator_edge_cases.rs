//! Edge cases for snapshot validation ahead of charting

use depthviz_core::data::{SnapshotValidator, ValidationConfig, ValidationError};
use depthviz_core::orderbook::{compute_statistics, OrderBookSnapshot};
use depthviz_core::Side;

#[test]
fn test_one_sided_book_validates_and_charts() {
    let mut validator = SnapshotValidator::new();
    let snapshot = OrderBookSnapshot::from_pairs("ETHUSDT", &[], &[(101.0, 1.0), (102.0, 4.0)]);

    assert!(validator.validate(&snapshot).is_ok());
    let stats = compute_statistics(&snapshot).unwrap();
    assert_eq!(stats.missing_sides, vec![Side::Bid]);
    assert_eq!(stats.volume_ratio, 0.0);
}

#[test]
fn test_nan_price_rejected() {
    let mut validator = SnapshotValidator::new();
    let snapshot = OrderBookSnapshot::from_pairs("X", &[(f64::NAN, 1.0)], &[(101.0, 1.0)]);

    assert!(matches!(
        validator.validate(&snapshot),
        Err(ValidationError::InvalidPrice { side: Side::Bid, level: 0, .. })
    ));
}

#[test]
fn test_infinite_quantity_rejected() {
    let mut validator = SnapshotValidator::new();
    let snapshot = OrderBookSnapshot::from_pairs("X", &[(100.0, 1.0)], &[(101.0, f64::INFINITY)]);

    assert!(matches!(
        validator.validate(&snapshot),
        Err(ValidationError::NegativeQuantity { side: Side::Ask, level: 0, .. })
    ));
}

#[test]
fn test_zero_quantity_level_is_valid() {
    let mut validator = SnapshotValidator::new();
    let snapshot = OrderBookSnapshot::from_pairs("X", &[(100.0, 0.0)], &[(101.0, 1.0)]);

    assert!(validator.validate(&snapshot).is_ok());
}

#[test]
fn test_duplicate_price_is_unsorted() {
    let mut validator = SnapshotValidator::new();
    let snapshot = OrderBookSnapshot::from_pairs("X", &[(100.0, 1.0), (100.0, 2.0)], &[(101.0, 1.0)]);

    assert_eq!(
        validator.validate(&snapshot),
        Err(ValidationError::Unsorted { side: Side::Bid, level: 1 })
    );
}

#[test]
fn test_unsorted_allowed_when_ordering_disabled() {
    let mut validator = SnapshotValidator::with_config(ValidationConfig {
        check_ordering: false,
        ..ValidationConfig::default()
    });
    let snapshot = OrderBookSnapshot::from_pairs("X", &[(99.0, 1.0), (100.0, 2.0)], &[(101.0, 1.0)]);

    assert!(validator.validate(&snapshot).is_ok());
    // Normalizing puts the touch first again
    assert_eq!(snapshot.normalized().best_bid().unwrap().price, 100.0);
}

#[test]
fn test_locked_book_policy() {
    let snapshot = OrderBookSnapshot::from_pairs("X", &[(100.0, 1.0)], &[(100.0, 1.0)]);

    let mut lenient = SnapshotValidator::new();
    assert!(lenient.validate(&snapshot).is_ok());

    let mut strict = SnapshotValidator::with_config(ValidationConfig {
        allow_locked: false,
        ..ValidationConfig::default()
    });
    assert_eq!(
        strict.validate(&snapshot),
        Err(ValidationError::Locked { price: 100.0 })
    );
}

#[test]
fn test_min_levels_ignores_empty_side() {
    let mut validator = SnapshotValidator::with_config(ValidationConfig {
        min_levels: 2,
        ..ValidationConfig::default()
    });

    let empty_asks = OrderBookSnapshot::from_pairs("X", &[(100.0, 1.0), (99.0, 1.0)], &[]);
    assert!(validator.validate(&empty_asks).is_ok());

    let thin_asks = OrderBookSnapshot::from_pairs("X", &[(100.0, 1.0), (99.0, 1.0)], &[(101.0, 1.0)]);
    assert!(matches!(
        validator.validate(&thin_asks),
        Err(ValidationError::TooFewLevels { side: Side::Ask, levels: 1, min_levels: 2 })
    ));
}

#[test]
fn test_snapshot_count_only_counts_valid() {
    let mut validator = SnapshotValidator::new();
    let good = OrderBookSnapshot::from_pairs("X", &[(100.0, 1.0)], &[(101.0, 1.0)]);
    let crossed = OrderBookSnapshot::from_pairs("X", &[(102.0, 1.0)], &[(101.0, 1.0)]);

    validator.validate(&good).unwrap();
    assert!(validator.validate(&crossed).is_err());
    validator.validate(&good).unwrap();

    assert_eq!(validator.snapshot_count(), 2);
}
