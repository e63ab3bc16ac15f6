//! Book primitives shared by the analyzer, the validator and the charts
//!
//! Prices and quantities are plain `f64`: snapshots arrive as JSON numbers
//! from upstream tooling and leave as JSON numbers in the figure document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// True when `a` is closer to the touch than `b` on this side
    ///
    /// Bids improve upwards, asks improve downwards.
    #[inline(always)]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Ask => a < b,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// One (price, quantity) level
///
/// Serialized as a two element array `[price, quantity]`, the shape the
/// upstream snapshot fetcher emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: f64,
}

impl PriceLevel {
    #[inline(always)]
    pub const fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// Quantity is finite and not negative
    #[inline(always)]
    pub fn has_valid_quantity(&self) -> bool {
        self.quantity.is_finite() && self.quantity >= 0.0
    }

    /// Notional value at this level (price * quantity)
    #[inline(always)]
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }
}

impl From<(f64, f64)> for PriceLevel {
    fn from((price, quantity): (f64, f64)) -> Self {
        Self { price, quantity }
    }
}

impl From<PriceLevel> for (f64, f64) {
    fn from(level: PriceLevel) -> Self {
        (level.price, level.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_serializes_as_pair() {
        let level = PriceLevel::new(100.5, 2.0);
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(json, "[100.5,2.0]");

        let back: PriceLevel = serde_json::from_str("[99, 3]").unwrap();
        assert_eq!(back, PriceLevel::new(99.0, 3.0));
    }

    #[test]
    fn test_side_ordering() {
        assert!(Side::Bid.is_better(101.0, 100.0));
        assert!(Side::Ask.is_better(100.0, 101.0));
        assert!(!Side::Ask.is_better(100.0, 100.0));
    }

    #[test]
    fn test_quantity_validity() {
        assert!(PriceLevel::new(1.0, 0.0).has_valid_quantity());
        assert!(!PriceLevel::new(1.0, -0.1).has_valid_quantity());
        assert!(!PriceLevel::new(1.0, f64::NAN).has_valid_quantity());
        assert!(!PriceLevel::new(1.0, f64::INFINITY).has_valid_quantity());
    }
}
