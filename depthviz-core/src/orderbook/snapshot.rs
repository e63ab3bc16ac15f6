//! Order book snapshot as handed over by the upstream fetcher
//!
//! A snapshot is received fresh per render call and never mutated. All
//! derived structures (curves, statistics) are recomputed from it.

use super::depth::{compute_depth_curve, DepthCurve};
use crate::core::{DepthError, PriceLevel, Side};
use serde::{Deserialize, Serialize};

/// Bid/ask levels for one symbol
///
/// - `bids` sorted descending by price: [best, ..., worst]
/// - `asks` sorted ascending by price: [best, ..., worst]
///
/// JSON shape: `{"symbol": "BTCUSDT", "bids": [[p, q], ...], "asks": [[p, q], ...]}`.
/// A missing side deserializes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub symbol: String,

    #[serde(default)]
    pub bids: Vec<PriceLevel>,

    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    pub fn new(symbol: impl Into<String>, bids: Vec<PriceLevel>, asks: Vec<PriceLevel>) -> Self {
        Self {
            symbol: symbol.into(),
            bids,
            asks,
        }
    }

    /// Build from raw `(price, quantity)` pairs
    pub fn from_pairs(symbol: impl Into<String>, bids: &[(f64, f64)], asks: &[(f64, f64)]) -> Self {
        Self::new(
            symbol,
            bids.iter().copied().map(PriceLevel::from).collect(),
            asks.iter().copied().map(PriceLevel::from).collect(),
        )
    }

    /// Levels of one side in touch order
    #[inline]
    pub fn levels(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Best bid level (first bid)
    #[inline]
    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.first().copied()
    }

    /// Best ask level (first ask)
    #[inline]
    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.first().copied()
    }

    /// Both sides empty
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Sides with zero levels, bids first
    pub fn missing_sides(&self) -> Vec<Side> {
        [Side::Bid, Side::Ask]
            .into_iter()
            .filter(|side| self.levels(*side).is_empty())
            .collect()
    }

    /// Best bid >= best ask (only meaningful when both sides exist)
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Cumulative depth curve of one side
    pub fn depth_curve(&self, side: Side) -> Result<DepthCurve, DepthError> {
        compute_depth_curve(self.levels(side)).map_err(|e| e.on_side(side))
    }

    /// Bid and ask depth curves
    pub fn depth_curves(&self) -> Result<(DepthCurve, DepthCurve), DepthError> {
        Ok((self.depth_curve(Side::Bid)?, self.depth_curve(Side::Ask)?))
    }

    /// Copy with both sides re-sorted by distance from the touch and
    /// zero-quantity levels dropped
    ///
    /// Upstream fetchers occasionally deliver asks in descending order or
    /// keep emptied levels around; the charts want neither.
    pub fn normalized(&self) -> Self {
        let mut bids: Vec<PriceLevel> = self
            .bids
            .iter()
            .copied()
            .filter(|l| l.quantity != 0.0)
            .collect();
        let mut asks: Vec<PriceLevel> = self
            .asks
            .iter()
            .copied()
            .filter(|l| l.quantity != 0.0)
            .collect();

        bids.sort_by(|a, b| b.price.total_cmp(&a.price));
        asks.sort_by(|a, b| a.price.total_cmp(&b.price));

        Self {
            symbol: self.symbol.clone(),
            bids,
            asks,
        }
    }

    /// Keep only the first `max_levels` levels per side
    pub fn truncated(&self, max_levels: usize) -> Self {
        Self {
            symbol: self.symbol.clone(),
            bids: self.bids.iter().take(max_levels).copied().collect(),
            asks: self.asks.iter().take(max_levels).copied().collect(),
        }
    }
}
