//! Summary statistics for an order book snapshot
//!
//! ## Missing sides
//!
//! A snapshot with an empty bid or ask side is not an error on the default
//! path. The missing side contributes zero volume. Spread, spread
//! percentage and normalized imbalance are reported as 0, and the label is
//! `InsufficientData`.
//! `BookStatistics::missing_sides` records which side was absent so the
//! renderer can tell "no data" apart from "flat market".
//!
//! Callers that would rather fail use [`compute_statistics_strict`].
//!
//! ## Volume ratio
//!
//! `bid_volume / ask_volume`, defined as 0 when `ask_volume` is 0 so the
//! displayed value never becomes infinite or NaN.

use super::depth::{mid_price, total_volume, validate_quantities};
use super::snapshot::OrderBookSnapshot;
use crate::core::{DepthError, Side};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Normalized imbalance cut-offs for [`ImbalanceLabel`]
///
/// Normalized imbalance is `(bid - ask) / (bid + ask)`, in [-1, +1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceThresholds {
    /// Beyond this (in absolute value) the pressure is "strong"
    pub strong: f64,
    /// Beyond this (in absolute value) the book leans to one side
    pub mild: f64,
}

impl Default for ImbalanceThresholds {
    fn default() -> Self {
        Self {
            strong: 0.30,
            mild: 0.10,
        }
    }
}

impl ImbalanceThresholds {
    /// `0 < mild < strong <= 1`
    pub fn is_valid(&self) -> bool {
        self.mild > 0.0 && self.mild < self.strong && self.strong <= 1.0
    }
}

/// Qualitative reading of bid vs ask volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImbalanceLabel {
    StrongBuyPressure,
    BuyPressure,
    Balanced,
    SellPressure,
    StrongSellPressure,
    InsufficientData,
}

impl ImbalanceLabel {
    /// Classify a normalized imbalance in [-1, +1]
    ///
    /// Non-finite input classifies as `InsufficientData`.
    pub fn from_normalized(imbalance: f64, thresholds: &ImbalanceThresholds) -> Self {
        match imbalance {
            i if !i.is_finite() => ImbalanceLabel::InsufficientData,
            i if i > thresholds.strong => ImbalanceLabel::StrongBuyPressure,
            i if i > thresholds.mild => ImbalanceLabel::BuyPressure,
            i if i < -thresholds.strong => ImbalanceLabel::StrongSellPressure,
            i if i < -thresholds.mild => ImbalanceLabel::SellPressure,
            _ => ImbalanceLabel::Balanced,
        }
    }

    /// Classify from side volumes; no volume at all is `InsufficientData`
    pub fn classify(bid_volume: f64, ask_volume: f64, thresholds: &ImbalanceThresholds) -> Self {
        match normalized_imbalance(bid_volume, ask_volume) {
            Some(imbalance) => Self::from_normalized(imbalance, thresholds),
            None => ImbalanceLabel::InsufficientData,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImbalanceLabel::StrongBuyPressure => "Strong Buy Pressure",
            ImbalanceLabel::BuyPressure => "Buy Pressure",
            ImbalanceLabel::Balanced => "Balanced",
            ImbalanceLabel::SellPressure => "Sell Pressure",
            ImbalanceLabel::StrongSellPressure => "Strong Sell Pressure",
            ImbalanceLabel::InsufficientData => "Insufficient Data",
        }
    }
}

impl fmt::Display for ImbalanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(bid - ask) / (bid + ask)`, None when there is no volume at all
#[inline]
pub fn normalized_imbalance(bid_volume: f64, ask_volume: f64) -> Option<f64> {
    let total = bid_volume + ask_volume;
    if total <= 0.0 {
        return None;
    }
    Some((bid_volume - ask_volume) / total)
}

/// `bid / ask`, 0 when ask volume is 0
#[inline]
pub fn volume_ratio(bid_volume: f64, ask_volume: f64) -> f64 {
    if ask_volume > 0.0 {
        bid_volume / ask_volume
    } else {
        0.0
    }
}

/// Aggregate view of a snapshot for the stats overlay and chart titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookStatistics {
    pub bid_volume: f64,
    pub ask_volume: f64,
    /// best_ask - best_bid, 0 unless both sides exist
    pub spread: f64,
    /// spread / best_bid * 100, 0 unless both sides exist and best_bid > 0
    pub spread_pct: f64,
    /// bid_volume / ask_volume, 0 when ask_volume is 0
    pub volume_ratio: f64,
    pub imbalance_label: ImbalanceLabel,

    /// (bid - ask) / (bid + ask), 0 without volume
    pub imbalance: f64,
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    /// Mid price, 0 unless both sides exist
    pub mid_price: f64,
    /// Sides that had zero levels; the fallback policy was applied to them
    pub missing_sides: Vec<Side>,
}

impl BookStatistics {
    /// At least one side was missing, so the numbers are placeholders
    pub fn is_degenerate(&self) -> bool {
        !self.missing_sides.is_empty()
    }
}

/// Statistics with default imbalance thresholds
///
/// See the module docs for the missing-side policy.
///
/// # Errors
/// `InvalidInput` when any level on either side has a negative or
/// non-finite quantity.
pub fn compute_statistics(snapshot: &OrderBookSnapshot) -> Result<BookStatistics, DepthError> {
    compute_statistics_with(snapshot, &ImbalanceThresholds::default())
}

/// Statistics with caller supplied imbalance thresholds
pub fn compute_statistics_with(
    snapshot: &OrderBookSnapshot,
    thresholds: &ImbalanceThresholds,
) -> Result<BookStatistics, DepthError> {
    validate_quantities(&snapshot.bids).map_err(|e| e.on_side(Side::Bid))?;
    validate_quantities(&snapshot.asks).map_err(|e| e.on_side(Side::Ask))?;

    let bid_volume = total_volume(&snapshot.bids);
    let ask_volume = total_volume(&snapshot.asks);

    let best_bid = snapshot.best_bid().map(|l| l.price);
    let best_ask = snapshot.best_ask().map(|l| l.price);

    let (spread, spread_pct, mid) = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) => {
            let spread = ask - bid;
            let spread_pct = if bid > 0.0 { spread / bid * 100.0 } else { 0.0 };
            (spread, spread_pct, mid_price(bid, ask))
        }
        _ => (0.0, 0.0, 0.0),
    };

    let missing_sides = snapshot.missing_sides();
    let (imbalance, imbalance_label) = if missing_sides.is_empty() {
        (
            normalized_imbalance(bid_volume, ask_volume).unwrap_or(0.0),
            ImbalanceLabel::classify(bid_volume, ask_volume, thresholds),
        )
    } else {
        warn!(
            symbol = %snapshot.symbol,
            missing = ?missing_sides,
            "Order book side missing, reporting zeroed spread and imbalance"
        );
        (0.0, ImbalanceLabel::InsufficientData)
    };

    let stats = BookStatistics {
        bid_volume,
        ask_volume,
        spread,
        spread_pct,
        volume_ratio: volume_ratio(bid_volume, ask_volume),
        imbalance_label,
        imbalance,
        best_bid,
        best_ask,
        mid_price: mid,
        missing_sides,
    };

    debug!(
        symbol = %snapshot.symbol,
        bid_volume = stats.bid_volume,
        ask_volume = stats.ask_volume,
        spread = stats.spread,
        ratio = stats.volume_ratio,
        label = %stats.imbalance_label,
        "Computed book statistics"
    );

    Ok(stats)
}

/// Statistics that refuse a book with a missing side
///
/// # Errors
/// * `EmptyBook { side }` for the first side (bids first) with zero levels
/// * `InvalidInput` as in [`compute_statistics`]
pub fn compute_statistics_strict(
    snapshot: &OrderBookSnapshot,
) -> Result<BookStatistics, DepthError> {
    if let Some(side) = snapshot.missing_sides().into_iter().next() {
        return Err(DepthError::EmptyBook { side });
    }
    compute_statistics(snapshot)
}
