//! Cumulative depth analysis for order book sides
//!
//! Pure functions over level slices. Levels are expected in touch order
//! (bids descending, asks ascending) but nothing here re-sorts them: the
//! curve follows the order it is given.

use crate::core::{DepthError, PriceLevel, SideLabel};
use serde::{Deserialize, Serialize};

/// One point of a depth curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthPoint {
    pub price: f64,
    pub cumulative_quantity: f64,
}

/// Cumulative quantity as a function of distance from the best quote
///
/// `cumulative_quantity` is non-decreasing along the curve and the last
/// point carries the total quantity of the side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepthCurve {
    points: Vec<DepthPoint>,
}

impl DepthCurve {
    pub fn points(&self) -> &[DepthPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Prices in curve order (x axis of the depth chart)
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Cumulative quantities in curve order (y axis of the depth chart)
    pub fn cumulative(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_quantity).collect()
    }

    /// Total quantity of the side, 0 for an empty curve
    pub fn total(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.cumulative_quantity)
    }
}

/// Check every level has a finite, non-negative quantity
///
/// # Returns
/// * `Err(DepthError::InvalidInput)` naming the first offending level
#[inline]
pub fn validate_quantities(levels: &[PriceLevel]) -> Result<(), DepthError> {
    match levels.iter().position(|l| !l.has_valid_quantity()) {
        Some(level) => Err(DepthError::InvalidInput {
            side: SideLabel::Unknown,
            level,
            quantity: levels[level].quantity,
        }),
        None => Ok(()),
    }
}

/// Running cumulative sum of quantities
///
/// `cumulative_quantity[i] = quantity[0] + ... + quantity[i]`
///
/// # Errors
/// `InvalidInput` when any quantity is negative, NaN or infinite. Nothing
/// is computed in that case.
///
/// # Example
/// ```
/// use depthviz_core::core::PriceLevel;
/// use depthviz_core::orderbook::compute_depth_curve;
///
/// let bids = [PriceLevel::new(100.0, 2.0), PriceLevel::new(99.0, 3.0)];
/// let curve = compute_depth_curve(&bids).unwrap();
/// assert_eq!(curve.cumulative(), vec![2.0, 5.0]);
/// ```
pub fn compute_depth_curve(levels: &[PriceLevel]) -> Result<DepthCurve, DepthError> {
    validate_quantities(levels)?;

    let mut cumsum = 0.0;
    let points = levels
        .iter()
        .map(|level| {
            cumsum += level.quantity;
            DepthPoint {
                price: level.price,
                cumulative_quantity: cumsum,
            }
        })
        .collect();

    Ok(DepthCurve { points })
}

/// Sum of quantities on a side
///
/// Order independent. Does not validate; callers that need the negative
/// check go through [`compute_depth_curve`] or [`validate_quantities`].
#[inline]
pub fn total_volume(levels: &[PriceLevel]) -> f64 {
    levels.iter().map(|l| l.quantity).sum()
}

/// Volume-weighted average price over the first `max_levels` levels
///
/// # Returns
/// * `Some(vwap)` - weighted average price
/// * `None` - no liquidity in the window
#[inline]
pub fn vwap(levels: &[PriceLevel], max_levels: usize) -> Option<f64> {
    let mut total_value = 0.0;
    let mut total_size = 0.0;

    for level in levels.iter().take(max_levels) {
        total_value += level.notional();
        total_size += level.quantity;
    }

    if total_size <= 0.0 {
        return None;
    }

    Some(total_value / total_size)
}

/// Mid price from best bid and ask
#[inline(always)]
pub fn mid_price(best_bid: f64, best_ask: f64) -> f64 {
    (best_bid + best_ask) / 2.0
}

/// Spread in basis points of the best bid
///
/// Returns 0 when the bid price is not positive.
#[inline(always)]
pub fn spread_bps(best_bid: f64, best_ask: f64) -> f64 {
    if best_bid <= 0.0 {
        return 0.0;
    }
    (best_ask - best_bid) / best_bid * 10_000.0
}
