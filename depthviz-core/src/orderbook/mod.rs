//! Order book depth analysis
//!
//! - `snapshot`: the bid/ask snapshot handed over per render call
//! - `depth`: cumulative depth curves and level arithmetic
//! - `stats`: spread, volumes, ratio and the imbalance label
//!
//! Everything here is a pure, synchronous function of its input.

pub mod depth;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
mod depth_proptest;

pub use crate::core::{PriceLevel, Side};
pub use depth::{
    compute_depth_curve, mid_price, spread_bps, total_volume, validate_quantities, vwap,
    DepthCurve, DepthPoint,
};
pub use snapshot::OrderBookSnapshot;
pub use stats::{
    compute_statistics, compute_statistics_strict, compute_statistics_with,
    normalized_imbalance, volume_ratio, BookStatistics, ImbalanceLabel, ImbalanceThresholds,
};
