//! Depthviz Core - Order Book Depth Analysis for Chart Rendering
//!
//! The analysis layer under the depthviz charts. It turns a bid/ask snapshot
//! into cumulative depth curves and summary statistics (spread, volumes,
//! bid/ask ratio, imbalance label), and reads the precomputed market tables
//! the charts draw.
//!
//! ## Design
//! - **Pure functions**: no shared state, no I/O in the analyzer
//! - **Explicit fallback**: a missing book side yields zeroed statistics
//!   flagged with `missing_sides`, never a NaN or an infinite ratio
//! - **Upstream owns the math**: indicators, levels and footprints arrive
//!   precomputed
//!
//! ## Core Modules
//! - `core`: book primitives (`Side`, `PriceLevel`) and `DepthError`
//! - `orderbook`: snapshot, depth curves, statistics
//! - `data`: market tables and snapshot validation
//! - `config`: file + environment configuration
//! - `utils`: logging setup

pub mod core;
pub mod config;
pub mod data;
pub mod orderbook;
pub mod utils;

// Re-export core types
pub use crate::core::{DepthError, PriceLevel, Side};

pub use orderbook::{
    compute_depth_curve, compute_statistics, compute_statistics_strict, BookStatistics,
    DepthCurve, ImbalanceLabel, ImbalanceThresholds, OrderBookSnapshot,
};

pub use data::{MarketTables, SnapshotValidator, TableError, ValidationError};

// Re-export error types
pub use anyhow::{Error, Result};

/// Prelude for convenient imports
pub mod prelude {
    // Book types
    pub use crate::core::{DepthError, PriceLevel, Side};

    // Analyzer
    pub use crate::orderbook::{
        compute_depth_curve, compute_statistics, BookStatistics, DepthCurve, ImbalanceLabel,
        OrderBookSnapshot,
    };

    // Tables
    pub use crate::data::MarketTables;

    // Configuration
    pub use crate::config::Config;

    // Error types
    pub use crate::{Error, Result};
}
