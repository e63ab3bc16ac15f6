//! Inputs handed over by upstream tooling
//!
//! - `tables`: OHLCV, indicator, level, footprint and profile tables
//! - `validator`: structural checks on order book snapshots

pub mod tables;
pub mod validator;

pub use tables::{
    load_json, load_optional, load_snapshot, Candle, FootprintBar, LevelRow, LiquidityLevels,
    MarketTables, OrderFlowRow, RatioCandle, TableError,
};
pub use validator::{SnapshotValidator, ValidationConfig, ValidationError};
