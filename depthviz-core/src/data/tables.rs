//! Precomputed market-data tables
//!
//! Everything in here is produced upstream (candle aggregation, indicator
//! columns, level detection, footprint classification) and only read by
//! this crate. Tables are JSON arrays of row objects; timestamps are
//! RFC 3339 strings.

use crate::orderbook::OrderBookSnapshot;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Failures while reading a table from disk
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("required table {path} not found")]
    Missing { path: PathBuf },
}

/// One OHLCV bar of the reference market (BTC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<f64>,
}

/// One bar of the altcoin ratio series plus its indicator columns
///
/// Indicator columns are `None` during their warm-up window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioCandle {
    pub datetime: DateTime<Utc>,
    pub ar_open: f64,
    pub ar_high: f64,
    pub ar_low: f64,
    pub ar_close: f64,
    #[serde(default)]
    pub sma20: Option<f64>,
    #[serde(default)]
    pub ema21: Option<f64>,
    #[serde(default)]
    pub sma50: Option<f64>,
}

/// A detected support or resistance price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRow {
    pub price: f64,
}

/// Buy-side and sell-side liquidity prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LiquidityLevels {
    #[serde(default)]
    pub bsl: Option<f64>,
    #[serde(default)]
    pub ssl: Option<f64>,
}

/// Footprint classification of one bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintBar {
    pub datetime: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    #[serde(default)]
    pub is_aggressive_buy: bool,
    #[serde(default)]
    pub is_aggressive_sell: bool,
    #[serde(default)]
    pub is_trap: bool,
}

/// One price bucket of the order-flow volume profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderFlowRow {
    pub price_bottom: f64,
    pub price_top: f64,
    pub buy_volume: f64,
    pub sell_volume: f64,
}

/// Everything one dashboard render needs
#[derive(Debug, Clone, Default)]
pub struct MarketTables {
    pub btc: Vec<Candle>,
    pub ratio: Vec<RatioCandle>,
    pub supports: Vec<LevelRow>,
    pub resistances: Vec<LevelRow>,
    pub liquidity: Option<LiquidityLevels>,
    pub footprint: Vec<FootprintBar>,
    pub profile: Vec<OrderFlowRow>,
    pub orderbook: Option<OrderBookSnapshot>,
}

impl MarketTables {
    pub const BTC_FILE: &'static str = "btc.json";
    pub const RATIO_FILE: &'static str = "ratio.json";
    pub const SUPPORTS_FILE: &'static str = "supports.json";
    pub const RESISTANCES_FILE: &'static str = "resistances.json";
    pub const LIQUIDITY_FILE: &'static str = "liquidity.json";
    pub const FOOTPRINT_FILE: &'static str = "footprint.json";
    pub const PROFILE_FILE: &'static str = "profile.json";
    pub const ORDERBOOK_FILE: &'static str = "orderbook.json";

    /// Load every table from a directory
    ///
    /// `ratio.json` is required; every other file is optional and an absent
    /// file yields an empty table.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, TableError> {
        let dir = dir.as_ref();

        let ratio_path = dir.join(Self::RATIO_FILE);
        if !ratio_path.exists() {
            return Err(TableError::Missing { path: ratio_path });
        }

        let tables = Self {
            btc: load_optional(&dir.join(Self::BTC_FILE))?.unwrap_or_default(),
            ratio: load_json(&ratio_path)?,
            supports: load_optional(&dir.join(Self::SUPPORTS_FILE))?.unwrap_or_default(),
            resistances: load_optional(&dir.join(Self::RESISTANCES_FILE))?.unwrap_or_default(),
            liquidity: load_optional(&dir.join(Self::LIQUIDITY_FILE))?,
            footprint: load_optional(&dir.join(Self::FOOTPRINT_FILE))?.unwrap_or_default(),
            profile: load_optional(&dir.join(Self::PROFILE_FILE))?.unwrap_or_default(),
            orderbook: load_optional(&dir.join(Self::ORDERBOOK_FILE))?,
        };

        info!(
            dir = %dir.display(),
            btc = tables.btc.len(),
            ratio = tables.ratio.len(),
            supports = tables.supports.len(),
            resistances = tables.resistances.len(),
            footprint = tables.footprint.len(),
            orderbook = tables.orderbook.is_some(),
            "Loaded market tables"
        );

        Ok(tables)
    }

    /// Timestamp of the last ratio bar
    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.ratio.last().map(|c| c.datetime)
    }
}

/// Read and deserialize a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, TableError> {
    let raw = fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value = serde_json::from_str(&raw).map_err(|source| TableError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), bytes = raw.len(), "Read table");
    Ok(value)
}

/// Like [`load_json`] but an absent file is `Ok(None)`
pub fn load_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, TableError> {
    if !path.exists() {
        debug!(path = %path.display(), "Optional table absent");
        return Ok(None);
    }
    load_json(path).map(Some)
}

/// Read an order book snapshot file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<OrderBookSnapshot, TableError> {
    load_json(path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_candle_nullable_indicators() {
        let json = r#"[
            {"datetime":"2024-05-01T00:00:00Z","ar_open":1.0,"ar_high":1.2,"ar_low":0.9,"ar_close":1.1,"sma20":null},
            {"datetime":"2024-05-01T00:15:00Z","ar_open":1.1,"ar_high":1.3,"ar_low":1.0,"ar_close":1.2,"sma20":1.05,"ema21":1.06,"sma50":1.01}
        ]"#;
        let rows: Vec<RatioCandle> = serde_json::from_str(json).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sma20, None);
        assert_eq!(rows[0].ema21, None);
        assert_eq!(rows[1].sma50, Some(1.01));
    }

    #[test]
    fn test_footprint_flags_default_false() {
        let json = r#"{"datetime":"2024-05-01T00:00:00Z","low":1.0,"high":2.0,"is_trap":true}"#;
        let bar: FootprintBar = serde_json::from_str(json).unwrap();

        assert!(bar.is_trap);
        assert!(!bar.is_aggressive_buy);
        assert!(!bar.is_aggressive_sell);
    }

    #[test]
    fn test_liquidity_partial() {
        let levels: LiquidityLevels = serde_json::from_str(r#"{"bsl": 105.5}"#).unwrap();
        assert_eq!(levels.bsl, Some(105.5));
        assert_eq!(levels.ssl, None);
    }
}
