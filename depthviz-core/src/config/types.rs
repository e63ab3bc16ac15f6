use crate::orderbook::ImbalanceThresholds;
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub imbalance: ImbalanceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,
}

/// Chart appearance and HTML page options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Plotly layout template
    #[serde(default = "default_template")]
    pub template: String,

    /// Script source for Plotly.js in the generated page
    #[serde(default = "default_plotly_js_url")]
    pub plotly_js_url: String,

    /// Offset of the "last update" clock in the dashboard title
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    /// Label printed next to the clock
    #[serde(default = "default_timezone_label")]
    pub timezone_label: String,

    #[serde(default = "default_depth_width")]
    pub depth_width: u32,

    #[serde(default = "default_depth_height")]
    pub depth_height: u32,

    #[serde(default = "default_ratio_width")]
    pub ratio_width: u32,

    #[serde(default = "default_ratio_height")]
    pub ratio_height: u32,

    /// Candle timeframe of the ratio series in minutes
    #[serde(default = "default_candle_minutes")]
    pub candle_minutes: u32,

    /// Order-flow profile: widest bar length, in candles
    #[serde(default = "default_profile_scale")]
    pub profile_scale: f64,

    /// Order-flow profile: gap to the last candle, in candles
    #[serde(default = "default_profile_offset")]
    pub profile_offset: f64,
}

/// Imbalance label cut-offs on the normalized imbalance
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImbalanceConfig {
    #[serde(default = "default_strong_imbalance")]
    pub strong: f64,
    #[serde(default = "default_mild_imbalance")]
    pub mild: f64,
}

/// Where rendered pages go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl ChartConfig {
    /// Offset for the dashboard clock; UTC if the configured value is out of range
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

impl ImbalanceConfig {
    pub fn thresholds(&self) -> ImbalanceThresholds {
        ImbalanceThresholds {
            strong: self.strong,
            mild: self.mild,
        }
    }
}

// Default value functions
pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_template() -> String {
    "plotly_dark".to_string()
}

pub(crate) fn default_plotly_js_url() -> String {
    "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string()
}

pub(crate) fn default_utc_offset_minutes() -> i32 {
    240 // UTC+4, Dubai
}

pub(crate) fn default_timezone_label() -> String {
    "Dubai".to_string()
}

pub(crate) fn default_depth_width() -> u32 {
    1200
}

pub(crate) fn default_depth_height() -> u32 {
    600
}

pub(crate) fn default_ratio_width() -> u32 {
    2400
}

pub(crate) fn default_ratio_height() -> u32 {
    800
}

pub(crate) fn default_candle_minutes() -> u32 {
    15
}

pub(crate) fn default_profile_scale() -> f64 {
    20.0
}

pub(crate) fn default_profile_offset() -> f64 {
    5.0
}

pub(crate) fn default_strong_imbalance() -> f64 {
    0.30
}

pub(crate) fn default_mild_imbalance() -> f64 {
    0.10
}

pub(crate) fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            plotly_js_url: default_plotly_js_url(),
            utc_offset_minutes: default_utc_offset_minutes(),
            timezone_label: default_timezone_label(),
            depth_width: default_depth_width(),
            depth_height: default_depth_height(),
            ratio_width: default_ratio_width(),
            ratio_height: default_ratio_height(),
            candle_minutes: default_candle_minutes(),
            profile_scale: default_profile_scale(),
            profile_offset: default_profile_offset(),
        }
    }
}

impl Default for ImbalanceConfig {
    fn default() -> Self {
        Self {
            strong: default_strong_imbalance(),
            mild: default_mild_imbalance(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}
