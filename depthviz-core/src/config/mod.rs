pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use config::{Config as ConfigLoader, Environment, File};
use std::path::Path;

const MAX_CANDLE_MINUTES: u32 = 1440;
const MAX_PROFILE_CANDLES: f64 = 1000.0;

impl Config {
    /// Load configuration from file with environment variable overrides
    ///
    /// Precedence: built-in defaults, then the TOML file, then
    /// `DEPTHVIZ__SECTION__KEY` environment variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_from(Some(path.as_ref()))
    }

    /// Load defaults plus environment overrides, with an optional file
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut cfg = Self::load_unvalidated(path)?;
        cfg.normalize();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Same layering as [`Config::load_from`] without normalization or
    /// validation, for callers that apply their own overrides first
    pub fn load_unvalidated(path: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder()
            // Start with default values
            .set_default("logging.level", types::default_log_level())?
            .set_default("logging.json_logs", false)?
            .set_default("chart.template", types::default_template())?
            .set_default("chart.plotly_js_url", types::default_plotly_js_url())?
            .set_default("chart.utc_offset_minutes", types::default_utc_offset_minutes() as i64)?
            .set_default("chart.timezone_label", types::default_timezone_label())?
            .set_default("imbalance.strong", types::default_strong_imbalance())?
            .set_default("imbalance.mild", types::default_mild_imbalance())?
            .set_default("output.dir", ".")?;

        if let Some(path) = path {
            // Load from TOML file
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            // Override with environment variables (DEPTHVIZ__)
            .add_source(Environment::with_prefix("DEPTHVIZ").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        // Deserialize into Config struct
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Canonicalize free-form values (log level case and padding)
    pub fn normalize(&mut self) {
        self.logging.level = self.logging.level.trim().to_ascii_lowercase();
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}', must be one of: {:?}",
                self.logging.level,
                valid_log_levels
            );
        }

        // Validate imbalance thresholds
        if !self.imbalance.thresholds().is_valid() {
            anyhow::bail!(
                "Invalid imbalance thresholds: need 0 < mild ({}) < strong ({}) <= 1",
                self.imbalance.mild,
                self.imbalance.strong
            );
        }

        // Validate chart dimensions
        let chart = &self.chart;
        if chart.depth_width == 0
            || chart.depth_height == 0
            || chart.ratio_width == 0
            || chart.ratio_height == 0
        {
            anyhow::bail!("Chart dimensions must be positive");
        }

        // At most one day per candle
        if !(1..=MAX_CANDLE_MINUTES).contains(&chart.candle_minutes) {
            anyhow::bail!(
                "candle_minutes {} outside 1..={}",
                chart.candle_minutes,
                MAX_CANDLE_MINUTES
            );
        }

        // Profile bars are measured in candles from the last timestamp
        let scale_ok = chart.profile_scale > 0.0 && chart.profile_scale <= MAX_PROFILE_CANDLES;
        let offset_ok = (0.0..=MAX_PROFILE_CANDLES).contains(&chart.profile_offset);
        if !scale_ok || !offset_ok {
            anyhow::bail!(
                "Invalid profile geometry: scale={} offset={}, both must lie within 0..={} candles",
                chart.profile_scale,
                chart.profile_offset,
                MAX_PROFILE_CANDLES
            );
        }

        // UTC-12:00 ..= UTC+14:00
        if !(-720..=840).contains(&chart.utc_offset_minutes) {
            anyhow::bail!(
                "utc_offset_minutes {} outside -720..=840",
                chart.utc_offset_minutes
            );
        }

        if chart.plotly_js_url.trim().is_empty() {
            anyhow::bail!("plotly_js_url must not be empty");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chart.utc_offset().local_minus_utc(), 4 * 3600);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Invalid log level
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
        config.logging.level = "debug".to_string();
        assert!(config.validate().is_ok());

        // Inverted thresholds
        config.imbalance.mild = 0.5;
        assert!(config.validate().is_err());
        config.imbalance.mild = 0.1;

        // Zero-sized chart
        config.chart.depth_height = 0;
        assert!(config.validate().is_err());
        config.chart.depth_height = 600;

        // Offset out of range
        config.chart.utc_offset_minutes = 900;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_geometry_bounds() {
        let mut config = Config::default();

        config.chart.profile_scale = 1e12;
        assert!(config.validate().is_err());
        config.chart.profile_scale = f64::NAN;
        assert!(config.validate().is_err());
        config.chart.profile_scale = 1000.0;
        assert!(config.validate().is_ok());

        config.chart.profile_offset = f64::INFINITY;
        assert!(config.validate().is_err());
        config.chart.profile_offset = 5.0;

        config.chart.candle_minutes = 0;
        assert!(config.validate().is_err());
        config.chart.candle_minutes = 1441;
        assert!(config.validate().is_err());
        config.chart.candle_minutes = 1440;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "warn"

[chart]
timezone_label = "UTC"
utc_offset_minutes = 0

[imbalance]
strong = 0.5
mild = 0.2
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.chart.timezone_label, "UTC");
        assert_eq!(config.chart.utc_offset_minutes, 0);
        assert_eq!(config.imbalance.strong, 0.5);
        // Untouched sections keep their defaults
        assert_eq!(config.chart.template, "plotly_dark");
        assert_eq!(config.chart.depth_height, 600);
    }

    #[test]
    fn test_load_accepts_uppercase_log_level() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"DEBUG\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_unvalidated_keeps_raw_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"loud\"").unwrap();

        let config = Config::load_unvalidated(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "loud");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"loud\"").unwrap();

        assert!(Config::load(file.path()).is_err());
    }
}
