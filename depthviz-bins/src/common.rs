//! Common utilities for all binaries
//!
//! Shared CLI arguments, configuration loading and logging setup.

use anyhow::{Context, Result};
use clap::Args;
use depthviz_core::config::Config;
use depthviz_core::utils::init_from_config;
use std::path::{Path, PathBuf};

/// Common CLI arguments for all binaries
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Configuration file (TOML); defaults and DEPTHVIZ__* env vars apply without one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl CommonArgs {
    /// Load configuration, apply command line overrides, then validate
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_unvalidated(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load default configuration".to_string(),
        })?;

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.json_logs = true;
        }
        config.normalize();
        config.validate()?;

        Ok(config)
    }
}

/// Load configuration and initialize logging
pub fn setup(args: &CommonArgs) -> Result<Config> {
    let config = args.load_config()?;
    init_from_config(&config.logging)?;

    tracing::debug!(config = ?args.config, "Configuration loaded");
    Ok(config)
}

/// Explicit output path, or `default_name` inside the configured output dir
pub fn resolve_output(config: &Config, output: Option<&Path>, default_name: &str) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => config.output.dir.join(default_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_override() {
        let args = CommonArgs {
            log_level: Some("debug".to_string()),
            ..CommonArgs::default()
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_log_level_override_rescues_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depthviz.toml");
        std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

        let args = CommonArgs {
            config: Some(path),
            log_level: Some("WARN".to_string()),
            ..CommonArgs::default()
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let args = CommonArgs {
            log_level: Some("chatty".to_string()),
            ..CommonArgs::default()
        };
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_resolve_output() {
        let config = Config::default();
        assert_eq!(
            resolve_output(&config, None, "orderbook_depth.html"),
            PathBuf::from("./orderbook_depth.html")
        );
        assert_eq!(
            resolve_output(&config, Some(Path::new("/tmp/x.html")), "orderbook_depth.html"),
            PathBuf::from("/tmp/x.html")
        );
    }
}
