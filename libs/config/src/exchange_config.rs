//! Exchange Configuration Module
//!
//! Layered loading: built-in defaults, then an optional TOML file, then
//! environment variables (`PAIRSWAP_GUARD__MAX_PRICE_IMPACT_BPS=250`).

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "PAIRSWAP";

/// Hard ceiling on pre-trade price impact (3%)
pub const DEFAULT_MAX_PRICE_IMPACT_BPS: u32 = 300;

/// Hard ceiling on a caller-supplied slippage tolerance (5%)
pub const DEFAULT_MAX_SLIPPAGE_TOLERANCE_BPS: u32 = 500;

/// Basis points in 100%
const MAX_BPS: u32 = 10_000;

/// Main exchange configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Slippage guard ceilings
    pub guard: GuardConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

/// Risk thresholds enforced by the slippage guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Trades whose quoted impact exceeds this are rejected before execution
    pub max_price_impact_bps: u32,
    /// Largest slippage tolerance a caller may request
    pub max_slippage_tolerance_bps: u32,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_price_impact_bps: DEFAULT_MAX_PRICE_IMPACT_BPS,
            max_slippage_tolerance_bps: DEFAULT_MAX_SLIPPAGE_TOLERANCE_BPS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ExchangeConfig {
    /// Load defaults, an optional TOML file and `PAIRSWAP_` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?,
        );

        if let Some(path) = path {
            info!("Loading exchange config: {:?}", path);
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        // Override with environment variables (PAIRSWAP_ prefix, __ between sections)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "Exchange configuration loaded");
        Ok(config)
    }

    /// Load defaults overlaid with a TOML file, ignoring the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.guard.max_price_impact_bps == 0 || self.guard.max_price_impact_bps > MAX_BPS {
            bail!("guard.max_price_impact_bps must be in 1..=10000");
        }

        if self.guard.max_slippage_tolerance_bps == 0
            || self.guard.max_slippage_tolerance_bps > MAX_BPS
        {
            bail!("guard.max_slippage_tolerance_bps must be in 1..=10000");
        }

        if self.logging.level.trim().is_empty() {
            bail!("logging.level must not be empty");
        }

        Ok(())
    }
}
