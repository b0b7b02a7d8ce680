//! # Pairswap Configuration
//!
//! Runtime limits for the slippage guard and the logging setup, loaded from
//! defaults, an optional TOML file and `PAIRSWAP_` environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pairswap_config::ExchangeConfig;
//!
//! let config = ExchangeConfig::load(None).expect("valid configuration");
//! assert!(config.guard.max_price_impact_bps <= 10_000);
//! ```
//!
//! The swap fee is fixed by the math crate and is not configurable.

pub mod exchange_config;

pub use exchange_config::{
    ExchangeConfig, GuardConfig, LoggingConfig, DEFAULT_MAX_PRICE_IMPACT_BPS,
    DEFAULT_MAX_SLIPPAGE_TOLERANCE_BPS, ENV_PREFIX,
};
