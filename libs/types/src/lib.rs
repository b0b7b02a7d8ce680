//! # Pairswap Types
//!
//! Identifiers and observable records shared across the exchange crates.
//!
//! - [`PoolId`]: stable arena index of a trading pair
//! - [`AssetId`] / [`AccountId`]: string-backed names supplied by the host
//! - [`ExchangeEvent`]: records emitted after every committed state change

pub mod common;
pub mod events;

pub use common::errors::ValidationError;
pub use common::identifiers::{AccountId, AssetId, PoolId};
pub use events::{ExchangeEvent, LiquidityDirection};
