//! Exchange error taxonomy
//!
//! One flat enum so callers can tell "raise your slippage tolerance" apart
//! from "this pool doesn't exist" or "add more liquidity first".

use amm::MathError;
use thiserror::Error;
use types::{AssetId, PoolId};

use crate::ledger::LedgerError;

/// Result alias for exchange operations
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Every failure aborts the whole operation with no state change
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Pool has no liquidity")]
    ZeroLiquidity,

    #[error("Input amount must be positive")]
    InsufficientInput,

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Pair assets must be distinct, got {asset} twice")]
    InvalidPair { asset: AssetId },

    #[error("Pair already exists as {pool_id}")]
    PairExists { pool_id: PoolId },

    #[error("{0} does not exist or has no liquidity")]
    PairNotExists(PoolId),

    #[error("{asset} is not traded by {pool_id}")]
    AssetNotInPool { pool_id: PoolId, asset: AssetId },

    #[error("Output amount is below the requested minimum or beyond the reserves")]
    InsufficientOutput,

    #[error("Required input {required} exceeds maximum {max_amount_in}")]
    ExcessiveInputAmount { required: u128, max_amount_in: u128 },

    #[error("Liquidity amounts fall below the caller's minimums")]
    SlippageExceeded,

    #[error("Output {actual} deviates from expected {expected} by more than {max_slippage_bps} bps")]
    SlippageTooHigh {
        expected: u128,
        actual: u128,
        max_slippage_bps: u128,
    },

    #[error("Price impact {impact_bps} bps exceeds ceiling {max_impact_bps} bps")]
    PriceImpactTooHigh { impact_bps: u128, max_impact_bps: u128 },

    #[error("Slippage tolerance {requested_bps} bps exceeds ceiling {max_bps} bps")]
    ToleranceAboveCeiling { requested_bps: u128, max_bps: u128 },

    #[error("Insufficient balance or liquidity claim")]
    InsufficientBalance,

    #[error("Deposit too small to mint liquidity claims")]
    InsufficientLiquidityMinted,

    #[error("Withdrawal too small to return both assets")]
    InsufficientLiquidityBurned,

    #[error("Invalid route at hop {hop}: {reason}")]
    InvalidRoute { hop: usize, reason: &'static str },

    #[error("Arithmetic overflow")]
    Overflow,
}

impl ExchangeError {
    /// Stable machine-readable code for clients and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::ZeroLiquidity => "zero_liquidity",
            ExchangeError::InsufficientInput => "insufficient_input",
            ExchangeError::ZeroAmount => "zero_amount",
            ExchangeError::InvalidPair { .. } => "invalid_pair",
            ExchangeError::PairExists { .. } => "pair_exists",
            ExchangeError::PairNotExists(_) => "pair_not_exists",
            ExchangeError::AssetNotInPool { .. } => "asset_not_in_pool",
            ExchangeError::InsufficientOutput => "insufficient_output",
            ExchangeError::ExcessiveInputAmount { .. } => "excessive_input_amount",
            ExchangeError::SlippageExceeded => "slippage_exceeded",
            ExchangeError::SlippageTooHigh { .. } => "slippage_too_high",
            ExchangeError::PriceImpactTooHigh { .. } => "price_impact_too_high",
            ExchangeError::ToleranceAboveCeiling { .. } => "tolerance_above_ceiling",
            ExchangeError::InsufficientBalance => "insufficient_balance",
            ExchangeError::InsufficientLiquidityMinted => "insufficient_liquidity_minted",
            ExchangeError::InsufficientLiquidityBurned => "insufficient_liquidity_burned",
            ExchangeError::InvalidRoute { .. } => "invalid_route",
            ExchangeError::Overflow => "overflow",
        }
    }
}

impl From<MathError> for ExchangeError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientInput => ExchangeError::InsufficientInput,
            MathError::InsufficientOutput => ExchangeError::InsufficientOutput,
            MathError::ZeroLiquidity => ExchangeError::ZeroLiquidity,
            MathError::Overflow => ExchangeError::Overflow,
        }
    }
}

impl From<LedgerError> for ExchangeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance { .. } => ExchangeError::InsufficientBalance,
            LedgerError::Overflow { .. } => ExchangeError::Overflow,
        }
    }
}
