//! Failure kinds of the pure swap math

use thiserror::Error;

/// Errors returned by [`crate::SwapMath`] and the slippage helpers
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Input amount must be positive")]
    InsufficientInput,

    #[error("Requested output is zero or exceeds what the reserves can pay")]
    InsufficientOutput,

    #[error("Pool has no liquidity on one side")]
    ZeroLiquidity,

    #[error("Arithmetic overflow in swap math")]
    Overflow,
}
