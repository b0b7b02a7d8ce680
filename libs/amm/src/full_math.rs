//! Full-width integer helpers
//!
//! Token amounts are `u128`, but products of two amounts routinely exceed
//! it (two 18-decimal balances of a few thousand tokens already do). Every
//! `a * b / c` in the crate goes through a 512-bit product so that only a
//! result that itself does not fit in `u128` is reported as
//! [`MathError::Overflow`].

use ethers_core::types::{U256, U512};

use crate::MathError;

/// Widen an amount into 256 bits
#[inline]
pub(crate) fn widen(value: u128) -> U256 {
    U256::from(value)
}

/// Product of two amounts, exact (both factors are below 2^128)
#[inline]
pub(crate) fn product(a: u128, b: u128) -> U256 {
    widen(a) * widen(b)
}

/// `a * b / denominator` over 256-bit operands, rounded down
///
/// # Errors
/// - [`MathError::ZeroLiquidity`] if `denominator` is zero
/// - [`MathError::Overflow`] if the quotient does not fit in `u128`
pub(crate) fn mul_div_wide(a: U256, b: U256, denominator: U256) -> Result<u128, MathError> {
    if denominator.is_zero() {
        return Err(MathError::ZeroLiquidity);
    }
    let quotient = a.full_mul(b) / U512::from(denominator);
    if quotient > U512::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(quotient.as_u128())
}

/// `a * b / denominator` with a full-width intermediate, rounded down
///
/// # Errors
/// - [`MathError::ZeroLiquidity`] if `denominator` is zero
/// - [`MathError::Overflow`] if the quotient does not fit in `u128`
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128, MathError> {
    mul_div_wide(widen(a), widen(b), widen(denominator))
}

/// Narrow a 256-bit value back to an amount
pub(crate) fn narrow(value: U256) -> Result<u128, MathError> {
    if value > widen(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(value.as_u128())
}
