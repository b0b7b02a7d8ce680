//! Constant product (x*y=k) swap math with exact integer rounding
//!
//! Every function is pure and deterministic. Products are formed at full
//! width (see [`crate::full_math`]); [`MathError::Overflow`] is reserved for
//! results that do not fit in `u128`.

use crate::full_math::{mul_div, mul_div_wide, narrow, product, widen};
use crate::{MathError, BPS_DENOMINATOR, FEE_BPS};

/// Input multiplier after the swap fee (9970 for a 30 bps fee)
const FEE_MULTIPLIER: u128 = BPS_DENOMINATOR - FEE_BPS;

/// Constant product math functions
pub struct SwapMath;

impl SwapMath {
    /// Output amount for an exact input, fee charged on the input
    ///
    /// `amount_out = amount_in * 9970 * reserve_out / (reserve_in * 10000 + amount_in * 9970)`,
    /// rounded down.
    ///
    /// # Errors
    /// - [`MathError::InsufficientInput`] if `amount_in == 0`
    /// - [`MathError::ZeroLiquidity`] if either reserve is zero
    pub fn get_amount_out(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
    ) -> Result<u128, MathError> {
        if amount_in == 0 {
            return Err(MathError::InsufficientInput);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(MathError::ZeroLiquidity);
        }

        let amount_in_with_fee = product(amount_in, FEE_MULTIPLIER);
        let denominator = product(reserve_in, BPS_DENOMINATOR) + amount_in_with_fee;

        mul_div_wide(amount_in_with_fee, widen(reserve_out), denominator)
    }

    /// Input amount required for an exact output (reverse calculation)
    ///
    /// Truncating division plus one unit, so feeding the result back into
    /// [`SwapMath::get_amount_out`] never pays less than `amount_out`.
    ///
    /// # Errors
    /// - [`MathError::InsufficientOutput`] if `amount_out == 0` or `amount_out >= reserve_out`
    /// - [`MathError::ZeroLiquidity`] if either reserve is zero
    /// - [`MathError::Overflow`] if the required input does not fit in `u128`
    pub fn get_amount_in(
        amount_out: u128,
        reserve_in: u128,
        reserve_out: u128,
    ) -> Result<u128, MathError> {
        if amount_out == 0 {
            return Err(MathError::InsufficientOutput);
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(MathError::ZeroLiquidity);
        }
        if amount_out >= reserve_out {
            return Err(MathError::InsufficientOutput);
        }

        let numerator = product(reserve_in, BPS_DENOMINATOR);
        let denominator = product(reserve_out - amount_out, FEE_MULTIPLIER);

        // Add 1 to round up (ensures sufficient input)
        mul_div_wide(numerator, widen(amount_out), denominator)?
            .checked_add(1)
            .ok_or(MathError::Overflow)
    }

    /// Amount of the other asset that keeps the pool ratio unchanged
    ///
    /// `amount_b = amount_a * reserve_b / reserve_a`, rounded down. A zero
    /// amount or an empty `reserve_b` quotes zero.
    ///
    /// # Errors
    /// - [`MathError::ZeroLiquidity`] if `reserve_a == 0`
    pub fn quote(amount_a: u128, reserve_a: u128, reserve_b: u128) -> Result<u128, MathError> {
        mul_div(amount_a, reserve_b, reserve_a)
    }

    /// Proportional share of `total` owned by `part / whole`, rounded down
    ///
    /// Used for LP minting and burning: `total * part / whole`.
    pub fn pro_rata(total: u128, part: u128, whole: u128) -> Result<u128, MathError> {
        mul_div(total, part, whole)
    }

    /// LP claims minted by the first deposit: `floor(sqrt(amount_x * amount_y))`
    ///
    /// The square root of any product of two `u128` values fits in `u128`.
    pub fn initial_liquidity(amount_x: u128, amount_y: u128) -> Result<u128, MathError> {
        narrow(product(amount_x, amount_y).integer_sqrt())
    }
}
