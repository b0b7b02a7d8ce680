//! Price impact and slippage tolerance arithmetic
//!
//! Impact is measured on the pre-trade quote, so it can be evaluated
//! without touching pool state.

use crate::full_math::{mul_div, mul_div_wide, product, widen};
use crate::{MathError, SwapMath, BPS_DENOMINATOR};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Premium of the execution price over the spot price, in basis points
///
/// Spot price is `reserve_in / reserve_out` (input paid per unit of output),
/// execution price is `amount_in / amount_out`. The fee is included, so even
/// a dust trade reports about 30 bps.
///
/// `impact_bps = amount_in * reserve_out * 10000 / (amount_out * reserve_in) - 10000`
///
/// # Errors
/// Any [`SwapMath::get_amount_out`] failure, or [`MathError::InsufficientOutput`]
/// when the trade would pay nothing (unbounded impact).
pub fn calculate_price_impact(
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
) -> Result<u128, MathError> {
    let amount_out = SwapMath::get_amount_out(amount_in, reserve_in, reserve_out)?;
    if amount_out == 0 {
        return Err(MathError::InsufficientOutput);
    }

    let ratio_bps = mul_div_wide(
        product(amount_in, BPS_DENOMINATOR),
        widen(reserve_out),
        product(amount_out, reserve_in),
    )?;

    Ok(ratio_bps.saturating_sub(BPS_DENOMINATOR))
}

/// Lowest acceptable output for `expected_output` under `max_slippage_bps`
///
/// `expected_output * (10000 - max_slippage_bps) / 10000`, rounded down.
/// Tolerances above 100% clamp to a floor of zero.
pub fn min_output_for_tolerance(
    expected_output: u128,
    max_slippage_bps: u128,
) -> Result<u128, MathError> {
    let keep_bps = BPS_DENOMINATOR.saturating_sub(max_slippage_bps);
    mul_div(expected_output, keep_bps, BPS_DENOMINATOR)
}

/// `numerator / denominator` as a display price, `None` when undefined or
/// outside the `Decimal` range
pub fn price_ratio(numerator: u128, denominator: u128) -> Option<Decimal> {
    if denominator == 0 {
        return None;
    }
    let numerator = Decimal::from_u128(numerator)?;
    let denominator = Decimal::from_u128(denominator)?;
    numerator.checked_div(denominator)
}
