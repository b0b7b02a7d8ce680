//! # Pairswap AMM Math
//!
//! Pure constant-product (x*y=k) arithmetic for the exchange engine: swap
//! outputs and inputs, proportional liquidity quotes, LP sizing, and the
//! price-impact / tolerance numbers used by the slippage guard.
//!
//! ## Rounding Rules
//!
//! - Swap outputs and quotes round **down** (pool keeps the dust)
//! - Exact-output inputs round **up** by one unit (caller never shortchanged)
//! - Products are formed at 256/512-bit width; only a result that does not
//!   fit in `u128` is an overflow error
//!
//! ## Example
//!
//! ```rust
//! use amm::{AmmPool, DirectedReserves, SwapMath};
//!
//! let out = SwapMath::get_amount_out(1_000, 10_000, 20_000).unwrap();
//! assert_eq!(out, 1_813);
//!
//! let pool = DirectedReserves::new(10_000, 20_000);
//! assert_eq!(pool.get_amount_out(1_000).unwrap(), out);
//! ```

pub mod errors;
pub mod full_math;
pub mod pool_traits;
pub mod slippage;
pub mod swap_math;

pub use errors::MathError;
pub use full_math::mul_div;
pub use pool_traits::{AmmPool, DirectedReserves};
pub use slippage::{calculate_price_impact, min_output_for_tolerance, price_ratio};
pub use swap_math::SwapMath;

/// Common types for price display
pub use rust_decimal::Decimal;

/// Swap fee charged on every input, in basis points (0.3%)
pub const FEE_BPS: u128 = 30;

/// Basis point denominator
pub const BPS_DENOMINATOR: u128 = 10_000;
