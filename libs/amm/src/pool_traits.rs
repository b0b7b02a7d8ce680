//! Pool trait definitions for a unified swap interface

use crate::slippage::price_ratio;
use crate::{MathError, SwapMath};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reserves of a pair oriented along a trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedReserves {
    pub reserve_in: u128,
    pub reserve_out: u128,
}

impl DirectedReserves {
    pub fn new(reserve_in: u128, reserve_out: u128) -> Self {
        Self {
            reserve_in,
            reserve_out,
        }
    }

    /// Reserves after `amount_in` enters and `amount_out` leaves
    pub fn after_swap(&self, amount_in: u128, amount_out: u128) -> Result<Self, MathError> {
        Ok(Self {
            reserve_in: self
                .reserve_in
                .checked_add(amount_in)
                .ok_or(MathError::Overflow)?,
            reserve_out: self
                .reserve_out
                .checked_sub(amount_out)
                .ok_or(MathError::InsufficientOutput)?,
        })
    }
}

/// Unified pool interface for swap calculations
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: u128) -> Result<u128, MathError>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: u128) -> Result<u128, MathError>;

    /// Input paid per unit of output at the current reserves
    fn spot_price(&self) -> Option<Decimal>;
}

impl AmmPool for DirectedReserves {
    fn get_amount_out(&self, amount_in: u128) -> Result<u128, MathError> {
        SwapMath::get_amount_out(amount_in, self.reserve_in, self.reserve_out)
    }

    fn get_amount_in(&self, amount_out: u128) -> Result<u128, MathError> {
        SwapMath::get_amount_in(amount_out, self.reserve_in, self.reserve_out)
    }

    fn spot_price(&self) -> Option<Decimal> {
        price_ratio(self.reserve_in, self.reserve_out)
    }
}
