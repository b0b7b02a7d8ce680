//! Liquidity Manager
//!
//! Adds and removes liquidity against one pool, minting and burning claims
//! with the proportionality rules of [`SwapMath`].

use amm::SwapMath;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use types::{AccountId, ExchangeEvent, LiquidityDirection, PoolId};

use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::Exchange;
use crate::ledger::{Ledger, Settlement};

/// Amounts actually taken by [`Exchange::add_liquidity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityDeposit {
    pub amount_x: u128,
    pub amount_y: u128,
    pub lp_minted: u128,
}

impl<L: Ledger> Exchange<L> {
    /// Deposit both assets and mint a liquidity claim for `caller`
    ///
    /// The first deposit into an empty pool is taken as-is and sets the
    /// price; it mints `floor(sqrt(x * y))` claims and ignores the minimums.
    /// Later deposits are trimmed to the pool ratio on whichever side binds,
    /// so neither desired amount is ever exceeded.
    ///
    /// # Errors
    /// - `ZeroAmount` if either desired amount is zero
    /// - `PairNotExists` for an unknown pool
    /// - `SlippageExceeded` if a trimmed amount falls below its minimum
    /// - `InsufficientLiquidityMinted` if the deposit is too small to mint
    /// - `InsufficientBalance` if `caller` cannot fund the deposit
    pub fn add_liquidity(
        &mut self,
        pool_id: PoolId,
        amount_x_desired: u128,
        amount_y_desired: u128,
        amount_x_min: u128,
        amount_y_min: u128,
        caller: &AccountId,
    ) -> ExchangeResult<LiquidityDeposit> {
        if amount_x_desired == 0 || amount_y_desired == 0 {
            return Err(ExchangeError::ZeroAmount);
        }

        let mut staged = self.pools.get(pool_id)?.clone();

        let (amount_x, amount_y, lp_minted) = if staged.lp_supply == 0 {
            let lp = SwapMath::initial_liquidity(amount_x_desired, amount_y_desired)?;
            (amount_x_desired, amount_y_desired, lp)
        } else {
            let y_optimal = SwapMath::quote(amount_x_desired, staged.reserve_x, staged.reserve_y)?;
            let (amount_x, amount_y) = if y_optimal <= amount_y_desired {
                (amount_x_desired, y_optimal)
            } else {
                let x_optimal =
                    SwapMath::quote(amount_y_desired, staged.reserve_y, staged.reserve_x)?;
                (x_optimal, amount_y_desired)
            };

            if amount_x < amount_x_min || amount_y < amount_y_min {
                debug!(
                    "Deposit into {} trimmed to ({}, {}), below minimums ({}, {})",
                    pool_id, amount_x, amount_y, amount_x_min, amount_y_min
                );
                return Err(ExchangeError::SlippageExceeded);
            }

            let lp = SwapMath::pro_rata(amount_x, staged.lp_supply, staged.reserve_x)?.min(
                SwapMath::pro_rata(amount_y, staged.lp_supply, staged.reserve_y)?,
            );
            (amount_x, amount_y, lp)
        };

        if lp_minted == 0 {
            return Err(ExchangeError::InsufficientLiquidityMinted);
        }

        staged.reserve_x = staged
            .reserve_x
            .checked_add(amount_x)
            .ok_or(ExchangeError::Overflow)?;
        staged.reserve_y = staged
            .reserve_y
            .checked_add(amount_y)
            .ok_or(ExchangeError::Overflow)?;
        staged.mint_claim(caller, lp_minted)?;

        let settlement = Settlement::new(caller)
            .debit(&staged.asset_x, amount_x)?
            .debit(&staged.asset_y, amount_y)?;
        self.settle(settlement)?;

        let (reserve_x, reserve_y) = (staged.reserve_x, staged.reserve_y);
        *self.pools.get_mut(pool_id)? = staged;

        info!(
            "{} added ({}, {}) to {}, minted {} claims",
            caller, amount_x, amount_y, pool_id, lp_minted
        );
        self.events.push(ExchangeEvent::LiquidityChanged {
            pool_id,
            account: caller.clone(),
            direction: LiquidityDirection::Added,
            amount_x,
            amount_y,
            lp_delta: lp_minted,
            reserve_x,
            reserve_y,
        });

        Ok(LiquidityDeposit {
            amount_x,
            amount_y,
            lp_minted,
        })
    }

    /// Burn `lp_amount` of `caller`'s claim and return the proportional reserves
    ///
    /// Burning the whole supply empties the pool, which can then be seeded
    /// again at a new price.
    ///
    /// # Errors
    /// - `ZeroAmount` if `lp_amount` is zero
    /// - `PairNotExists` for an unknown pool
    /// - `InsufficientBalance` if the caller's claim is smaller than `lp_amount`
    /// - `InsufficientLiquidityBurned` if either returned amount rounds to zero
    /// - `SlippageExceeded` if either returned amount is below its minimum
    pub fn remove_liquidity(
        &mut self,
        pool_id: PoolId,
        lp_amount: u128,
        amount_x_min: u128,
        amount_y_min: u128,
        caller: &AccountId,
    ) -> ExchangeResult<(u128, u128)> {
        if lp_amount == 0 {
            return Err(ExchangeError::ZeroAmount);
        }

        let mut staged = self.pools.get(pool_id)?.clone();
        if staged.lp_balance(caller) < lp_amount {
            return Err(ExchangeError::InsufficientBalance);
        }

        let amount_x = SwapMath::pro_rata(staged.reserve_x, lp_amount, staged.lp_supply)?;
        let amount_y = SwapMath::pro_rata(staged.reserve_y, lp_amount, staged.lp_supply)?;
        if amount_x == 0 || amount_y == 0 {
            return Err(ExchangeError::InsufficientLiquidityBurned);
        }
        if amount_x < amount_x_min || amount_y < amount_y_min {
            return Err(ExchangeError::SlippageExceeded);
        }

        staged.burn_claim(caller, lp_amount)?;
        staged.reserve_x -= amount_x;
        staged.reserve_y -= amount_y;

        let settlement = Settlement::new(caller)
            .credit(&staged.asset_x, amount_x)?
            .credit(&staged.asset_y, amount_y)?;
        self.settle(settlement)?;

        let (reserve_x, reserve_y) = (staged.reserve_x, staged.reserve_y);
        *self.pools.get_mut(pool_id)? = staged;

        info!(
            "{} removed ({}, {}) from {}, burned {} claims",
            caller, amount_x, amount_y, pool_id, lp_amount
        );
        self.events.push(ExchangeEvent::LiquidityChanged {
            pool_id,
            account: caller.clone(),
            direction: LiquidityDirection::Removed,
            amount_x,
            amount_y,
            lp_delta: lp_amount,
            reserve_x,
            reserve_y,
        });

        Ok((amount_x, amount_y))
    }
}
