//! Swap Executor
//!
//! Single-hop swaps against one pool. Every swap is planned from a read-only
//! view of the pool first; the plan is what quotes return and what execution
//! commits, so a quote and an immediate swap always agree.

use amm::{
    calculate_price_impact, mul_div, price_ratio, AmmPool, Decimal, DirectedReserves,
    BPS_DENOMINATOR, FEE_BPS,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use types::{AccountId, AssetId, ExchangeEvent, PoolId};

use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::Exchange;
use crate::ledger::{Ledger, Settlement};
use crate::pool::{Pool, Side};

/// Dry-run result of an exact-input swap; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub pool_id: PoolId,
    pub asset_in: AssetId,
    pub asset_out: AssetId,
    pub amount_in: u128,
    pub amount_out: u128,
    /// Portion of `amount_in` kept by the pool as the trading fee
    pub fee_amount: u128,
    pub reserve_in_after: u128,
    pub reserve_out_after: u128,
    /// Execution price premium over spot, fee included
    pub price_impact_bps: u128,
    /// Input per unit of output before the trade
    pub spot_price: Option<Decimal>,
    /// Input per unit of output actually paid
    pub execution_price: Option<Decimal>,
}

/// Resolved single-hop trade, ready to commit
#[derive(Debug, Clone)]
pub(crate) struct SwapPlan {
    pub side_in: Side,
    pub asset_in: AssetId,
    pub asset_out: AssetId,
    pub amount_in: u128,
    pub amount_out: u128,
    pub before: DirectedReserves,
    pub after: DirectedReserves,
}

/// Resolve the trade direction and reject pools that cannot price a swap
pub(crate) fn directed_for(
    pool: &Pool,
    asset_in: &AssetId,
) -> ExchangeResult<(Side, DirectedReserves)> {
    let side_in = pool.side_of(asset_in)?;
    if !pool.is_initialized() {
        return Err(ExchangeError::PairNotExists(pool.id));
    }
    Ok((side_in, pool.directed(side_in)))
}

impl SwapPlan {
    /// Plan an exact-input trade on `pool`
    pub(crate) fn exact_input(
        pool: &Pool,
        asset_in: &AssetId,
        amount_in: u128,
    ) -> ExchangeResult<Self> {
        let (side_in, before) = directed_for(pool, asset_in)?;
        let amount_out = before.get_amount_out(amount_in)?;
        if amount_out == 0 {
            return Err(ExchangeError::InsufficientOutput);
        }
        let after = before.after_swap(amount_in, amount_out)?;
        Ok(Self {
            side_in,
            asset_in: asset_in.clone(),
            asset_out: pool.asset(side_in.opposite()).clone(),
            amount_in,
            amount_out,
            before,
            after,
        })
    }

    /// Plan an exact-output trade on `pool`, input rounded up
    pub(crate) fn exact_output(
        pool: &Pool,
        asset_in: &AssetId,
        amount_out: u128,
    ) -> ExchangeResult<Self> {
        let (side_in, before) = directed_for(pool, asset_in)?;
        let amount_in = before.get_amount_in(amount_out)?;
        let after = before.after_swap(amount_in, amount_out)?;
        Ok(Self {
            side_in,
            asset_in: asset_in.clone(),
            asset_out: pool.asset(side_in.opposite()).clone(),
            amount_in,
            amount_out,
            before,
            after,
        })
    }
}

impl<L: Ledger> Exchange<L> {
    /// Dry run of an exact-input swap on current reserves
    ///
    /// # Errors
    /// Same as [`Exchange::swap_exact_input`] apart from balance checks.
    pub fn quote_exact_input(
        &self,
        pool_id: PoolId,
        asset_in: &AssetId,
        amount_in: u128,
    ) -> ExchangeResult<SwapQuote> {
        if amount_in == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        let plan = SwapPlan::exact_input(self.pools.get(pool_id)?, asset_in, amount_in)?;
        let price_impact_bps =
            calculate_price_impact(amount_in, plan.before.reserve_in, plan.before.reserve_out)?;
        let fee_amount = mul_div(amount_in, FEE_BPS, BPS_DENOMINATOR)?;

        debug!(
            "Quoted {} {} -> {} {} on {} (impact {} bps)",
            amount_in, plan.asset_in, plan.amount_out, plan.asset_out, pool_id, price_impact_bps
        );

        Ok(SwapQuote {
            pool_id,
            spot_price: plan.before.spot_price(),
            execution_price: price_ratio(amount_in, plan.amount_out),
            asset_in: plan.asset_in,
            asset_out: plan.asset_out,
            amount_in,
            amount_out: plan.amount_out,
            fee_amount,
            reserve_in_after: plan.after.reserve_in,
            reserve_out_after: plan.after.reserve_out,
            price_impact_bps,
        })
    }

    /// Swap an exact amount of `asset_in` for at least `min_amount_out`
    ///
    /// # Errors
    /// - `ZeroAmount` if `amount_in` is zero
    /// - `PairNotExists` if the pool is unknown or has no liquidity
    /// - `AssetNotInPool` if the pool does not trade `asset_in`
    /// - `InsufficientOutput` if the output is zero or below `min_amount_out`
    /// - `InsufficientBalance` if `caller` cannot pay `amount_in`
    pub fn swap_exact_input(
        &mut self,
        pool_id: PoolId,
        asset_in: &AssetId,
        amount_in: u128,
        min_amount_out: u128,
        caller: &AccountId,
    ) -> ExchangeResult<u128> {
        if amount_in == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        let plan = SwapPlan::exact_input(self.pools.get(pool_id)?, asset_in, amount_in)?;
        if plan.amount_out < min_amount_out {
            debug!(
                "Swap on {} yields {}, below floor {}",
                pool_id, plan.amount_out, min_amount_out
            );
            return Err(ExchangeError::InsufficientOutput);
        }
        self.commit_swap(pool_id, plan, caller)
    }

    /// Swap at most `max_amount_in` of `asset_in` for exactly `amount_out`
    ///
    /// Returns the input actually paid.
    ///
    /// # Errors
    /// - `ZeroAmount` if `amount_out` is zero
    /// - `PairNotExists` / `AssetNotInPool` as for exact-input swaps
    /// - `InsufficientOutput` if `amount_out` would drain the reserve
    /// - `ExcessiveInputAmount` if the required input exceeds `max_amount_in`
    pub fn swap_exact_output(
        &mut self,
        pool_id: PoolId,
        asset_in: &AssetId,
        amount_out: u128,
        max_amount_in: u128,
        caller: &AccountId,
    ) -> ExchangeResult<u128> {
        if amount_out == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        let plan = SwapPlan::exact_output(self.pools.get(pool_id)?, asset_in, amount_out)?;
        if plan.amount_in > max_amount_in {
            return Err(ExchangeError::ExcessiveInputAmount {
                required: plan.amount_in,
                max_amount_in,
            });
        }
        let amount_in = plan.amount_in;
        self.commit_swap(pool_id, plan, caller)?;
        Ok(amount_in)
    }

    /// Move balances and reserves for a planned swap as one unit
    fn commit_swap(
        &mut self,
        pool_id: PoolId,
        plan: SwapPlan,
        caller: &AccountId,
    ) -> ExchangeResult<u128> {
        let settlement = Settlement::new(caller)
            .debit(&plan.asset_in, plan.amount_in)?
            .credit(&plan.asset_out, plan.amount_out)?;
        self.settle(settlement)?;

        let pool = self.pools.get_mut(pool_id)?;
        pool.set_directed(plan.side_in, plan.after);
        let (reserve_x, reserve_y) = (pool.reserve_x, pool.reserve_y);

        info!(
            "{} swapped {} {} for {} {} on {}",
            caller, plan.amount_in, plan.asset_in, plan.amount_out, plan.asset_out, pool_id
        );
        self.events.push(ExchangeEvent::SwapCompleted {
            pool_id,
            account: caller.clone(),
            asset_in: plan.asset_in,
            asset_out: plan.asset_out,
            amount_in: plan.amount_in,
            amount_out: plan.amount_out,
            reserve_x,
            reserve_y,
        });
        Ok(plan.amount_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;
    use rust_decimal_macros::dec;

    fn seeded(reserve_x: u128, reserve_y: u128) -> (Exchange, PoolId, AccountId) {
        let trader = AccountId::new("trader");
        let mut ledger = InMemoryLedger::new();
        for asset in ["WETH", "USDC"] {
            ledger
                .deposit(&trader, &AssetId::new(asset), 1_000_000_000)
                .unwrap();
        }
        let mut exchange = Exchange::new(ledger);
        let pool_id = exchange
            .create_pair(AssetId::new("WETH"), AssetId::new("USDC"))
            .unwrap();
        exchange
            .add_liquidity(pool_id, reserve_x, reserve_y, 0, 0, &trader)
            .unwrap();
        exchange.drain_events();
        (exchange, pool_id, trader)
    }

    #[test]
    fn test_swap_exact_input_moves_reserves_and_balances() {
        let (mut exchange, pool_id, trader) = seeded(10_000, 20_000);
        let weth = AssetId::new("WETH");
        let usdc = AssetId::new("USDC");
        let usdc_before = exchange.ledger().balance(&trader, &usdc);

        let out = exchange
            .swap_exact_input(pool_id, &weth, 1_000, 1_800, &trader)
            .unwrap();
        assert_eq!(out, 1_813);
        assert_eq!(
            exchange.get_current_reserves(pool_id).unwrap(),
            (11_000, 18_187)
        );
        assert_eq!(
            exchange.ledger().balance(&trader, &usdc),
            usdc_before + 1_813
        );

        let events = exchange.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            ExchangeEvent::SwapCompleted { amount_out: 1_813, reserve_y: 18_187, .. }
        ));
    }

    #[test]
    fn test_swap_in_reverse_direction() {
        let (mut exchange, pool_id, trader) = seeded(10_000, 20_000);
        // 2000 USDC in: 2000*9970*10000 / (20000*10000 + 2000*9970) = 906
        let out = exchange
            .swap_exact_input(pool_id, &AssetId::new("USDC"), 2_000, 0, &trader)
            .unwrap();
        assert_eq!(out, 906);
        assert_eq!(
            exchange.get_current_reserves(pool_id).unwrap(),
            (9_094, 22_000)
        );
    }

    #[test]
    fn test_floor_violation_leaves_state_untouched() {
        let (mut exchange, pool_id, trader) = seeded(10_000, 20_000);
        assert_eq!(
            exchange.swap_exact_input(pool_id, &AssetId::new("WETH"), 1_000, 1_814, &trader),
            Err(ExchangeError::InsufficientOutput)
        );
        assert_eq!(
            exchange.get_current_reserves(pool_id).unwrap(),
            (10_000, 20_000)
        );
        assert!(exchange.events().is_empty());
    }

    #[test]
    fn test_swap_rejects_bad_requests() {
        let (mut exchange, pool_id, trader) = seeded(10_000, 20_000);
        assert_eq!(
            exchange.swap_exact_input(pool_id, &AssetId::new("WETH"), 0, 0, &trader),
            Err(ExchangeError::ZeroAmount)
        );
        assert!(matches!(
            exchange.swap_exact_input(pool_id, &AssetId::new("DAI"), 10, 0, &trader),
            Err(ExchangeError::AssetNotInPool { .. })
        ));

        let empty = exchange
            .create_pair(AssetId::new("WETH"), AssetId::new("DAI"))
            .unwrap();
        assert_eq!(
            exchange.swap_exact_input(empty, &AssetId::new("WETH"), 10, 0, &trader),
            Err(ExchangeError::PairNotExists(empty))
        );
    }

    #[test]
    fn test_unfunded_swap_moves_nothing() {
        let (mut exchange, pool_id, _) = seeded(10_000, 20_000);
        let broke = AccountId::new("broke");
        assert_eq!(
            exchange.swap_exact_input(pool_id, &AssetId::new("WETH"), 1_000, 0, &broke),
            Err(ExchangeError::InsufficientBalance)
        );
        assert_eq!(
            exchange.get_current_reserves(pool_id).unwrap(),
            (10_000, 20_000)
        );
    }

    #[test]
    fn test_exact_output_pays_rounded_up_input() {
        let (mut exchange, pool_id, trader) = seeded(10_000, 20_000);
        assert_eq!(
            exchange.swap_exact_output(pool_id, &AssetId::new("WETH"), 1_813, 999, &trader),
            Err(ExchangeError::ExcessiveInputAmount {
                required: 1_000,
                max_amount_in: 999
            })
        );
        let paid = exchange
            .swap_exact_output(pool_id, &AssetId::new("WETH"), 1_813, 1_000, &trader)
            .unwrap();
        assert_eq!(paid, 1_000);
        assert_eq!(
            exchange.get_current_reserves(pool_id).unwrap(),
            (11_000, 18_187)
        );
    }

    #[test]
    fn test_exact_output_cannot_drain_pool() {
        let (mut exchange, pool_id, trader) = seeded(10_000, 20_000);
        assert_eq!(
            exchange.swap_exact_output(pool_id, &AssetId::new("WETH"), 20_000, u128::MAX, &trader),
            Err(ExchangeError::InsufficientOutput)
        );
    }

    #[test]
    fn test_quote_matches_execution() {
        let (mut exchange, pool_id, trader) = seeded(1_000_000, 1_000_000);
        let weth = AssetId::new("WETH");
        let quote = exchange.quote_exact_input(pool_id, &weth, 100_000).unwrap();

        assert_eq!(quote.amount_out, 90_661);
        assert_eq!(quote.fee_amount, 300);
        assert_eq!(quote.price_impact_bps, 1_030);
        assert_eq!(quote.spot_price, Some(dec!(1)));
        assert_eq!(
            (quote.reserve_in_after, quote.reserve_out_after),
            (1_100_000, 909_339)
        );

        let out = exchange
            .swap_exact_input(pool_id, &weth, 100_000, quote.amount_out, &trader)
            .unwrap();
        assert_eq!(out, quote.amount_out);
    }
}
