//! Multi-hop Router
//!
//! Chains exact-input swaps along a caller-supplied path of pools. Hops are
//! planned one after another against staged reserves, so a pool visited
//! twice sees the effect of its earlier hop, and nothing is written until
//! every hop has priced and the final floor has been met.
//!
//! Only the final output is bounded. Intermediate hops run with no floor;
//! the whole route commits atomically, so no other trade can touch an
//! intermediate pool between hops.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use types::{AccountId, AssetId, ExchangeEvent, PoolId};

use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::Exchange;
use crate::ledger::{Ledger, Settlement};
use crate::swap::SwapPlan;

/// Ordered path from `source` through each pool's other asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub source: AssetId,
    pub pools: Vec<PoolId>,
}

impl Route {
    pub fn new(source: impl Into<AssetId>, pools: Vec<PoolId>) -> Self {
        Self {
            source: source.into(),
            pools,
        }
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[derive(Debug)]
struct PlannedHop {
    pool_id: PoolId,
    plan: SwapPlan,
    /// `(reserve_x, reserve_y)` left behind by this hop
    reserves_after: (u128, u128),
}

/// Reserves of every pool touched so far, as `(reserve_x, reserve_y)`
type StagedReserves = BTreeMap<PoolId, (u128, u128)>;

impl<L: Ledger> Exchange<L> {
    /// Price every hop of `route` without committing anything
    fn plan_route(
        &self,
        route: &Route,
        amount_in: u128,
    ) -> ExchangeResult<(Vec<PlannedHop>, StagedReserves)> {
        if amount_in == 0 {
            return Err(ExchangeError::ZeroAmount);
        }
        if route.is_empty() {
            return Err(ExchangeError::InvalidRoute {
                hop: 0,
                reason: "route has no pools",
            });
        }

        let mut staged = StagedReserves::new();
        let mut hops = Vec::with_capacity(route.len());
        let mut asset = route.source.clone();
        let mut amount = amount_in;

        for (hop, pool_id) in route.pools.iter().copied().enumerate() {
            let mut pool = self.pools.get(pool_id)?.clone();
            if !pool.contains(&asset) {
                return Err(ExchangeError::InvalidRoute {
                    hop,
                    reason: "pool does not trade the previous hop's output",
                });
            }
            if let Some((reserve_x, reserve_y)) = staged.get(&pool_id) {
                pool.reserve_x = *reserve_x;
                pool.reserve_y = *reserve_y;
            }

            let plan = SwapPlan::exact_input(&pool, &asset, amount)?;
            pool.set_directed(plan.side_in, plan.after);
            let reserves_after = (pool.reserve_x, pool.reserve_y);
            staged.insert(pool_id, reserves_after);

            debug!(
                "Hop {} on {}: {} {} -> {} {}",
                hop, pool_id, plan.amount_in, plan.asset_in, plan.amount_out, plan.asset_out
            );
            asset = plan.asset_out.clone();
            amount = plan.amount_out;
            hops.push(PlannedHop {
                pool_id,
                plan,
                reserves_after,
            });
        }

        Ok((hops, staged))
    }

    /// Amount held after each hop of `route`, starting from `amount_in`
    ///
    /// The last element is what [`Exchange::swap_exact_input_multihop`]
    /// would pay out on current reserves.
    pub fn quote_route(&self, route: &Route, amount_in: u128) -> ExchangeResult<Vec<u128>> {
        let (hops, _) = self.plan_route(route, amount_in)?;
        Ok(hops.iter().map(|hop| hop.plan.amount_out).collect())
    }

    /// Trade `amount_in` of `route.source` through every pool in order
    ///
    /// # Errors
    /// - `ZeroAmount` if `amount_in` is zero
    /// - `InvalidRoute` if the route is empty or a pool does not trade the
    ///   asset arriving from the previous hop
    /// - `PairNotExists` if any hop's pool is unknown or has no liquidity
    /// - `InsufficientOutput` if any hop pays nothing, or the final output is
    ///   below `min_amount_out_final`
    /// - `InsufficientBalance` if `caller` cannot pay `amount_in`
    pub fn swap_exact_input_multihop(
        &mut self,
        route: &Route,
        amount_in: u128,
        min_amount_out_final: u128,
        caller: &AccountId,
    ) -> ExchangeResult<u128> {
        let (hops, staged) = self.plan_route(route, amount_in)?;

        // plan_route rejects empty routes, so there is always a last hop
        let Some(last) = hops.last() else {
            return Err(ExchangeError::InvalidRoute {
                hop: 0,
                reason: "route has no pools",
            });
        };
        let amount_out = last.plan.amount_out;
        if amount_out < min_amount_out_final {
            debug!(
                "Route output {} below floor {}",
                amount_out, min_amount_out_final
            );
            return Err(ExchangeError::InsufficientOutput);
        }

        let settlement = Settlement::new(caller)
            .debit(&route.source, amount_in)?
            .credit(&last.plan.asset_out, amount_out)?;
        self.settle(settlement)?;

        for (pool_id, (reserve_x, reserve_y)) in staged {
            let pool = self.pools.get_mut(pool_id)?;
            pool.reserve_x = reserve_x;
            pool.reserve_y = reserve_y;
        }

        info!(
            "{} routed {} {} through {} pools for {} {}",
            caller,
            amount_in,
            route.source,
            hops.len(),
            amount_out,
            last.plan.asset_out
        );
        self.record_hops(caller, hops);
        Ok(amount_out)
    }

    /// One `SwapCompleted` per hop, with the reserves that hop left behind
    fn record_hops(&mut self, caller: &AccountId, hops: Vec<PlannedHop>) {
        for PlannedHop {
            pool_id,
            plan,
            reserves_after: (reserve_x, reserve_y),
        } in hops
        {
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
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::InMemoryLedger;

    fn three_assets() -> (Exchange, PoolId, PoolId, AccountId) {
        let lp = AccountId::new("lp");
        let mut ledger = InMemoryLedger::new();
        for asset in ["A", "B", "C"] {
            ledger
                .deposit(&lp, &AssetId::new(asset), 1_000_000_000)
                .unwrap();
        }
        let mut exchange = Exchange::new(ledger);
        let ab = exchange.create_pair("A".into(), "B".into()).unwrap();
        let bc = exchange.create_pair("B".into(), "C".into()).unwrap();
        exchange
            .add_liquidity(ab, 1_000_000, 1_000_000, 0, 0, &lp)
            .unwrap();
        exchange
            .add_liquidity(bc, 1_000_000, 1_000_000, 0, 0, &lp)
            .unwrap();
        exchange.drain_events();
        (exchange, ab, bc, lp)
    }

    #[test]
    fn test_two_hop_route_chains_outputs() {
        let (mut exchange, ab, bc, lp) = three_assets();
        let route = Route::new("A", vec![ab, bc]);

        // 10_000 A -> 9_871 B -> 9_745 C
        let amounts = exchange.quote_route(&route, 10_000).unwrap();
        assert_eq!(amounts, vec![9_871, 9_745]);

        let b_before = exchange.ledger().balance(&lp, &AssetId::new("B"));
        let out = exchange
            .swap_exact_input_multihop(&route, 10_000, 9_745, &lp)
            .unwrap();
        assert_eq!(out, 9_745);
        // Intermediate asset never lands in the caller's balance
        assert_eq!(exchange.ledger().balance(&lp, &AssetId::new("B")), b_before);
        assert_eq!(
            exchange.get_current_reserves(bc).unwrap(),
            (1_009_871, 990_255)
        );
        assert_eq!(exchange.drain_events().len(), 2);
    }

    #[test]
    fn test_final_floor_rejects_whole_route() {
        let (mut exchange, ab, bc, lp) = three_assets();
        let route = Route::new("A", vec![ab, bc]);
        assert_eq!(
            exchange.swap_exact_input_multihop(&route, 10_000, 9_746, &lp),
            Err(ExchangeError::InsufficientOutput)
        );
        assert_eq!(
            exchange.get_current_reserves(ab).unwrap(),
            (1_000_000, 1_000_000)
        );
        assert!(exchange.events().is_empty());
    }

    #[test]
    fn test_disconnected_route_is_invalid() {
        let (mut exchange, ab, bc, lp) = three_assets();
        assert_eq!(
            exchange.swap_exact_input_multihop(&Route::new("C", vec![ab]), 100, 0, &lp),
            Err(ExchangeError::InvalidRoute {
                hop: 0,
                reason: "pool does not trade the previous hop's output"
            })
        );
        assert!(matches!(
            exchange.quote_route(&Route::new("A", vec![bc]), 100),
            Err(ExchangeError::InvalidRoute { hop: 0, .. })
        ));
        assert!(matches!(
            exchange.quote_route(&Route::new("A", vec![]), 100),
            Err(ExchangeError::InvalidRoute { hop: 0, .. })
        ));
    }

    #[test]
    fn test_revisited_pool_sees_staged_reserves() {
        let (mut exchange, ab, _, lp) = three_assets();
        // A -> B -> A through the same pool: the second hop prices on moved reserves
        let route = Route::new("A", vec![ab, ab]);
        let amounts = exchange.quote_route(&route, 10_000).unwrap();
        assert_eq!(amounts, vec![9_871, 9_940]);

        let a_before = exchange.ledger().balance(&lp, &AssetId::new("A"));
        exchange
            .swap_exact_input_multihop(&route, 10_000, 0, &lp)
            .unwrap();
        assert_eq!(
            exchange.ledger().balance(&lp, &AssetId::new("A")),
            a_before - 60
        );
        assert_eq!(
            exchange.get_current_reserves(ab).unwrap(),
            (1_000_060, 1_000_000)
        );
    }
}
