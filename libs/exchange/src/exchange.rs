//! # Exchange Engine
//!
//! ## Purpose
//!
//! Owns the pool registry and the slippage guard, and drives every
//! state-changing operation against an external [`Ledger`]. Each entry point
//! runs to completion as one atomic unit: it reads the pool, computes the new
//! state on the side, verifies the ledger settlement in full, and only then
//! writes reserves and moves balances.
//!
//! ## Architecture Role
//!
//! ```text
//! Router ──→ Swap Executor ──→ PoolStore (read) ──→ SwapMath ──→ PoolStore (write)
//!   │              │                                                  │
//!   │        Slippage Guard (pre-trade quote)                  Settlement → Ledger
//!   └── per-hop staging ────────────────────────────────────────────→ ExchangeEvent buffer
//! ```
//!
//! The operations themselves are split by concern: liquidity in
//! `liquidity.rs`, single-hop swaps in `swap.rs`, guarded swaps in
//! `guard.rs`, routes in `router.rs`.
//!
//! ## Concurrency
//!
//! Mutating operations take `&mut self`, so two calls touching the same pool
//! can never interleave. Hosts that want disjoint pools processed in
//! parallel shard pools across separate `Exchange` values.

use amm::Decimal;
use pairswap_config::GuardConfig;
use tracing::info;
use types::{AccountId, AssetId, ExchangeEvent, PoolId};

use crate::error::ExchangeResult;
use crate::guard::SlippageGuard;
use crate::ledger::{InMemoryLedger, Ledger, Settlement};
use crate::pool::Pool;
use crate::store::PoolStore;

/// Constant-product exchange over a set of independent pools
#[derive(Debug)]
pub struct Exchange<L: Ledger = InMemoryLedger> {
    pub(crate) pools: PoolStore,
    pub(crate) ledger: L,
    pub(crate) guard: SlippageGuard,
    /// Records of committed operations, oldest first
    pub(crate) events: Vec<ExchangeEvent>,
}

impl Default for Exchange<InMemoryLedger> {
    fn default() -> Self {
        Self::new(InMemoryLedger::new())
    }
}

impl<L: Ledger> Exchange<L> {
    /// Create an exchange with the default guard ceilings (300 / 500 bps)
    pub fn new(ledger: L) -> Self {
        Self::with_config(ledger, &GuardConfig::default())
    }

    pub fn with_config(ledger: L, guard: &GuardConfig) -> Self {
        Self {
            pools: PoolStore::new(),
            ledger,
            guard: SlippageGuard::from_config(guard),
            events: Vec::new(),
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn guard(&self) -> &SlippageGuard {
        &self.guard
    }

    /// Register a trading pair with zero reserves
    ///
    /// # Errors
    /// - `InvalidPair` if both assets are the same
    /// - `PairExists` if the pair is already registered, in either order
    pub fn create_pair(&mut self, asset_x: AssetId, asset_y: AssetId) -> ExchangeResult<PoolId> {
        let pool_id = self.pools.create_pair(asset_x.clone(), asset_y.clone())?;
        info!("Created pair {}/{} as {}", asset_x, asset_y, pool_id);
        self.events.push(ExchangeEvent::PairCreated {
            pool_id,
            asset_x,
            asset_y,
        });
        Ok(pool_id)
    }

    /// Current `(reserve_x, reserve_y)` of a pool
    pub fn get_current_reserves(&self, pool_id: PoolId) -> ExchangeResult<(u128, u128)> {
        let pool = self.pools.get(pool_id)?;
        Ok((pool.reserve_x, pool.reserve_y))
    }

    pub fn pool(&self, pool_id: PoolId) -> ExchangeResult<&Pool> {
        self.pools.get(pool_id)
    }

    /// All pools in creation order
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.iter()
    }

    /// Pool trading `a` against `b`, in either order
    pub fn pool_for_pair(&self, a: &AssetId, b: &AssetId) -> Option<PoolId> {
        self.pools.find_pair(a, b)
    }

    /// Spot price of a pool, `asset_y` per `asset_x`
    pub fn spot_price(&self, pool_id: PoolId) -> ExchangeResult<Option<Decimal>> {
        Ok(self.pools.get(pool_id)?.spot_price())
    }

    /// Size of an account's liquidity claim on a pool
    pub fn lp_balance(&self, pool_id: PoolId, account: &AccountId) -> ExchangeResult<u128> {
        Ok(self.pools.get(pool_id)?.lp_balance(account))
    }

    /// Records buffered since the last drain
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    /// Hand buffered records to the host, oldest first
    pub fn drain_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Verify then apply a settlement; nothing moves unless every leg is covered
    pub(crate) fn settle(&mut self, settlement: Settlement<'_>) -> ExchangeResult<()> {
        settlement.verify(&self.ledger)?;
        settlement.apply(&mut self.ledger)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;

    #[test]
    fn test_create_pair_emits_record() {
        let mut exchange = Exchange::new(InMemoryLedger::new());
        let id = exchange
            .create_pair(AssetId::new("WETH"), AssetId::new("USDC"))
            .unwrap();

        assert_eq!(exchange.get_current_reserves(id).unwrap(), (0, 0));
        assert_eq!(
            exchange.drain_events(),
            vec![ExchangeEvent::PairCreated {
                pool_id: id,
                asset_x: AssetId::new("WETH"),
                asset_y: AssetId::new("USDC"),
            }]
        );
        assert!(exchange.events().is_empty());
    }

    #[test]
    fn test_failed_create_emits_nothing() {
        let mut exchange = Exchange::new(InMemoryLedger::new());
        let err = exchange
            .create_pair(AssetId::new("WETH"), AssetId::new("WETH"))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_pair");
        assert!(exchange.events().is_empty());
    }

    #[test]
    fn test_views_report_missing_pool() {
        let exchange = Exchange::new(InMemoryLedger::new());
        assert_eq!(
            exchange.get_current_reserves(PoolId::new(0)),
            Err(ExchangeError::PairNotExists(PoolId::new(0)))
        );
        assert!(exchange.pool_for_pair(&"A".into(), &"B".into()).is_none());
    }

    #[test]
    fn test_guard_follows_config() {
        let config = GuardConfig {
            max_price_impact_bps: 150,
            max_slippage_tolerance_bps: 200,
        };
        let exchange = Exchange::with_config(InMemoryLedger::new(), &config);
        assert_eq!(exchange.guard().max_price_impact_bps(), 150);
        assert_eq!(exchange.guard().max_slippage_tolerance_bps(), 200);
    }
}
