//! Pool registry
//!
//! Pools live in an arena addressed by [`PoolId`], with a secondary index
//! from the unordered asset pair to the pool that trades it.

use std::collections::HashMap;

use types::{AssetId, PoolId};

use crate::error::{ExchangeError, ExchangeResult};
use crate::pool::Pool;

/// Arena of pools plus a pair index
#[derive(Debug, Default)]
pub struct PoolStore {
    pools: Vec<Pool>,
    /// Token pair index: (lower asset, higher asset) -> pool id
    pair_index: HashMap<(AssetId, AssetId), PoolId>,
}

/// Order-insensitive key for a pair
fn pair_key(a: &AssetId, b: &AssetId) -> (AssetId, AssetId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl PoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new pair with zero reserves
    pub fn create_pair(&mut self, asset_x: AssetId, asset_y: AssetId) -> ExchangeResult<PoolId> {
        if asset_x == asset_y {
            return Err(ExchangeError::InvalidPair { asset: asset_x });
        }

        let key = pair_key(&asset_x, &asset_y);
        if let Some(existing) = self.pair_index.get(&key) {
            return Err(ExchangeError::PairExists { pool_id: *existing });
        }

        let pool_id = PoolId::new(self.pools.len() as u64);
        self.pools.push(Pool::new(pool_id, asset_x, asset_y));
        self.pair_index.insert(key, pool_id);
        Ok(pool_id)
    }

    pub fn get(&self, pool_id: PoolId) -> ExchangeResult<&Pool> {
        usize::try_from(pool_id.inner())
            .ok()
            .and_then(|index| self.pools.get(index))
            .ok_or(ExchangeError::PairNotExists(pool_id))
    }

    pub fn get_mut(&mut self, pool_id: PoolId) -> ExchangeResult<&mut Pool> {
        usize::try_from(pool_id.inner())
            .ok()
            .and_then(|index| self.pools.get_mut(index))
            .ok_or(ExchangeError::PairNotExists(pool_id))
    }

    /// Pool trading `a` against `b`, in either order
    pub fn find_pair(&self, a: &AssetId, b: &AssetId) -> Option<PoolId> {
        self.pair_index.get(&pair_key(a, b)).copied()
    }

    /// All pools in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.pools.iter()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
