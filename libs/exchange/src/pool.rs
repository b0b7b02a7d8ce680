//! Pool state for one trading pair

use std::collections::BTreeMap;

use amm::{price_ratio, DirectedReserves, Decimal, FEE_BPS};
use serde::{Deserialize, Serialize};
use types::{AccountId, AssetId, PoolId};

use crate::error::{ExchangeError, ExchangeResult};

/// Which of the pool's two assets a caller refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    X,
    Y,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::X => Side::Y,
            Side::Y => Side::X,
        }
    }
}

/// Complete state of a single pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub asset_x: AssetId,
    pub asset_y: AssetId,
    pub reserve_x: u128,
    pub reserve_y: u128,
    pub lp_supply: u128,
    /// Liquidity claims by holder; entries are removed when they reach zero
    claims: BTreeMap<AccountId, u128>,
}

impl Pool {
    /// Create an uninitialized pool with zero reserves and no claims
    pub fn new(id: PoolId, asset_x: AssetId, asset_y: AssetId) -> Self {
        Self {
            id,
            asset_x,
            asset_y,
            reserve_x: 0,
            reserve_y: 0,
            lp_supply: 0,
            claims: BTreeMap::new(),
        }
    }

    /// Trading fee charged on every input
    pub fn fee_bps(&self) -> u128 {
        FEE_BPS
    }

    /// Both reserves are positive, so the pool can price swaps
    pub fn is_initialized(&self) -> bool {
        self.reserve_x > 0 && self.reserve_y > 0
    }

    /// Check if pool trades a specific asset
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.asset_x == *asset || self.asset_y == *asset
    }

    /// Resolve an asset to its side of the pair
    pub fn side_of(&self, asset: &AssetId) -> ExchangeResult<Side> {
        if self.asset_x == *asset {
            Ok(Side::X)
        } else if self.asset_y == *asset {
            Ok(Side::Y)
        } else {
            Err(ExchangeError::AssetNotInPool {
                pool_id: self.id,
                asset: asset.clone(),
            })
        }
    }

    pub fn asset(&self, side: Side) -> &AssetId {
        match side {
            Side::X => &self.asset_x,
            Side::Y => &self.asset_y,
        }
    }

    pub fn reserve(&self, side: Side) -> u128 {
        match side {
            Side::X => self.reserve_x,
            Side::Y => self.reserve_y,
        }
    }

    /// Reserves oriented for a trade that pays in `side_in`
    pub fn directed(&self, side_in: Side) -> DirectedReserves {
        DirectedReserves::new(self.reserve(side_in), self.reserve(side_in.opposite()))
    }

    /// Store reserves produced by a swap that paid in `side_in`
    pub(crate) fn set_directed(&mut self, side_in: Side, reserves: DirectedReserves) {
        match side_in {
            Side::X => {
                self.reserve_x = reserves.reserve_in;
                self.reserve_y = reserves.reserve_out;
            }
            Side::Y => {
                self.reserve_y = reserves.reserve_in;
                self.reserve_x = reserves.reserve_out;
            }
        }
    }

    /// Get spot price (asset_y per asset_x)
    pub fn spot_price(&self) -> Option<Decimal> {
        if !self.is_initialized() {
            return None;
        }
        price_ratio(self.reserve_y, self.reserve_x)
    }

    /// Size of an account's liquidity claim
    pub fn lp_balance(&self, account: &AccountId) -> u128 {
        self.claims.get(account).copied().unwrap_or(0)
    }

    /// Number of accounts holding a claim
    pub fn holders(&self) -> usize {
        self.claims.len()
    }

    pub(crate) fn mint_claim(&mut self, account: &AccountId, amount: u128) -> ExchangeResult<()> {
        let lp_supply = self
            .lp_supply
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;
        let claim = self
            .lp_balance(account)
            .checked_add(amount)
            .ok_or(ExchangeError::Overflow)?;
        self.lp_supply = lp_supply;
        self.claims.insert(account.clone(), claim);
        Ok(())
    }

    pub(crate) fn burn_claim(&mut self, account: &AccountId, amount: u128) -> ExchangeResult<()> {
        let remaining = self
            .lp_balance(account)
            .checked_sub(amount)
            .ok_or(ExchangeError::InsufficientBalance)?;
        self.lp_supply = self
            .lp_supply
            .checked_sub(amount)
            .ok_or(ExchangeError::Overflow)?;
        if remaining == 0 {
            self.claims.remove(account);
        } else {
            self.claims.insert(account.clone(), remaining);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pool() -> Pool {
        Pool::new(PoolId::new(0), AssetId::new("WETH"), AssetId::new("USDC"))
    }

    #[test]
    fn test_new_pool_is_uninitialized() {
        let pool = pool();
        assert!(!pool.is_initialized());
        assert_eq!(pool.spot_price(), None);
        assert_eq!(pool.fee_bps(), 30);
    }

    #[test]
    fn test_side_resolution() {
        let pool = pool();
        assert_eq!(pool.side_of(&AssetId::new("USDC")).unwrap(), Side::Y);
        assert_eq!(pool.asset(Side::Y.opposite()), &AssetId::new("WETH"));
        assert!(matches!(
            pool.side_of(&AssetId::new("DAI")),
            Err(ExchangeError::AssetNotInPool { .. })
        ));
    }

    #[test]
    fn test_directed_reserves_follow_side() {
        let mut pool = pool();
        pool.reserve_x = 10;
        pool.reserve_y = 20;
        assert_eq!(pool.directed(Side::Y), DirectedReserves::new(20, 10));

        pool.set_directed(Side::Y, DirectedReserves::new(25, 8));
        assert_eq!((pool.reserve_x, pool.reserve_y), (8, 25));
        assert_eq!(pool.spot_price(), Some(dec!(3.125)));
    }

    #[test]
    fn test_claims_mint_and_burn() {
        let mut pool = pool();
        let alice = AccountId::new("alice");
        pool.mint_claim(&alice, 100).unwrap();
        assert_eq!(pool.lp_supply, 100);
        assert_eq!(
            pool.burn_claim(&alice, 101),
            Err(ExchangeError::InsufficientBalance)
        );

        pool.burn_claim(&alice, 100).unwrap();
        assert_eq!(pool.lp_supply, 0);
        assert_eq!(pool.holders(), 0);
    }
}
