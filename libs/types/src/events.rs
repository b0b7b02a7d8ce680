//! Observable records emitted by state-changing exchange operations
//!
//! Records are produced only after an operation has fully committed, so an
//! observer never sees a record for a call that was rolled back.

use crate::{AccountId, AssetId, PoolId};
use serde::{Deserialize, Serialize};

/// Which way a liquidity change moved the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityDirection {
    Added,
    Removed,
}

/// Record emitted for off-chain observers after each committed operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExchangeEvent {
    PairCreated {
        pool_id: PoolId,
        asset_x: AssetId,
        asset_y: AssetId,
    },
    LiquidityChanged {
        pool_id: PoolId,
        account: AccountId,
        direction: LiquidityDirection,
        amount_x: u128,
        amount_y: u128,
        /// LP claims minted (added) or burned (removed)
        lp_delta: u128,
        reserve_x: u128,
        reserve_y: u128,
    },
    SwapCompleted {
        pool_id: PoolId,
        account: AccountId,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: u128,
        amount_out: u128,
        reserve_x: u128,
        reserve_y: u128,
    },
}

impl ExchangeEvent {
    /// Pool the record refers to
    pub fn pool_id(&self) -> PoolId {
        match self {
            ExchangeEvent::PairCreated { pool_id, .. }
            | ExchangeEvent::LiquidityChanged { pool_id, .. }
            | ExchangeEvent::SwapCompleted { pool_id, .. } => *pool_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_is_tagged() {
        let event = ExchangeEvent::PairCreated {
            pool_id: PoolId::new(0),
            asset_x: AssetId::new("WETH"),
            asset_y: AssetId::new("USDC"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "pair_created");
        assert_eq!(json["pool_id"], 0);
        assert_eq!(json["asset_y"], "USDC");
    }

    #[test]
    fn test_pool_id_accessor() {
        let event = ExchangeEvent::LiquidityChanged {
            pool_id: PoolId::new(4),
            account: AccountId::new("alice"),
            direction: LiquidityDirection::Removed,
            amount_x: 10,
            amount_y: 20,
            lp_delta: 14,
            reserve_x: 0,
            reserve_y: 0,
        };
        assert_eq!(event.pool_id(), PoolId::new(4));
    }
}
