//! # Pairswap Exchange Engine
//!
//! Constant-product pools with liquidity provisioning, single-hop swaps, a
//! slippage guard and multi-hop routing. Token custody lives behind the
//! [`Ledger`] trait; the engine only stages debits and credits and commits
//! them all-or-nothing.
//!
//! ## Example
//!
//! ```rust
//! use exchange::{Exchange, InMemoryLedger, Route};
//! use types::{AccountId, AssetId};
//!
//! let alice = AccountId::new("alice");
//! let (weth, usdc) = (AssetId::new("WETH"), AssetId::new("USDC"));
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.deposit(&alice, &weth, 20_000).unwrap();
//! ledger.deposit(&alice, &usdc, 20_000).unwrap();
//!
//! let mut exchange = Exchange::new(ledger);
//! let pool = exchange.create_pair(weth.clone(), usdc.clone()).unwrap();
//! exchange.add_liquidity(pool, 10_000, 20_000, 0, 0, &alice).unwrap();
//!
//! let out = exchange.swap_exact_input(pool, &weth, 1_000, 0, &alice).unwrap();
//! assert_eq!(out, 1_813);
//!
//! let quoted = exchange.quote_route(&Route::new(usdc, vec![pool]), 500).unwrap();
//! assert_eq!(quoted.len(), 1);
//! ```

pub mod error;
pub mod exchange;
pub mod guard;
pub mod ledger;
pub mod liquidity;
pub mod logging;
pub mod pool;
pub mod router;
pub mod store;
pub mod swap;

pub use error::{ExchangeError, ExchangeResult};
pub use exchange::Exchange;
pub use guard::{SafeSwapRequest, SlippageGuard};
pub use ledger::{InMemoryLedger, Ledger, LedgerError};
pub use liquidity::LiquidityDeposit;
pub use logging::init_logging;
pub use pool::{Pool, Side};
pub use router::Route;
pub use store::PoolStore;
pub use swap::SwapQuote;

pub use amm::{Decimal, BPS_DENOMINATOR, FEE_BPS};
pub use types::{AccountId, AssetId, ExchangeEvent, LiquidityDirection, PoolId};
