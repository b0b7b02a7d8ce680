//! Slippage Guard
//!
//! Wraps an exact-input swap with two pre-trade checks evaluated on a fresh
//! quote: a hard price-impact ceiling, and the caller's slippage tolerance
//! measured against the output they expected when they last quoted.

use amm::min_output_for_tolerance;
use pairswap_config::GuardConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use types::{AccountId, AssetId, PoolId};

use crate::error::{ExchangeError, ExchangeResult};
use crate::exchange::Exchange;
use crate::ledger::Ledger;

/// Risk ceilings applied to every guarded swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippageGuard {
    max_price_impact_bps: u128,
    max_slippage_tolerance_bps: u128,
}

impl Default for SlippageGuard {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

impl SlippageGuard {
    pub fn new(max_price_impact_bps: u128, max_slippage_tolerance_bps: u128) -> Self {
        Self {
            max_price_impact_bps,
            max_slippage_tolerance_bps,
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(
            u128::from(config.max_price_impact_bps),
            u128::from(config.max_slippage_tolerance_bps),
        )
    }

    pub fn max_price_impact_bps(&self) -> u128 {
        self.max_price_impact_bps
    }

    pub fn max_slippage_tolerance_bps(&self) -> u128 {
        self.max_slippage_tolerance_bps
    }

    /// Reject a caller tolerance above the hard ceiling
    pub fn check_tolerance(&self, requested_bps: u128) -> ExchangeResult<()> {
        if requested_bps > self.max_slippage_tolerance_bps {
            return Err(ExchangeError::ToleranceAboveCeiling {
                requested_bps,
                max_bps: self.max_slippage_tolerance_bps,
            });
        }
        Ok(())
    }

    /// Reject a quoted impact above the hard ceiling
    pub fn check_price_impact(&self, impact_bps: u128) -> ExchangeResult<()> {
        if impact_bps > self.max_price_impact_bps {
            return Err(ExchangeError::PriceImpactTooHigh {
                impact_bps,
                max_impact_bps: self.max_price_impact_bps,
            });
        }
        Ok(())
    }

    /// Fail unless `actual_output >= expected_output * (10000 - max_slippage_bps) / 10000`
    pub fn validate_slippage(
        expected_output: u128,
        actual_output: u128,
        max_slippage_bps: u128,
    ) -> ExchangeResult<()> {
        let floor = min_output_for_tolerance(expected_output, max_slippage_bps)?;
        if actual_output < floor {
            return Err(ExchangeError::SlippageTooHigh {
                expected: expected_output,
                actual: actual_output,
                max_slippage_bps,
            });
        }
        Ok(())
    }
}

/// Parameters of a guarded exact-input swap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSwapRequest {
    pub pool_id: PoolId,
    pub asset_in: AssetId,
    pub amount_in: u128,
    /// Hard floor passed through to execution
    pub min_amount_out: u128,
    /// Output the caller saw when quoting, usually `SwapQuote::amount_out`
    pub expected_amount_out: u128,
    /// Allowed shortfall from `expected_amount_out`, capped by the guard
    pub max_slippage_bps: u128,
}

impl<L: Ledger> Exchange<L> {
    /// Exact-input swap behind the price-impact and slippage checks
    ///
    /// All checks run on a fresh quote before any state changes.
    ///
    /// # Errors
    /// - `ToleranceAboveCeiling` if `max_slippage_bps` exceeds the guard ceiling
    /// - `PriceImpactTooHigh` if the quoted impact exceeds the guard ceiling
    /// - `SlippageTooHigh` if the fresh quote misses the caller's tolerance
    /// - every failure of [`Exchange::swap_exact_input`]
    pub fn safe_swap(
        &mut self,
        caller: &AccountId,
        request: &SafeSwapRequest,
    ) -> ExchangeResult<u128> {
        self.guard.check_tolerance(request.max_slippage_bps)?;

        let quote =
            self.quote_exact_input(request.pool_id, &request.asset_in, request.amount_in)?;
        if let Err(err) = self.guard.check_price_impact(quote.price_impact_bps) {
            warn!(
                "Rejected swap of {} {} on {}: {}",
                request.amount_in, request.asset_in, request.pool_id, err
            );
            return Err(err);
        }

        if let Err(err) = SlippageGuard::validate_slippage(
            request.expected_amount_out,
            quote.amount_out,
            request.max_slippage_bps,
        ) {
            warn!("Rejected swap on {}: {}", request.pool_id, err);
            return Err(err);
        }

        debug!(
            "Guard passed for {} on {}: impact {} bps, output {}",
            caller, request.pool_id, quote.price_impact_bps, quote.amount_out
        );
        self.swap_exact_input(
            request.pool_id,
            &request.asset_in,
            request.amount_in,
            request.min_amount_out,
            caller,
        )
    }
}
