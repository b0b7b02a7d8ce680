//! Token custody seam
//!
//! The engine never owns balances itself. It talks to a [`Ledger`] that can
//! debit and credit an account's balance of a fungible asset, and stages
//! every call into a [`Settlement`] that is checked in full before the first
//! balance moves.

use std::collections::BTreeMap;

use thiserror::Error;
use types::{AccountId, AssetId};

/// Failures reported by a ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{account} holds {available} {asset}, needs {required}")]
    InsufficientBalance {
        account: AccountId,
        asset: AssetId,
        available: u128,
        required: u128,
    },

    #[error("Balance of {asset} for {account} would overflow")]
    Overflow { account: AccountId, asset: AssetId },
}

/// External debit/credit primitives for fungible assets
///
/// `debit` must succeed whenever `balance` reports enough funds; the
/// settlement logic relies on that to stay all-or-nothing.
pub trait Ledger {
    /// Current balance of `asset` held by `account`
    fn balance(&self, account: &AccountId, asset: &AssetId) -> u128;

    /// Remove `amount` of `asset` from `account`
    fn debit(&mut self, account: &AccountId, asset: &AssetId, amount: u128)
        -> Result<(), LedgerError>;

    /// Add `amount` of `asset` to `account`
    fn credit(
        &mut self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), LedgerError>;
}

/// Balances held in memory, keyed by account then asset
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<AccountId, BTreeMap<AssetId, u128>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fund an account from outside the exchange
    pub fn deposit(
        &mut self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.credit(account, asset, amount)
    }

    /// Every non-zero balance of `account`
    pub fn balances_of(&self, account: &AccountId) -> impl Iterator<Item = (&AssetId, u128)> {
        self.balances
            .get(account)
            .into_iter()
            .flat_map(|assets| assets.iter().map(|(asset, amount)| (asset, *amount)))
            .filter(|(_, amount)| *amount > 0)
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, account: &AccountId, asset: &AssetId) -> u128 {
        self.balances
            .get(account)
            .and_then(|assets| assets.get(asset))
            .copied()
            .unwrap_or(0)
    }

    fn debit(
        &mut self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let available = self.balance(account, asset);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or_else(|| LedgerError::InsufficientBalance {
                    account: account.clone(),
                    asset: asset.clone(),
                    available,
                    required: amount,
                })?;
        self.balances
            .entry(account.clone())
            .or_default()
            .insert(asset.clone(), remaining);
        Ok(())
    }

    fn credit(
        &mut self,
        account: &AccountId,
        asset: &AssetId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        let slot = self
            .balances
            .entry(account.clone())
            .or_default()
            .entry(asset.clone())
            .or_insert(0);
        *slot = slot.checked_add(amount).ok_or_else(|| LedgerError::Overflow {
            account: account.clone(),
            asset: asset.clone(),
        })?;
        Ok(())
    }
}

/// Staged balance movements for one caller
///
/// Debits and credits of the same asset are netted, so a route that starts
/// and ends in the same asset moves only the difference.
#[derive(Debug)]
pub(crate) struct Settlement<'a> {
    account: &'a AccountId,
    /// asset -> (total debit, total credit)
    legs: BTreeMap<AssetId, (u128, u128)>,
}

impl<'a> Settlement<'a> {
    pub(crate) fn new(account: &'a AccountId) -> Self {
        Self {
            account,
            legs: BTreeMap::new(),
        }
    }

    pub(crate) fn debit(mut self, asset: &AssetId, amount: u128) -> Result<Self, LedgerError> {
        let leg = self.legs.entry(asset.clone()).or_insert((0, 0));
        leg.0 = leg.0.checked_add(amount).ok_or_else(|| LedgerError::Overflow {
            account: self.account.clone(),
            asset: asset.clone(),
        })?;
        Ok(self)
    }

    pub(crate) fn credit(mut self, asset: &AssetId, amount: u128) -> Result<Self, LedgerError> {
        let leg = self.legs.entry(asset.clone()).or_insert((0, 0));
        leg.1 = leg.1.checked_add(amount).ok_or_else(|| LedgerError::Overflow {
            account: self.account.clone(),
            asset: asset.clone(),
        })?;
        Ok(self)
    }

    /// Check every leg against current balances without moving anything
    pub(crate) fn verify<L: Ledger + ?Sized>(&self, ledger: &L) -> Result<(), LedgerError> {
        for (asset, (debit, credit)) in &self.legs {
            let available = ledger.balance(self.account, asset);
            let with_credit =
                available
                    .checked_add(*credit)
                    .ok_or_else(|| LedgerError::Overflow {
                        account: self.account.clone(),
                        asset: asset.clone(),
                    })?;
            if with_credit < *debit {
                return Err(LedgerError::InsufficientBalance {
                    account: self.account.clone(),
                    asset: asset.clone(),
                    available,
                    required: debit - credit,
                });
            }
        }
        Ok(())
    }

    /// Move the netted amounts; call only after [`Settlement::verify`]
    pub(crate) fn apply<L: Ledger + ?Sized>(self, ledger: &mut L) -> Result<(), LedgerError> {
        for (asset, (debit, credit)) in &self.legs {
            if debit > credit {
                ledger.debit(self.account, asset, debit - credit)?;
            } else if credit > debit {
                ledger.credit(self.account, asset, credit - debit)?;
            }
        }
        Ok(())
    }
}
