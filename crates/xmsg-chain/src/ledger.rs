//! # Native Value Ledger

use crate::errors::ChainError;
use parking_lot::RwLock;
use primitive_types::U256;
use std::collections::HashMap;
use std::sync::Arc;
use xmsg_types::ChainAddress;

/// Balances of native value per address.
///
/// Cheap to clone; clones share the same balances so undo entries can hold one.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    balances: Arc<RwLock<HashMap<ChainAddress, U256>>>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account` (zero if unknown).
    #[must_use]
    pub fn balance_of(&self, account: &ChainAddress) -> U256 {
        self.balances
            .read()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    /// Overwrites a balance, returning the previous one.
    pub(crate) fn set(&self, account: ChainAddress, amount: U256) -> U256 {
        let mut balances = self.balances.write();
        let previous = balances.get(&account).copied().unwrap_or_default();
        if amount.is_zero() {
            balances.remove(&account);
        } else {
            balances.insert(account, amount);
        }
        previous
    }

    /// Computes the balances after moving `amount` from `from` to `to`.
    pub(crate) fn plan_transfer(
        &self,
        from: &ChainAddress,
        to: &ChainAddress,
        amount: U256,
    ) -> Result<(U256, U256), ChainError> {
        let available = self.balance_of(from);
        let debited = available
            .checked_sub(amount)
            .ok_or(ChainError::InsufficientBalance {
                account: *from,
                required: amount,
                available,
            })?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(ChainError::BalanceOverflow(*to))?;
        Ok((debited, credited))
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.balances
            .read()
            .values()
            .fold(U256::zero(), |acc, v| acc.saturating_add(*v))
    }
}
