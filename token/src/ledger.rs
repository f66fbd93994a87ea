//! Token ledger interface and the in-memory reference ledger.

use std::collections::HashMap;

use tenure_types::{AccountId, Timestamp};

use crate::error::TokenError;

/// Custody and payout operations the stake ledger needs from a token.
///
/// `snapshot`/`restore` let the stake ledger roll the token side back when a
/// call fails after the token ledger already moved funds. The stake ledger
/// takes one snapshot per call, nested calls included, so an implementation
/// backed by large state should hand out a cheap mark (an undo-log position
/// or a copy-on-write handle) rather than a full copy.
pub trait TokenLedger {
    type Snapshot;

    /// When the token went live; yield decay is measured from here.
    fn genesis_ts(&self) -> Timestamp;

    fn balance_of(&self, account: &AccountId) -> u128;

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128;

    fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError>;

    /// Release `principal` from `custody` to `to` and mint `reward` to `to`.
    fn payout(
        &mut self,
        custody: &AccountId,
        to: &AccountId,
        principal: u128,
        reward: u128,
    ) -> Result<(), TokenError>;

    fn snapshot(&self) -> Self::Snapshot;

    fn restore(&mut self, snapshot: Self::Snapshot);
}

#[derive(Clone, Debug, Default)]
struct Balances {
    balances: HashMap<AccountId, u128>,
    allowances: HashMap<(AccountId, AccountId), u128>,
    total_supply: u128,
}

/// A plain in-memory token ledger.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenLedger {
    genesis: Timestamp,
    state: Balances,
}

impl MemoryTokenLedger {
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            genesis,
            state: Balances::default(),
        }
    }

    /// Credit freshly minted tokens to `to`.
    pub fn mint(&mut self, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        let total = self
            .state
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let balance = self.state.balances.entry(to.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        self.state.total_supply = total;
        Ok(())
    }

    pub fn total_supply(&self) -> u128 {
        self.state.total_supply
    }

    fn debit(&mut self, from: &AccountId, amount: u128) -> Result<(), TokenError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.state.balances.insert(from.clone(), available - amount);
        Ok(())
    }

    fn credit(&mut self, to: &AccountId, amount: u128) -> Result<(), TokenError> {
        let balance = self.state.balances.entry(to.clone()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        Ok(())
    }
}

impl TokenLedger for MemoryTokenLedger {
    type Snapshot = MemoryTokenLedger;

    fn genesis_ts(&self) -> Timestamp {
        self.genesis
    }

    fn balance_of(&self, account: &AccountId) -> u128 {
        self.state.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> u128 {
        self.state
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn approve(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        self.state
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<(), TokenError> {
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount,
                approved,
            });
        }
        self.debit(from, amount)?;
        self.credit(to, amount)?;
        self.state
            .allowances
            .insert((from.clone(), spender.clone()), approved - amount);
        tracing::trace!(%from, %to, amount, "token transfer");
        Ok(())
    }

    fn payout(
        &mut self,
        custody: &AccountId,
        to: &AccountId,
        principal: u128,
        reward: u128,
    ) -> Result<(), TokenError> {
        self.debit(custody, principal)?;
        self.credit(to, principal)?;
        self.mint(to, reward)?;
        tracing::trace!(%to, principal, reward, "token payout");
        Ok(())
    }

    /// Full copy of the balance tables: O(accounts) per call. Fine for tests
    /// and simulations.
    fn snapshot(&self) -> Self::Snapshot {
        self.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.state = snapshot.state;
    }
}
