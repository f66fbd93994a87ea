//! Burn delegates for exercising `StakeLedger::burn`.

use std::collections::HashMap;

use tenure_ledger::{BurnRedeemable, DelegateContext, LedgerError, StakeLedger};
use tenure_token::TokenLedger;
use tenure_types::{AccountId, BlockContext, CertificateId};

/// A well-behaved delegate: credits the user with the burned id's number in
/// its own book.
pub struct Burner {
    identity: AccountId,
    credits: HashMap<AccountId, u64>,
}

impl Burner {
    pub fn new(identity: AccountId) -> Self {
        Self {
            identity,
            credits: HashMap::new(),
        }
    }

    /// Burn `id` on `user`'s behalf.
    pub fn exchange_tokens<L: TokenLedger>(
        &mut self,
        ledger: &mut StakeLedger<L>,
        user: &AccountId,
        id: CertificateId,
        ctx: BlockContext,
    ) -> Result<(), LedgerError> {
        ledger.burn(self, user, id, ctx)
    }

    pub fn balance_of(&self, user: &AccountId) -> u64 {
        self.credits.get(user).copied().unwrap_or(0)
    }
}

impl<L: TokenLedger> BurnRedeemable<L> for Burner {
    fn identity(&self) -> &AccountId {
        &self.identity
    }

    fn on_token_burned(
        &mut self,
        _cx: &mut DelegateContext<'_, L>,
        user: &AccountId,
        id: CertificateId,
    ) -> Result<(), LedgerError> {
        *self.credits.entry(user.clone()).or_default() += id.as_u64();
        Ok(())
    }
}

/// Tries to burn the same certificate a second time from inside the callback.
pub struct BadBurner {
    identity: AccountId,
    /// Error the nested burn returned, if it ran.
    pub nested_error: Option<String>,
}

impl BadBurner {
    pub fn new(identity: AccountId) -> Self {
        Self {
            identity,
            nested_error: None,
        }
    }

    pub fn exchange_tokens<L: TokenLedger>(
        &mut self,
        ledger: &mut StakeLedger<L>,
        user: &AccountId,
        id: CertificateId,
        ctx: BlockContext,
    ) -> Result<(), LedgerError> {
        ledger.burn(self, user, id, ctx)
    }
}

impl<L: TokenLedger> BurnRedeemable<L> for BadBurner {
    fn identity(&self) -> &AccountId {
        &self.identity
    }

    fn on_token_burned(
        &mut self,
        cx: &mut DelegateContext<'_, L>,
        user: &AccountId,
        id: CertificateId,
    ) -> Result<(), LedgerError> {
        let result = cx.burn(self, user, id);
        if let Err(e) = &result {
            self.nested_error = Some(e.to_string());
        }
        result
    }
}

/// Grants a token allowance through its delegate context, then fails.
pub struct RevertingBurner {
    identity: AccountId,
}

impl RevertingBurner {
    pub fn new(identity: AccountId) -> Self {
        Self { identity }
    }

    pub fn exchange_tokens<L: TokenLedger>(
        &mut self,
        ledger: &mut StakeLedger<L>,
        user: &AccountId,
        id: CertificateId,
        ctx: BlockContext,
    ) -> Result<(), LedgerError> {
        ledger.burn(self, user, id, ctx)
    }
}

impl<L: TokenLedger> BurnRedeemable<L> for RevertingBurner {
    fn identity(&self) -> &AccountId {
        &self.identity
    }

    fn on_token_burned(
        &mut self,
        cx: &mut DelegateContext<'_, L>,
        user: &AccountId,
        _id: CertificateId,
    ) -> Result<(), LedgerError> {
        cx.approve_tokens(user, 1)?;
        Err(LedgerError::InvalidArgument("burner reverted".into()))
    }
}
