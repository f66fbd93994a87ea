//! The burn-delegate capability.

use tenure_record::StakeWord;
use tenure_token::TokenLedger;
use tenure_types::{AccountId, BlockContext, CertificateId};

use crate::{LedgerError, StakeLedger};

/// A third party allowed to burn certificates it has been approved for.
///
/// The ledger calls `on_token_burned` after the certificate is already gone.
/// The delegate gets a [`DelegateContext`], never the ledger itself, so it can
/// only act as its own identity. Returning an error undoes the whole burn
/// along with anything the delegate did through the context.
pub trait BurnRedeemable<L: TokenLedger> {
    /// The account approvals are checked against.
    fn identity(&self) -> &AccountId;

    fn on_token_burned(
        &mut self,
        cx: &mut DelegateContext<'_, L>,
        user: &AccountId,
        id: CertificateId,
    ) -> Result<(), LedgerError>;
}

/// What a burn delegate may do while it is being notified.
///
/// Every mutating call runs as the delegate's identity and goes through the
/// same checks as a top-level call. There is no path to custody funds or to
/// the raw token ledger.
pub struct DelegateContext<'a, L: TokenLedger> {
    ledger: &'a mut StakeLedger<L>,
    identity: AccountId,
    ctx: BlockContext,
}

impl<'a, L: TokenLedger> DelegateContext<'a, L> {
    pub(crate) fn new(ledger: &'a mut StakeLedger<L>, identity: AccountId, ctx: BlockContext) -> Self {
        Self {
            ledger,
            identity,
            ctx,
        }
    }

    pub fn identity(&self) -> &AccountId {
        &self.identity
    }

    /// Block the burn happened in.
    pub fn block(&self) -> BlockContext {
        self.ctx
    }

    pub fn stake_info(&self, id: CertificateId) -> StakeWord {
        self.ledger.stake_info(id)
    }

    pub fn owner_of(&self, id: CertificateId) -> Result<&AccountId, LedgerError> {
        self.ledger.owner_of(id)
    }

    pub fn token_balance(&self, account: &AccountId) -> u128 {
        self.ledger.token.balance_of(account)
    }

    /// Burn another certificate. `delegate` must carry the same identity.
    pub fn burn(
        &mut self,
        delegate: &mut dyn BurnRedeemable<L>,
        user: &AccountId,
        id: CertificateId,
    ) -> Result<(), LedgerError> {
        if delegate.identity() != &self.identity {
            return Err(LedgerError::Unauthorized(format!(
                "{} cannot burn on behalf of {}",
                self.identity,
                delegate.identity()
            )));
        }
        self.ledger.burn(delegate, user, id, self.ctx)
    }

    /// Transfer a certificate with the delegate as operator.
    pub fn transfer_from(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        id: CertificateId,
    ) -> Result<(), LedgerError> {
        let operator = self.identity.clone();
        self.ledger.transfer_from(&operator, from, to, id, self.ctx)
    }

    /// Approve a certificate with the delegate as caller.
    pub fn approve(
        &mut self,
        spender: Option<&AccountId>,
        id: CertificateId,
    ) -> Result<(), LedgerError> {
        let caller = self.identity.clone();
        self.ledger.approve(&caller, spender, id)
    }

    /// Grant `spender` an allowance over the delegate's own tokens.
    pub fn approve_tokens(&mut self, spender: &AccountId, amount: u128) -> Result<(), LedgerError> {
        self.ledger.token.approve(&self.identity, spender, amount)?;
        Ok(())
    }
}
