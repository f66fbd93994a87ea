//! The stake ledger: certificate lifecycle, transfers, approvals and burns.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tenure_record::{StakeInfo, StakeWord};
use tenure_token::{TokenLedger, YieldSchedule};
use tenure_types::{
    AccountId, BlockContext, BlockId, CertificateId, CertificateState, Disposal, LedgerParams,
    Timestamp,
};

use crate::certificate::{Certificate, CertificateEntry};
use crate::delegate::{BurnRedeemable, DelegateContext};
use crate::journal::{Journal, Undo};
use crate::ownership::OwnershipIndex;
use crate::{payout, LedgerError, LedgerEvent, LedgerMetrics};

/// The account that holds staked principal until a stake ends.
pub const CUSTODY_ACCOUNT: &str = "tnr_stake_custody";

/// Authoritative state of every stake certificate.
///
/// All mutating calls take the caller and a [`BlockContext`] explicitly and
/// run inside a journal frame: on error every write made by the call,
/// including token movements and anything a burn delegate did, is undone.
///
/// Committed events accumulate in memory until the host takes them with
/// [`drain_events`](Self::drain_events). A long-running host must drain
/// regularly; the log is never trimmed on its own.
pub struct StakeLedger<L: TokenLedger> {
    params: LedgerParams,
    custody: AccountId,
    pub(crate) token: L,
    schedule: Box<dyn YieldSchedule>,
    pub(crate) certificates: HashMap<CertificateId, CertificateEntry>,
    pub(crate) disposals: HashMap<CertificateId, Disposal>,
    pub(crate) index: OwnershipIndex,
    pub(crate) operators: HashSet<(AccountId, AccountId)>,
    /// Last id handed out; 0 before the first stake.
    pub(crate) counter: u64,
    events: Vec<LedgerEvent>,
    pub(crate) journal: Journal<L::Snapshot>,
    metrics: Option<Arc<LedgerMetrics>>,
}

impl<L: TokenLedger> StakeLedger<L> {
    pub fn new(
        params: LedgerParams,
        token: L,
        schedule: Box<dyn YieldSchedule>,
    ) -> Result<Self, LedgerError> {
        params
            .validate()
            .map_err(|e| LedgerError::InvalidArgument(e.to_string()))?;
        Ok(Self {
            params,
            custody: AccountId::new(CUSTODY_ACCOUNT),
            token,
            schedule,
            certificates: HashMap::new(),
            disposals: HashMap::new(),
            index: OwnershipIndex::new(),
            operators: HashSet::new(),
            counter: 0,
            events: Vec::new(),
            journal: Journal::new(),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<LedgerMetrics>) -> Self {
        metrics.set_totals(self.certificates.len(), self.locked_principal());
        self.metrics = Some(metrics);
        self
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Lock `amount` of the caller's tokens for `term_days` and mint a
    /// certificate for it.
    ///
    /// The caller must have approved the custody account for at least
    /// `amount` on the token ledger beforehand.
    pub fn create_stake(
        &mut self,
        caller: &AccountId,
        amount: u128,
        term_days: u32,
        ctx: BlockContext,
    ) -> Result<CertificateId, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidArgument(
                "stake amount must be non-zero".into(),
            ));
        }
        if term_days == 0 || u64::from(term_days) > self.params.max_term_days {
            return Err(LedgerError::InvalidArgument(format!(
                "stake term must be 1..={} days, got {term_days}",
                self.params.max_term_days
            )));
        }
        let term = u16::try_from(term_days).map_err(|_| {
            LedgerError::InvalidArgument(format!("stake term {term_days} exceeds 65535 days"))
        })?;

        self.atomically("create_stake", |l| {
            let now = ctx.timestamp;
            let apy = l.schedule.apy(term, now);

            let custody = l.custody.clone();
            l.token.transfer_from(&custody, caller, &custody, amount)?;

            let id = l
                .counter
                .checked_add(1)
                .map(CertificateId::new)
                .ok_or(LedgerError::Overflow)?;
            let maturity = now.plus_days(u64::from(term));
            let rarity = tenure_rarity::assess(id, ctx.block);
            let word = StakeInfo {
                term,
                maturity_ts: maturity.as_secs(),
                amount,
                apy,
                rarity_score: rarity.score,
                rarity_bits: rarity.bits,
            }
            .encode();

            l.set_counter(id.as_u64());
            l.put_entry(
                id,
                CertificateEntry {
                    word,
                    owner: caller.clone(),
                    approved: None,
                    created_block: ctx.block,
                    created_at: now,
                },
            );
            l.index_add(caller, id)?;
            l.emit(LedgerEvent::StakeCreated {
                id,
                owner: caller.clone(),
                amount,
                term_days: term,
                apy,
                maturity,
                rarity_score: rarity.score,
                rarity_bits: rarity.bits,
            });
            l.emit(LedgerEvent::Transfer {
                from: None,
                to: Some(caller.clone()),
                id,
            });

            tracing::debug!(%id, owner = %caller, amount, term, apy, score = rarity.score, "stake created");
            Ok(id)
        })
    }

    /// Redeem a matured stake: the certificate is destroyed, then principal
    /// plus reward is paid to the owner. Returns the total paid.
    pub fn end_stake(
        &mut self,
        caller: &AccountId,
        id: CertificateId,
        ctx: BlockContext,
    ) -> Result<u128, LedgerError> {
        self.atomically("end_stake", |l| {
            let entry = l
                .certificates
                .get(&id)
                .ok_or(LedgerError::NonExistentCertificate(id))?;
            if &entry.owner != caller {
                return Err(LedgerError::Unauthorized(format!(
                    "{caller} does not own certificate {id}"
                )));
            }
            let info = entry.info();
            let maturity = Timestamp::new(info.maturity_ts);
            if ctx.timestamp < maturity {
                return Err(LedgerError::NotYetMatured {
                    id,
                    maturity,
                    now: ctx.timestamp,
                });
            }
            let reward = payout::reward(info.amount, info.apy, info.term)?;
            let total = info
                .amount
                .checked_add(reward)
                .ok_or(LedgerError::Overflow)?;

            l.take_entry(id);
            l.set_disposal(id, Disposal::Redeemed);
            l.index_remove(caller, id)?;
            l.emit(LedgerEvent::StakeEnded {
                id,
                owner: caller.clone(),
                principal: info.amount,
                reward,
            });
            l.emit(LedgerEvent::Transfer {
                from: Some(caller.clone()),
                to: None,
                id,
            });

            let custody = l.custody.clone();
            l.token.payout(&custody, caller, info.amount, reward)?;

            tracing::debug!(%id, owner = %caller, principal = info.amount, reward, "stake ended");
            Ok(total)
        })
    }

    /// Move a certificate from `from` to `to` on behalf of `operator`.
    ///
    /// Refused during the blackout windows: right after creation and right
    /// after maturity, each `blackout_secs` long.
    pub fn transfer_from(
        &mut self,
        operator: &AccountId,
        from: &AccountId,
        to: &AccountId,
        id: CertificateId,
        ctx: BlockContext,
    ) -> Result<(), LedgerError> {
        self.atomically("transfer_from", |l| {
            let entry = l
                .certificates
                .get(&id)
                .ok_or(LedgerError::NonExistentCertificate(id))?;
            if &entry.owner != from {
                return Err(LedgerError::Unauthorized(format!(
                    "{from} does not own certificate {id}"
                )));
            }
            if !l.is_approved_or_owner(operator, entry) {
                return Err(LedgerError::Unauthorized(format!(
                    "{operator} is neither owner nor approved for certificate {id}"
                )));
            }
            if to == from {
                return Err(LedgerError::InvalidArgument(
                    "transfer to the current owner".into(),
                ));
            }
            if let Some(until) = l.blackout_until(entry, ctx.timestamp) {
                return Err(LedgerError::BlackoutPeriodActive { id, until });
            }

            let mut moved = entry.clone();
            moved.owner = to.clone();
            moved.approved = None;
            l.put_entry(id, moved);
            l.index_remove(from, id)?;
            l.index_add(to, id)?;
            l.emit(LedgerEvent::Transfer {
                from: Some(from.clone()),
                to: Some(to.clone()),
                id,
            });

            tracing::debug!(%id, %from, %to, %operator, "certificate transferred");
            Ok(())
        })
    }

    /// Burn `user`'s certificate on behalf of an approved delegate, then
    /// notify the delegate.
    ///
    /// The certificate is gone before the delegate runs, so a delegate that
    /// re-enters `burn` for the same id fails. If the delegate fails, the
    /// burn and everything the delegate did through the ledger is undone.
    pub fn burn(
        &mut self,
        delegate: &mut dyn BurnRedeemable<L>,
        user: &AccountId,
        id: CertificateId,
        ctx: BlockContext,
    ) -> Result<(), LedgerError> {
        self.atomically("burn", |l| {
            let entry = l
                .certificates
                .get(&id)
                .filter(|e| &e.owner == user)
                .ok_or(LedgerError::NonExistentCertificate(id))?;
            let delegate_id = delegate.identity().clone();
            let approved = entry.approved.as_ref() == Some(&delegate_id)
                || l.is_approved_for_all(user, &delegate_id);
            if !approved {
                return Err(LedgerError::Unauthorized(format!(
                    "{delegate_id} is not an approved operator for certificate {id}"
                )));
            }

            l.take_entry(id);
            l.set_disposal(id, Disposal::Burned);
            l.index_remove(user, id)?;
            l.emit(LedgerEvent::Burned {
                id,
                user: user.clone(),
                delegate: delegate_id.clone(),
            });
            l.emit(LedgerEvent::Transfer {
                from: Some(user.clone()),
                to: None,
                id,
            });

            let mut cx = DelegateContext::new(l, delegate_id.clone(), ctx);
            delegate
                .on_token_burned(&mut cx, user, id)
                .map_err(|e| {
                    tracing::warn!(%id, delegate = %delegate_id, error = %e, "burn delegate failed");
                    LedgerError::DelegateRejected {
                        delegate: delegate_id.clone(),
                        reason: e.to_string(),
                    }
                })?;

            tracing::debug!(%id, %user, delegate = %delegate_id, "certificate burned");
            Ok(())
        })
    }

    // ── Approvals ───────────────────────────────────────────────────────

    /// Approve `spender` for one certificate, or clear the approval with
    /// `None`. The caller must be the owner or one of its operators.
    pub fn approve(
        &mut self,
        caller: &AccountId,
        spender: Option<&AccountId>,
        id: CertificateId,
    ) -> Result<(), LedgerError> {
        self.atomically("approve", |l| {
            let entry = l
                .certificates
                .get(&id)
                .ok_or(LedgerError::NonExistentCertificate(id))?;
            if spender == Some(&entry.owner) {
                return Err(LedgerError::InvalidArgument(
                    "approval to the current owner".into(),
                ));
            }
            if caller != &entry.owner && !l.is_approved_for_all(&entry.owner, caller) {
                return Err(LedgerError::Unauthorized(format!(
                    "{caller} is neither owner nor operator for certificate {id}"
                )));
            }

            let owner = entry.owner.clone();
            let mut updated = entry.clone();
            updated.approved = spender.cloned();
            l.put_entry(id, updated);
            l.emit(LedgerEvent::Approval {
                owner,
                approved: spender.cloned(),
                id,
            });
            Ok(())
        })
    }

    pub fn get_approved(&self, id: CertificateId) -> Result<Option<&AccountId>, LedgerError> {
        self.certificates
            .get(&id)
            .map(|e| e.approved.as_ref())
            .ok_or(LedgerError::NonExistentCertificate(id))
    }

    /// Grant or revoke `operator` control over every certificate `owner` holds.
    pub fn set_approval_for_all(
        &mut self,
        owner: &AccountId,
        operator: &AccountId,
        approved: bool,
    ) -> Result<(), LedgerError> {
        if owner == operator {
            return Err(LedgerError::InvalidArgument(
                "cannot make an account its own operator".into(),
            ));
        }
        self.atomically("set_approval_for_all", |l| {
            l.set_operator(owner, operator, approved);
            l.emit(LedgerEvent::ApprovalForAll {
                owner: owner.clone(),
                operator: operator.clone(),
                approved,
            });
            Ok(())
        })
    }

    pub fn is_approved_for_all(&self, owner: &AccountId, operator: &AccountId) -> bool {
        self.operators
            .contains(&(owner.clone(), operator.clone()))
    }

    // ── Reads ───────────────────────────────────────────────────────────

    /// The packed record, or the zero word if `id` is not live.
    pub fn stake_info(&self, id: CertificateId) -> StakeWord {
        self.certificates
            .get(&id)
            .map_or(StakeWord::ZERO, |e| e.word)
    }

    pub fn owner_of(&self, id: CertificateId) -> Result<&AccountId, LedgerError> {
        self.certificates
            .get(&id)
            .map(|e| &e.owner)
            .ok_or(LedgerError::NonExistentCertificate(id))
    }

    pub fn certificate(&self, id: CertificateId, now: Timestamp) -> Option<Certificate> {
        self.certificates
            .get(&id)
            .map(|e| Certificate::from_entry(id, e, now))
    }

    pub fn state_of(&self, id: CertificateId, now: Timestamp) -> CertificateState {
        if let Some(entry) = self.certificates.get(&id) {
            return entry.state_at(now);
        }
        match self.disposals.get(&id) {
            Some(d) => CertificateState::from(*d),
            None => CertificateState::NonExistent,
        }
    }

    pub fn owned_tokens(&self, account: &AccountId) -> &[CertificateId] {
        self.index.owned(account)
    }

    pub fn balance_of(&self, account: &AccountId) -> usize {
        self.index.count(account)
    }

    /// Number of live certificates.
    pub fn total_supply(&self) -> usize {
        self.certificates.len()
    }

    /// Last id handed out.
    pub fn token_id_counter(&self) -> u64 {
        self.counter
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    pub fn symbol(&self) -> &str {
        &self.params.symbol
    }

    pub fn genesis_ts(&self) -> Timestamp {
        self.token.genesis_ts()
    }

    pub fn start_block(&self) -> BlockId {
        self.params.start_block
    }

    /// Royalty owed on a secondary sale: `(receiver, sale_price * bps / 10000)`.
    /// `None` when no receiver is configured.
    pub fn royalty_info(&self, sale_price: u128) -> Option<(AccountId, u128)> {
        let receiver = self.params.royalty_receiver.clone()?;
        let bps = u128::from(self.params.royalty_bps);
        let denom = LedgerParams::BPS_DENOMINATOR;
        // bps <= denom, so neither product can exceed sale_price.
        let amount = sale_price / denom * bps + sale_price % denom * bps / denom;
        Some((receiver, amount))
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    pub fn custody(&self) -> &AccountId {
        &self.custody
    }

    pub fn token(&self) -> &L {
        &self.token
    }

    /// Principal locked by live stakes, saturating.
    pub fn locked_principal(&self) -> u128 {
        self.certificates
            .values()
            .fold(0u128, |acc, e| acc.saturating_add(e.info().amount))
    }

    /// Every event committed since the last drain, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Take every committed event, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Guards ──────────────────────────────────────────────────────────

    fn is_approved_or_owner(&self, operator: &AccountId, entry: &CertificateEntry) -> bool {
        operator == &entry.owner
            || entry.approved.as_ref() == Some(operator)
            || self.is_approved_for_all(&entry.owner, operator)
    }

    /// End of the blackout window `now` falls in, if any.
    fn blackout_until(&self, entry: &CertificateEntry, now: Timestamp) -> Option<Timestamp> {
        let window = self.params.blackout_secs;
        let after_creation = entry.created_at.plus_secs(window);
        if now < after_creation {
            return Some(after_creation);
        }
        let maturity = entry.maturity();
        let after_maturity = maturity.plus_secs(window);
        if now >= maturity && now < after_maturity {
            return Some(after_maturity);
        }
        None
    }

    // ── Frames ──────────────────────────────────────────────────────────

    fn atomically<T>(
        &mut self,
        call: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let snapshot = self.token.snapshot();
        self.journal.open(self.events.len(), snapshot);
        match f(self) {
            Ok(value) => {
                if let Some(first_event) = self.journal.commit() {
                    self.publish(first_event);
                }
                Ok(value)
            }
            Err(e) => {
                self.rollback();
                if self.journal.depth() == 0 {
                    if let Some(m) = &self.metrics {
                        m.calls_rolled_back.inc();
                    }
                }
                tracing::debug!(call, depth = self.journal.depth(), error = %e, "ledger call rolled back");
                Err(e)
            }
        }
    }

    fn rollback(&mut self) {
        let Some((undo, events_len, token)) = self.journal.revert() else {
            return;
        };
        for entry in undo {
            self.apply_undo(entry);
        }
        self.events.truncate(events_len);
        self.token.restore(token);
    }

    fn apply_undo(&mut self, undo: Undo) {
        match undo {
            Undo::Certificate { id, prev: Some(e) } => {
                self.certificates.insert(id, e);
            }
            Undo::Certificate { id, prev: None } => {
                self.certificates.remove(&id);
            }
            Undo::Disposal { id, prev: Some(d) } => {
                self.disposals.insert(id, d);
            }
            Undo::Disposal { id, prev: None } => {
                self.disposals.remove(&id);
            }
            Undo::Operator {
                owner,
                operator,
                prev,
            } => {
                if prev {
                    self.operators.insert((owner, operator));
                } else {
                    self.operators.remove(&(owner, operator));
                }
            }
            Undo::Counter { prev } => self.counter = prev,
            Undo::IndexAdded { account, id } => {
                self.index.remove(&account, id);
            }
            Undo::IndexRemoved { account, id, pos } => self.index.reinsert(&account, id, pos),
        }
    }

    /// Feed events committed by an outermost call to the metrics.
    fn publish(&self, first_event: usize) {
        let Some(m) = &self.metrics else { return };
        for event in &self.events[first_event..] {
            m.observe(event);
        }
        m.set_totals(self.certificates.len(), self.locked_principal());
    }

    // ── Journaled writes ────────────────────────────────────────────────

    fn put_entry(&mut self, id: CertificateId, entry: CertificateEntry) {
        let prev = self.certificates.insert(id, entry);
        self.journal.record(Undo::Certificate { id, prev });
    }

    fn take_entry(&mut self, id: CertificateId) -> Option<CertificateEntry> {
        let prev = self.certificates.remove(&id);
        if let Some(entry) = &prev {
            self.journal.record(Undo::Certificate {
                id,
                prev: Some(entry.clone()),
            });
        }
        prev
    }

    fn set_disposal(&mut self, id: CertificateId, disposal: Disposal) {
        let prev = self.disposals.insert(id, disposal);
        self.journal.record(Undo::Disposal { id, prev });
    }

    fn set_operator(&mut self, owner: &AccountId, operator: &AccountId, approved: bool) {
        let key = (owner.clone(), operator.clone());
        let prev = if approved {
            !self.operators.insert(key)
        } else {
            self.operators.remove(&key)
        };
        self.journal.record(Undo::Operator {
            owner: owner.clone(),
            operator: operator.clone(),
            prev,
        });
    }

    fn set_counter(&mut self, value: u64) {
        self.journal.record(Undo::Counter { prev: self.counter });
        self.counter = value;
    }

    fn index_add(&mut self, account: &AccountId, id: CertificateId) -> Result<(), LedgerError> {
        if !self.index.add(account, id) {
            return Err(LedgerError::corruption(format!(
                "certificate {id} is already indexed"
            )));
        }
        self.journal.record(Undo::IndexAdded {
            account: account.clone(),
            id,
        });
        Ok(())
    }

    fn index_remove(&mut self, account: &AccountId, id: CertificateId) -> Result<(), LedgerError> {
        let pos = self.index.remove(account, id).ok_or_else(|| {
            LedgerError::corruption(format!("certificate {id} is not indexed under {account}"))
        })?;
        self.journal.record(Undo::IndexRemoved {
            account: account.clone(),
            id,
            pos,
        });
        Ok(())
    }

    fn emit(&mut self, event: LedgerEvent) {
        tracing::trace!(event = event.name(), "ledger event");
        self.events.push(event);
    }
}
