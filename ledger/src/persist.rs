//! Saving the ledger to, and restoring it from, a `tenure_store` backend.
//!
//! Layout: one bincode `CertificateEntry` per live id, one bincode
//! `Disposal` per redeemed or burned id, one bincode id list per owner, and
//! the id counter plus operator approvals under meta keys. A save is written
//! as a single batch.

use tenure_store::{LedgerStore, WriteBatch};
use tenure_token::{TokenLedger, YieldSchedule};
use tenure_types::{AccountId, CertificateId, Disposal, LedgerParams};

use crate::certificate::CertificateEntry;
use crate::ownership::OwnershipIndex;
use crate::{LedgerError, StakeLedger};

const SCHEMA_VERSION: u32 = 1;
const COUNTER_KEY: &str = "token_id_counter";
const OPERATORS_KEY: &str = "operators";

impl<L: TokenLedger> StakeLedger<L> {
    /// Persist all ledger state. Must not be called from inside a ledger call.
    pub fn save_to_store(&self, store: &dyn LedgerStore) -> Result<(), LedgerError> {
        if self.journal.depth() > 0 {
            return Err(LedgerError::InvalidArgument(
                "cannot persist while a ledger call is open".into(),
            ));
        }

        // One batch, so a failed save leaves the previous snapshot intact.
        let mut batch = WriteBatch::new();
        batch.clear_certificates();
        for (id, entry) in &self.certificates {
            let bytes = bincode::serialize(entry).map_err(LedgerError::serialization)?;
            batch.put_certificate(*id, &bytes);
        }
        for (id, disposal) in &self.disposals {
            let bytes = bincode::serialize(disposal).map_err(LedgerError::serialization)?;
            batch.put_disposal(*id, &bytes);
        }

        batch.clear_owned();
        for (account, ids) in self.index.accounts() {
            let bytes = bincode::serialize(ids).map_err(LedgerError::serialization)?;
            batch.put_owned(account, &bytes);
        }

        batch.put_meta(COUNTER_KEY, &self.counter.to_be_bytes());
        let mut operators: Vec<&(AccountId, AccountId)> = self.operators.iter().collect();
        operators.sort();
        let bytes = bincode::serialize(&operators).map_err(LedgerError::serialization)?;
        batch.put_meta(OPERATORS_KEY, &bytes);
        batch.set_schema_version(SCHEMA_VERSION);

        store.write_batch(batch)?;

        tracing::info!(
            certificates = self.certificates.len(),
            disposed = self.disposals.len(),
            counter = self.counter,
            "ledger saved"
        );
        Ok(())
    }

    /// Restore a ledger saved with [`save_to_store`](Self::save_to_store).
    /// An empty store yields a fresh ledger.
    pub fn load_from_store(
        store: &dyn LedgerStore,
        params: LedgerParams,
        token: L,
        schedule: Box<dyn YieldSchedule>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(params, token, schedule)?;
        match store.get_schema_version()? {
            0 => return Ok(ledger),
            SCHEMA_VERSION => {}
            other => {
                return Err(LedgerError::corruption(format!(
                    "unsupported schema version {other}"
                )))
            }
        }

        ledger.counter = match store.get_meta(COUNTER_KEY)? {
            Some(bytes) => {
                let arr: [u8; 8] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| LedgerError::corruption("id counter is not 8 bytes"))?;
                u64::from_be_bytes(arr)
            }
            None => 0,
        };

        for (id, bytes) in store.iter_certificates()? {
            if id.as_u64() == 0 || id.as_u64() > ledger.counter {
                return Err(LedgerError::corruption(format!(
                    "certificate {id} outside issued range 1..={}",
                    ledger.counter
                )));
            }
            let entry: CertificateEntry =
                bincode::deserialize(&bytes).map_err(LedgerError::serialization)?;
            ledger.certificates.insert(id, entry);
        }
        for (id, bytes) in store.iter_disposals()? {
            let disposal: Disposal =
                bincode::deserialize(&bytes).map_err(LedgerError::serialization)?;
            ledger.disposals.insert(id, disposal);
        }

        if let Some(bytes) = store.get_meta(OPERATORS_KEY)? {
            let operators: Vec<(AccountId, AccountId)> =
                bincode::deserialize(&bytes).map_err(LedgerError::serialization)?;
            ledger.operators = operators.into_iter().collect();
        }

        let mut lists = Vec::new();
        for (account, bytes) in store.iter_owned()? {
            let ids: Vec<CertificateId> =
                bincode::deserialize(&bytes).map_err(LedgerError::serialization)?;
            lists.push((account, ids));
        }
        ledger.index = OwnershipIndex::from_lists(lists)
            .ok_or_else(|| LedgerError::corruption("certificate indexed under two owners"))?;

        ledger.check_index()?;

        tracing::info!(
            certificates = ledger.certificates.len(),
            counter = ledger.counter,
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// The index must hold exactly the live ids, each under its owner.
    fn check_index(&self) -> Result<(), LedgerError> {
        if self.index.len() != self.certificates.len() {
            return Err(LedgerError::corruption(format!(
                "index holds {} ids but {} certificates are live",
                self.index.len(),
                self.certificates.len()
            )));
        }
        for (account, ids) in self.index.accounts() {
            for id in ids {
                match self.certificates.get(id) {
                    Some(entry) if &entry.owner == account => {}
                    _ => {
                        return Err(LedgerError::corruption(format!(
                            "certificate {id} indexed under {account} but not owned by it"
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}
