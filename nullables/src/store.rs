//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};

use tenure_store::{
    BatchStore, CertificateStore, MetaStore, OwnershipStore, StoreError, WriteBatch, WriteOp,
};
use tenure_types::{AccountId, CertificateId};

const SCHEMA_VERSION_KEY: &str = "schema_version";

/// An in-memory implementation of every ledger store trait.
#[derive(Default)]
pub struct NullStore {
    certificates: Mutex<BTreeMap<CertificateId, Vec<u8>>>,
    disposals: Mutex<BTreeMap<CertificateId, Vec<u8>>>,
    owners: Mutex<HashMap<AccountId, Vec<u8>>>,
    meta: Mutex<HashMap<String, Vec<u8>>>,
    batch_fault: Mutex<Option<usize>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make batches fail once `ops` of their writes have been staged.
    /// Stays armed until [`heal`](Self::heal).
    pub fn fail_batches_after(&self, ops: usize) {
        if let Ok(mut fault) = self.batch_fault.lock() {
            *fault = Some(ops);
        }
    }

    pub fn heal(&self) {
        if let Ok(mut fault) = self.batch_fault.lock() {
            *fault = None;
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("null store lock poisoned".into())
}

impl CertificateStore for NullStore {
    fn put_certificate(&self, id: CertificateId, entry: &[u8]) -> Result<(), StoreError> {
        self.certificates.lock().map_err(poisoned)?.insert(id, entry.to_vec());
        Ok(())
    }

    fn get_certificate(&self, id: CertificateId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.certificates.lock().map_err(poisoned)?.get(&id).cloned())
    }

    fn delete_certificate(&self, id: CertificateId) -> Result<(), StoreError> {
        self.certificates.lock().map_err(poisoned)?.remove(&id);
        Ok(())
    }

    fn iter_certificates(&self) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError> {
        Ok(self
            .certificates
            .lock()
            .map_err(poisoned)?
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }

    fn put_disposal(&self, id: CertificateId, disposal: &[u8]) -> Result<(), StoreError> {
        self.disposals.lock().map_err(poisoned)?.insert(id, disposal.to_vec());
        Ok(())
    }

    fn iter_disposals(&self) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError> {
        Ok(self
            .disposals
            .lock()
            .map_err(poisoned)?
            .iter()
            .map(|(id, bytes)| (*id, bytes.clone()))
            .collect())
    }
}

impl OwnershipStore for NullStore {
    fn put_owned(&self, account: &AccountId, ids: &[u8]) -> Result<(), StoreError> {
        self.owners
            .lock()
            .map_err(poisoned)?
            .insert(account.clone(), ids.to_vec());
        Ok(())
    }

    fn get_owned(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.owners.lock().map_err(poisoned)?.get(account).cloned())
    }

    fn iter_owned(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        Ok(self
            .owners
            .lock()
            .map_err(poisoned)?
            .iter()
            .map(|(a, bytes)| (a.clone(), bytes.clone()))
            .collect())
    }

    fn clear_owned(&self) -> Result<(), StoreError> {
        self.owners.lock().map_err(poisoned)?.clear();
        Ok(())
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().map_err(poisoned)?.get(key).cloned())
    }

    fn delete_meta(&self, key: &str) -> Result<(), StoreError> {
        self.meta.lock().map_err(poisoned)?.remove(key);
        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StoreError> {
        match self.meta.lock().map_err(poisoned)?.get(SCHEMA_VERSION_KEY) {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::Serialization("schema_version has unexpected byte length".into())
                })?;
                Ok(u32::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        self.put_meta(SCHEMA_VERSION_KEY, &version.to_le_bytes())
    }
}

impl BatchStore for NullStore {
    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let fault = *self.batch_fault.lock().map_err(poisoned)?;
        let mut certificates = self.certificates.lock().map_err(poisoned)?;
        let mut disposals = self.disposals.lock().map_err(poisoned)?;
        let mut owners = self.owners.lock().map_err(poisoned)?;
        let mut meta = self.meta.lock().map_err(poisoned)?;

        // Staged on copies and swapped in only when every op has applied.
        let mut next_certificates = certificates.clone();
        let mut next_disposals = disposals.clone();
        let mut next_owners = owners.clone();
        let mut next_meta = meta.clone();

        for (applied, op) in batch.into_ops().into_iter().enumerate() {
            if fault == Some(applied) {
                return Err(StoreError::Backend(format!(
                    "null store failed after {applied} batched writes"
                )));
            }
            match op {
                WriteOp::PutCertificate { id, entry } => {
                    next_certificates.insert(id, entry);
                }
                WriteOp::DeleteCertificate(id) => {
                    next_certificates.remove(&id);
                }
                WriteOp::ClearCertificates => next_certificates.clear(),
                WriteOp::PutDisposal { id, disposal } => {
                    next_disposals.insert(id, disposal);
                }
                WriteOp::PutOwned { account, ids } => {
                    next_owners.insert(account, ids);
                }
                WriteOp::ClearOwned => next_owners.clear(),
                WriteOp::PutMeta { key, value } => {
                    next_meta.insert(key, value);
                }
                WriteOp::DeleteMeta(key) => {
                    next_meta.remove(&key);
                }
                WriteOp::SetSchemaVersion(version) => {
                    next_meta.insert(SCHEMA_VERSION_KEY.to_string(), version.to_le_bytes().to_vec());
                }
            }
        }

        *certificates = next_certificates;
        *disposals = next_disposals;
        *owners = next_owners;
        *meta = next_meta;
        Ok(())
    }
}
