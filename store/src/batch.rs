//! Atomic multi-table writes.

use tenure_types::{AccountId, CertificateId};

use crate::StoreError;

/// One buffered write. Applied in order by [`BatchStore::write_batch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    PutCertificate { id: CertificateId, entry: Vec<u8> },
    DeleteCertificate(CertificateId),
    /// Drop every live certificate.
    ClearCertificates,
    PutDisposal { id: CertificateId, disposal: Vec<u8> },
    PutOwned { account: AccountId, ids: Vec<u8> },
    /// Drop the whole ownership index.
    ClearOwned,
    PutMeta { key: String, value: Vec<u8> },
    DeleteMeta(String),
    SetSchemaVersion(u32),
}

/// A list of writes that a backend commits all together or not at all.
///
/// ```ignore
/// let mut batch = WriteBatch::new();
/// batch.put_certificate(id, &bytes);
/// batch.put_meta("token_id_counter", &counter.to_be_bytes());
/// store.write_batch(batch)?;
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_certificate(&mut self, id: CertificateId, entry: &[u8]) {
        self.ops.push(WriteOp::PutCertificate {
            id,
            entry: entry.to_vec(),
        });
    }

    pub fn delete_certificate(&mut self, id: CertificateId) {
        self.ops.push(WriteOp::DeleteCertificate(id));
    }

    pub fn clear_certificates(&mut self) {
        self.ops.push(WriteOp::ClearCertificates);
    }

    pub fn put_disposal(&mut self, id: CertificateId, disposal: &[u8]) {
        self.ops.push(WriteOp::PutDisposal {
            id,
            disposal: disposal.to_vec(),
        });
    }

    pub fn put_owned(&mut self, account: &AccountId, ids: &[u8]) {
        self.ops.push(WriteOp::PutOwned {
            account: account.clone(),
            ids: ids.to_vec(),
        });
    }

    pub fn clear_owned(&mut self) {
        self.ops.push(WriteOp::ClearOwned);
    }

    pub fn put_meta(&mut self, key: &str, value: &[u8]) {
        self.ops.push(WriteOp::PutMeta {
            key: key.to_string(),
            value: value.to_vec(),
        });
    }

    pub fn delete_meta(&mut self, key: &str) {
        self.ops.push(WriteOp::DeleteMeta(key.to_string()));
    }

    pub fn set_schema_version(&mut self, version: u32) {
        self.ops.push(WriteOp::SetSchemaVersion(version));
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Backends that can commit a [`WriteBatch`] atomically.
pub trait BatchStore {
    /// Apply every op in order. On error nothing in the batch is visible.
    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
