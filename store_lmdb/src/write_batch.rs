//! Applies a whole `WriteBatch` inside one LMDB write transaction.

use heed::RwTxn;

use tenure_store::{BatchStore, StoreError, WriteBatch, WriteOp};

use crate::meta::SCHEMA_VERSION_KEY;
use crate::{LmdbEnvironment, LmdbError};

impl LmdbEnvironment {
    fn apply_op(&self, txn: &mut RwTxn<'_>, op: &WriteOp) -> Result<(), LmdbError> {
        match op {
            WriteOp::PutCertificate { id, entry } => {
                self.certificates_db.put(txn, &id.to_be_bytes(), entry)?;
            }
            WriteOp::DeleteCertificate(id) => {
                self.certificates_db.delete(txn, &id.to_be_bytes())?;
            }
            WriteOp::ClearCertificates => self.certificates_db.clear(txn)?,
            WriteOp::PutDisposal { id, disposal } => {
                self.disposals_db.put(txn, &id.to_be_bytes(), disposal)?;
            }
            WriteOp::PutOwned { account, ids } => {
                self.owners_db.put(txn, account.as_str().as_bytes(), ids)?;
            }
            WriteOp::ClearOwned => self.owners_db.clear(txn)?,
            WriteOp::PutMeta { key, value } => {
                self.meta_db.put(txn, key.as_bytes(), value)?;
            }
            WriteOp::DeleteMeta(key) => {
                self.meta_db.delete(txn, key.as_bytes())?;
            }
            WriteOp::SetSchemaVersion(version) => {
                self.meta_db
                    .put(txn, SCHEMA_VERSION_KEY, &version.to_le_bytes())?;
            }
        }
        Ok(())
    }
}

impl BatchStore for LmdbEnvironment {
    fn write_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut txn = self.env.write_txn().map_err(LmdbError::from)?;
        for op in batch.ops() {
            // Dropping `txn` on the error path aborts it.
            self.apply_op(&mut txn, op)?;
        }
        txn.commit().map_err(LmdbError::from)?;
        tracing::trace!(ops = batch.len(), "write batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::open_test_env;
    use tenure_store::{CertificateStore, MetaStore, OwnershipStore};
    use tenure_types::{AccountId, CertificateId};

    #[test]
    fn batch_commits_every_table_together() {
        let (_dir, env) = open_test_env();
        env.put_certificate(CertificateId::new(1), b"old").unwrap();
        env.put_owned(&AccountId::new("tnr_gone"), &[1]).unwrap();

        let mut batch = WriteBatch::new();
        batch.clear_certificates();
        batch.put_certificate(CertificateId::new(2), b"new");
        batch.put_disposal(CertificateId::new(1), b"burned");
        batch.clear_owned();
        batch.put_owned(&AccountId::new("tnr_alice"), &[2]);
        batch.put_meta("counter", &2u64.to_be_bytes());
        batch.set_schema_version(1);
        env.write_batch(batch).unwrap();

        assert_eq!(
            env.iter_certificates().unwrap(),
            vec![(CertificateId::new(2), b"new".to_vec())]
        );
        assert_eq!(env.iter_disposals().unwrap().len(), 1);
        assert_eq!(
            env.iter_owned().unwrap(),
            vec![(AccountId::new("tnr_alice"), vec![2])]
        );
        assert_eq!(
            env.get_meta("counter").unwrap(),
            Some(2u64.to_be_bytes().to_vec())
        );
        assert_eq!(env.get_schema_version().unwrap(), 1);
    }

    #[test]
    fn failed_batch_leaves_nothing_behind() {
        let (_dir, env) = open_test_env();
        env.put_certificate(CertificateId::new(1), b"kept").unwrap();

        let mut batch = WriteBatch::new();
        batch.clear_certificates();
        batch.put_certificate(CertificateId::new(9), b"partial");
        // Over LMDB's 511-byte key limit.
        batch.put_meta(&"k".repeat(600), b"v");
        batch.set_schema_version(7);
        assert!(env.write_batch(batch).is_err());

        assert_eq!(
            env.iter_certificates().unwrap(),
            vec![(CertificateId::new(1), b"kept".to_vec())]
        );
        assert_eq!(env.get_schema_version().unwrap(), 0);
    }
}
