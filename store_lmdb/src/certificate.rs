//! LMDB implementation of CertificateStore.

use heed::types::Bytes;
use heed::Database;

use tenure_store::{CertificateStore, StoreError};
use tenure_types::CertificateId;

use crate::{LmdbEnvironment, LmdbError};

fn decode_id(key: &[u8]) -> Result<CertificateId, LmdbError> {
    let arr: [u8; 8] = key
        .try_into()
        .map_err(|_| LmdbError::CorruptKey(format!("certificate key of {} bytes", key.len())))?;
    Ok(CertificateId::from_be_bytes(arr))
}

impl LmdbEnvironment {
    fn put_by_id(
        &self,
        db: &Database<Bytes, Bytes>,
        id: CertificateId,
        value: &[u8],
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        db.put(&mut wtxn, &id.to_be_bytes(), value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_by_id(
        &self,
        db: &Database<Bytes, Bytes>,
    ) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            results.push((decode_id(key)?, val.to_vec()));
        }
        Ok(results)
    }
}

impl CertificateStore for LmdbEnvironment {
    fn put_certificate(&self, id: CertificateId, entry: &[u8]) -> Result<(), StoreError> {
        self.put_by_id(&self.certificates_db, id, entry)
    }

    fn get_certificate(&self, id: CertificateId) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .certificates_db
            .get(&rtxn, &id.to_be_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(|b| b.to_vec()))
    }

    fn delete_certificate(&self, id: CertificateId) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.certificates_db
            .delete(&mut wtxn, &id.to_be_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn iter_certificates(&self) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError> {
        self.iter_by_id(&self.certificates_db)
    }

    fn put_disposal(&self, id: CertificateId, disposal: &[u8]) -> Result<(), StoreError> {
        self.put_by_id(&self.disposals_db, id, disposal)
    }

    fn iter_disposals(&self) -> Result<Vec<(CertificateId, Vec<u8>)>, StoreError> {
        self.iter_by_id(&self.disposals_db)
    }
}
