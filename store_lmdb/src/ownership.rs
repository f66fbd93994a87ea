//! LMDB implementation of OwnershipStore.

use tenure_store::{OwnershipStore, StoreError};
use tenure_types::AccountId;

use crate::{LmdbEnvironment, LmdbError};

impl OwnershipStore for LmdbEnvironment {
    fn put_owned(&self, account: &AccountId, ids: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.owners_db
            .put(&mut wtxn, account.as_str().as_bytes(), ids)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_owned(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .owners_db
            .get(&rtxn, account.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(|b| b.to_vec()))
    }

    fn iter_owned(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.owners_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (key, val) = entry.map_err(LmdbError::from)?;
            let raw = std::str::from_utf8(key)
                .map_err(|e| LmdbError::CorruptKey(e.to_string()))?;
            let account =
                AccountId::parse(raw).map_err(|e| LmdbError::CorruptKey(e.to_string()))?;
            results.push((account, val.to_vec()));
        }
        Ok(results)
    }

    fn clear_owned(&self) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.owners_db.clear(&mut wtxn).map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
