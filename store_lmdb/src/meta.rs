//! LMDB implementation of MetaStore.

use tenure_store::{MetaStore, StoreError};

use crate::{LmdbEnvironment, LmdbError};

pub(crate) const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

impl MetaStore for LmdbEnvironment {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, key.as_bytes(), value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .meta_db
            .get(&rtxn, key.as_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(|b| b.to_vec()))
    }

    fn delete_meta(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .delete(&mut wtxn, key.as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .meta_db
            .get(&rtxn, SCHEMA_VERSION_KEY)
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => {
                let arr: [u8; 4] = bytes.try_into().map_err(|_| {
                    LmdbError::Serialization(
                        "schema_version has unexpected byte length".to_string(),
                    )
                })?;
                Ok(u32::from_le_bytes(arr))
            }
            None => Ok(0),
        }
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        let bytes = version.to_le_bytes();
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, SCHEMA_VERSION_KEY, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::open_test_env;

    #[test]
    fn meta_roundtrip_and_delete() {
        let (_dir, env) = open_test_env();
        assert_eq!(env.get_meta("counter").unwrap(), None);
        env.put_meta("counter", &9u64.to_be_bytes()).unwrap();
        assert_eq!(
            env.get_meta("counter").unwrap(),
            Some(9u64.to_be_bytes().to_vec())
        );
        env.delete_meta("counter").unwrap();
        assert_eq!(env.get_meta("counter").unwrap(), None);
    }

    #[test]
    fn schema_version_defaults_to_zero() {
        let (_dir, env) = open_test_env();
        assert_eq!(env.get_schema_version().unwrap(), 0);
        env.set_schema_version(3).unwrap();
        assert_eq!(env.get_schema_version().unwrap(), 3);
    }
}
