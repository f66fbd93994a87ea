//! Metadata storage trait.

use crate::StoreError;

/// Generic key-value store for ledger bookkeeping (id counter, operator
/// approvals, schema version) that doesn't belong in a per-id table.
pub trait MetaStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn delete_meta(&self, key: &str) -> Result<(), StoreError>;

    /// Current schema version; an empty store reads as 0.
    fn get_schema_version(&self) -> Result<u32, StoreError>;

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError>;
}
