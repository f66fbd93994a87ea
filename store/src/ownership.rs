use tenure_types::AccountId;

use crate::StoreError;

/// The account -> owned ids index, one serialised list per account.
pub trait OwnershipStore {
    fn put_owned(&self, account: &AccountId, ids: &[u8]) -> Result<(), StoreError>;
    fn get_owned(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError>;
    fn iter_owned(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError>;

    /// Drop every entry. Used before rewriting the whole index.
    fn clear_owned(&self) -> Result<(), StoreError>;
}
