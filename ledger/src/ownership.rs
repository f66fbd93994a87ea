//! Account -> owned certificate ids, with O(1) add and remove.
//!
//! Each account's ids are kept in a `Vec` in insertion order. Removal swaps
//! the last id into the vacated slot, so a position map lets both operations
//! run without scanning.

use std::collections::HashMap;

use tenure_types::{AccountId, CertificateId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnershipIndex {
    owned: HashMap<AccountId, Vec<CertificateId>>,
    position: HashMap<CertificateId, usize>,
}

impl OwnershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` to `account`'s list. Returns `false` if `id` is already
    /// indexed under any account.
    pub fn add(&mut self, account: &AccountId, id: CertificateId) -> bool {
        if self.position.contains_key(&id) {
            return false;
        }
        let ids = self.owned.entry(account.clone()).or_default();
        self.position.insert(id, ids.len());
        ids.push(id);
        true
    }

    /// Remove `id` from `account`'s list, returning the slot it occupied.
    pub fn remove(&mut self, account: &AccountId, id: CertificateId) -> Option<usize> {
        let ids = self.owned.get_mut(account)?;
        let pos = *self.position.get(&id)?;
        if ids.get(pos) != Some(&id) {
            return None;
        }
        ids.swap_remove(pos);
        self.position.remove(&id);
        if let Some(moved) = ids.get(pos) {
            self.position.insert(*moved, pos);
        }
        if ids.is_empty() {
            self.owned.remove(account);
        }
        Some(pos)
    }

    /// Put `id` back into the slot `remove` took it from.
    ///
    /// Only valid as the exact inverse of the most recent `remove` on this
    /// account, which is how the journal uses it.
    pub(crate) fn reinsert(&mut self, account: &AccountId, id: CertificateId, pos: usize) {
        let ids = self.owned.entry(account.clone()).or_default();
        if pos < ids.len() {
            let displaced = ids[pos];
            ids.push(displaced);
            self.position.insert(displaced, ids.len() - 1);
            ids[pos] = id;
        } else {
            ids.push(id);
        }
        self.position.insert(id, pos);
    }

    /// Ids owned by `account`, in index order.
    pub fn owned(&self, account: &AccountId) -> &[CertificateId] {
        self.owned.get(account).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, account: &AccountId) -> usize {
        self.owned.get(account).map_or(0, Vec::len)
    }

    pub fn contains(&self, id: CertificateId) -> bool {
        self.position.contains_key(&id)
    }

    /// Total ids across every account.
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &[CertificateId])> {
        self.owned.iter().map(|(a, ids)| (a, ids.as_slice()))
    }

    /// Rebuild from persisted per-account lists. Returns `None` if any id
    /// appears twice.
    pub fn from_lists(lists: impl IntoIterator<Item = (AccountId, Vec<CertificateId>)>) -> Option<Self> {
        let mut index = Self::new();
        for (account, ids) in lists {
            for id in ids {
                if !index.add(&account, id) {
                    return None;
                }
            }
        }
        Some(index)
    }
}
