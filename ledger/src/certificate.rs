//! Stored certificate entries and the decoded read view.

use serde::{Deserialize, Serialize};

use tenure_rarity::{decode_rarity_bits, RarityClass, RarityFlags};
use tenure_record::{StakeInfo, StakeWord};
use tenure_types::{AccountId, BlockId, CertificateId, CertificateState, Timestamp};

/// What the ledger keeps per live certificate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateEntry {
    pub word: StakeWord,
    pub owner: AccountId,
    pub approved: Option<AccountId>,
    pub created_block: BlockId,
    pub created_at: Timestamp,
}

impl CertificateEntry {
    pub fn info(&self) -> StakeInfo {
        StakeInfo::decode(&self.word)
    }

    pub fn maturity(&self) -> Timestamp {
        Timestamp::new(self.info().maturity_ts)
    }

    pub fn state_at(&self, now: Timestamp) -> CertificateState {
        if now >= self.maturity() {
            CertificateState::Matured
        } else {
            CertificateState::Active
        }
    }
}

/// Decoded, read-only view of a live certificate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub owner: AccountId,
    pub approved: Option<AccountId>,
    pub info: StakeInfo,
    pub rarity: RarityFlags,
    pub class: RarityClass,
    pub created_block: BlockId,
    pub created_at: Timestamp,
    pub state: CertificateState,
}

impl Certificate {
    pub(crate) fn from_entry(id: CertificateId, entry: &CertificateEntry, now: Timestamp) -> Self {
        let info = entry.info();
        let rarity = decode_rarity_bits(info.rarity_bits);
        Self {
            id,
            owner: entry.owner.clone(),
            approved: entry.approved.clone(),
            info,
            rarity,
            class: RarityClass::of(rarity),
            created_block: entry.created_block,
            created_at: entry.created_at,
            state: entry.state_at(now),
        }
    }
}
