//! Events emitted by successful ledger calls.

use serde::{Deserialize, Serialize};

use tenure_types::{AccountId, CertificateId, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    StakeCreated {
        id: CertificateId,
        owner: AccountId,
        amount: u128,
        term_days: u16,
        apy: u16,
        maturity: Timestamp,
        rarity_score: u16,
        rarity_bits: u16,
    },
    StakeEnded {
        id: CertificateId,
        owner: AccountId,
        principal: u128,
        reward: u128,
    },
    Burned {
        id: CertificateId,
        user: AccountId,
        delegate: AccountId,
    },
    /// `from == None` is a mint, `to == None` a burn or redemption.
    Transfer {
        from: Option<AccountId>,
        to: Option<AccountId>,
        id: CertificateId,
    },
    Approval {
        owner: AccountId,
        approved: Option<AccountId>,
        id: CertificateId,
    },
    ApprovalForAll {
        owner: AccountId,
        operator: AccountId,
        approved: bool,
    },
}

impl LedgerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StakeCreated { .. } => "StakeCreated",
            Self::StakeEnded { .. } => "StakeEnded",
            Self::Burned { .. } => "Burned",
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::ApprovalForAll { .. } => "ApprovalForAll",
        }
    }
}
