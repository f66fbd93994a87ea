use thiserror::Error;

use tenure_types::{AccountId, CertificateId, Timestamp};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("certificate {id} matures at {maturity}, now {now}")]
    NotYetMatured {
        id: CertificateId,
        maturity: Timestamp,
        now: Timestamp,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("illegal token id: {0}")]
    NonExistentCertificate(CertificateId),

    #[error("certificate {id} cannot be transferred before {until}")]
    BlackoutPeriodActive { id: CertificateId, until: Timestamp },

    #[error("delegate {delegate} rejected the burn: {reason}")]
    DelegateRejected { delegate: AccountId, reason: String },

    #[error("token ledger: {0}")]
    Token(#[from] tenure_token::TokenError),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(#[from] tenure_store::StoreError),
}

impl LedgerError {
    pub(crate) fn serialization(e: impl std::fmt::Display) -> Self {
        LedgerError::Storage(tenure_store::StoreError::Serialization(e.to_string()))
    }

    pub(crate) fn corruption(msg: impl Into<String>) -> Self {
        LedgerError::Storage(tenure_store::StoreError::Corruption(msg.into()))
    }
}
