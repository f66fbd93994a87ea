//! Certificate sequence identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stake certificate.
///
/// Ids are allocated sequentially starting at 1 and are never reused. Zero is
/// never a valid certificate id.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CertificateId(u64);

impl CertificateId {
    /// The first id ever allocated.
    pub const FIRST: Self = Self(1);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id allocated after this one, or `None` when the sequence is exhausted.
    pub fn checked_next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CertificateId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
