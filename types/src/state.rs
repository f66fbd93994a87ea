//! Certificate lifecycle states.

use serde::{Deserialize, Serialize};

/// How a certificate left the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposal {
    /// The owner ended the stake after maturity and was paid out.
    Redeemed,
    /// An approved delegate burned the certificate.
    Burned,
}

/// The observable lifecycle state of a certificate id.
///
/// Only `Active` and the disposal outcome are stored; `Matured` is derived at
/// query time from the maturity timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CertificateState {
    /// The id was never allocated.
    NonExistent,
    /// Principal is locked and maturity has not been reached.
    Active,
    /// Maturity reached; the owner may end the stake.
    Matured,
    /// Ended by the owner.
    Redeemed,
    /// Disposed of by a delegate.
    Burned,
}

impl CertificateState {
    /// Whether the certificate still exists as an owned token.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Active | Self::Matured)
    }

    /// Whether the id reached a terminal state.
    pub fn is_disposed(&self) -> bool {
        matches!(self, Self::Redeemed | Self::Burned)
    }
}

impl From<Disposal> for CertificateState {
    fn from(d: Disposal) -> Self {
        match d {
            Disposal::Redeemed => Self::Redeemed,
            Disposal::Burned => Self::Burned,
        }
    }
}
