//! The stake certificate ledger.
//!
//! A stake locks principal for a fixed term and is represented by a
//! transferable certificate whose whole economic state is one packed
//! [`StakeWord`](tenure_record::StakeWord). [`StakeLedger`] owns every
//! certificate, runs the lifecycle
//! (`NonExistent -> Active -> Matured -> Redeemed | Burned`), guards
//! transfers, and undoes failed calls through a call-frame journal.

pub mod certificate;
pub mod delegate;
pub mod engine;
pub mod error;
pub mod event;
mod journal;
pub mod metrics;
pub mod ownership;
pub mod payout;
mod persist;

pub use certificate::{Certificate, CertificateEntry};
pub use delegate::{BurnRedeemable, DelegateContext};
pub use engine::{StakeLedger, CUSTODY_ACCOUNT};
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use metrics::LedgerMetrics;
pub use ownership::OwnershipIndex;
