//! Fundamental types for the Tenure stake ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identities, certificate and block identifiers, amounts, timestamps,
//! ledger parameters, and certificate lifecycle states.

pub mod account;
pub mod amount;
pub mod block;
pub mod certificate;
pub mod error;
pub mod params;
pub mod state;
pub mod time;

pub use account::AccountId;
pub use amount::{TokenAmount, TOKEN_UNIT};
pub use block::{BlockContext, BlockId};
pub use certificate::CertificateId;
pub use error::TenureError;
pub use params::LedgerParams;
pub use state::{CertificateState, Disposal};
pub use time::{Timestamp, SECONDS_PER_DAY};
