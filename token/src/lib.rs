//! The fungible token ledger the stake ledger depends on.
//!
//! The stake ledger never owns token balances itself. It pulls principal into
//! custody through a [`TokenLedger`] when a stake is created, and asks the same
//! ledger to release principal plus reward when the stake ends. The yield rate
//! a new stake locks in comes from an injected [`YieldSchedule`].
//!
//! [`MemoryTokenLedger`] and [`DecayingApy`] are the reference implementations.

pub mod error;
pub mod ledger;
pub mod schedule;

pub use error::TokenError;
pub use ledger::{MemoryTokenLedger, TokenLedger};
pub use schedule::{DecayingApy, FixedApy, YieldSchedule};
