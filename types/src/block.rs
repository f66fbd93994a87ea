//! Block identifiers and the per-call execution context.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::Timestamp;

/// Height of the block a call executes in.
///
/// Block ids feed the rarity flags of certificates created in that block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockId(u64);

impl BlockId {
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The following block, saturating at `u64::MAX`.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where and when a ledger call executes.
///
/// Every mutating ledger operation receives the context explicitly; nested
/// (re-entrant) calls made by a delegate reuse the context of the outer call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockContext {
    pub block: BlockId,
    pub timestamp: Timestamp,
}

impl BlockContext {
    pub fn new(block: BlockId, timestamp: Timestamp) -> Self {
        Self { block, timestamp }
    }

    pub fn now(&self) -> Timestamp {
        self.timestamp
    }
}
