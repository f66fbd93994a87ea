//! Nullable clock: deterministic time and block height for testing.

use std::cell::Cell;

use tenure_types::{BlockContext, BlockId, Timestamp, SECONDS_PER_DAY};

/// A deterministic chain clock.
///
/// Time and block height only advance when you tell them to.
pub struct NullClock {
    current: Cell<u64>,
    height: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
            height: Cell::new(1),
        }
    }

    /// Get the current time.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    pub fn block(&self) -> BlockId {
        BlockId::new(self.height.get())
    }

    /// Context for the next ledger call.
    pub fn ctx(&self) -> BlockContext {
        BlockContext::new(self.block(), self.now())
    }

    /// Advance time by a number of seconds and mine one block.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
        self.mine(1);
    }

    pub fn advance_days(&self, days: u64) {
        self.advance(days * SECONDS_PER_DAY);
    }

    /// Advance the block height without moving time.
    pub fn mine(&self, blocks: u64) {
        self.height.set(self.height.get() + blocks);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_time_and_height() {
        let clock = NullClock::new(100);
        let before = clock.ctx();
        clock.advance_days(1);
        let after = clock.ctx();
        assert_eq!(after.timestamp.as_secs(), 100 + SECONDS_PER_DAY);
        assert_eq!(after.block.as_u64(), before.block.as_u64() + 1);
    }

    #[test]
    fn mine_keeps_time() {
        let clock = NullClock::new(5);
        clock.mine(10);
        assert_eq!(clock.now().as_secs(), 5);
        assert_eq!(clock.block().as_u64(), 11);
    }
}
