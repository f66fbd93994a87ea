//! Nullable infrastructure for deterministic testing.
//!
//! Everything the ledger touches from the outside (wall-clock time, block
//! height, storage, burn delegates) has a test-friendly implementation here
//! that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Never touches the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod delegate;
pub mod store;

pub use clock::NullClock;
pub use delegate::{BadBurner, Burner, RevertingBurner};
pub use store::NullStore;
