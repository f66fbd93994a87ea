//! LMDB storage backend for the tenure certificate ledger.
//!
//! Implements every storage trait from `tenure-store` using the `heed` LMDB
//! bindings. Each logical table maps to one named database inside a single
//! environment.

pub mod certificate;
pub mod environment;
pub mod error;
pub mod meta;
pub mod ownership;
pub mod write_batch;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
