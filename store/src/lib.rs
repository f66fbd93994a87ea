//! Abstract storage traits for the tenure certificate ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. Values are opaque bytes: the ledger serialises its own types, so
//! this crate never depends on `tenure-ledger`.

pub mod batch;
pub mod certificate;
pub mod error;
pub mod meta;
pub mod ownership;

pub use batch::{BatchStore, WriteBatch, WriteOp};
pub use certificate::CertificateStore;
pub use error::StoreError;
pub use meta::MetaStore;
pub use ownership::OwnershipStore;

/// Everything the ledger needs to persist and restore itself.
pub trait LedgerStore: CertificateStore + OwnershipStore + MetaStore + BatchStore {}

impl<T: CertificateStore + OwnershipStore + MetaStore + BatchStore + ?Sized> LedgerStore for T {}
