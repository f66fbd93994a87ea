//! Certificate metadata.
//!
//! Everything here is derived from a decoded stake record and the certificate
//! id. No ledger state is consulted, so the same word always renders to the
//! same document.

pub mod document;
pub mod svg;

pub use document::{render, token_uri, Attribute, AttributeValue, CertificateMetadata, MetadataError};
