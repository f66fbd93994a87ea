//! Top-level error type shared across crates.

use thiserror::Error;

/// Errors raised while parsing or validating shared types.
#[derive(Debug, Error)]
pub enum TenureError {
    #[error("invalid account identity: {0}")]
    InvalidAccount(String),

    #[error("invalid ledger parameter: {0}")]
    InvalidParams(String),

    #[error("{0}")]
    Other(String),
}
