//! Token-ledger errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("arithmetic overflow in token accounting")]
    Overflow,

    #[error("{0}")]
    Other(String),
}
