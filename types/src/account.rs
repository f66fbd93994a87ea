//! Account identity type with `tnr_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TenureError;

/// An account identity on the ledger, always prefixed with `tnr_`.
///
/// Both end users and delegate capabilities (burn redeemers) are identified
/// by an `AccountId`; the ledger does not distinguish the two.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// The standard prefix for all account identities.
    pub const PREFIX: &'static str = "tnr_";

    /// Create a new account identity from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `tnr_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "account must start with tnr_");
        Self(s)
    }

    /// Fallible constructor for untrusted input (CLI, config files).
    pub fn parse(raw: &str) -> Result<Self, TenureError> {
        let id = Self(raw.to_string());
        if id.is_valid() {
            Ok(id)
        } else {
            Err(TenureError::InvalidAccount(raw.to_string()))
        }
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this identity is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX)
            && self.0.len() > Self::PREFIX.len()
            && self.0[Self::PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
