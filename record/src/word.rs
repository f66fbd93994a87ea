//! The packed 256-bit word.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a hex-encoded stake word.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordParseError {
    #[error("stake word must be at most 64 hex digits, got {0}")]
    TooLong(usize),

    #[error("invalid hex in stake word: {0}")]
    InvalidHex(String),
}

/// A 256-bit packed stake record, stored as 32 big-endian bytes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StakeWord([u8; 32]);

impl StakeWord {
    /// The "no active stake" sentinel.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Width of the word in bytes.
    pub const BYTES: usize = 32;

    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Decode a word from a byte slice, or `None` if it is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }

    /// Write `value`'s low `width` bytes, big-endian, at byte `offset`.
    pub(crate) fn put(&mut self, offset: usize, width: usize, value: u128) {
        let be = value.to_be_bytes();
        self.0[offset..offset + width].copy_from_slice(&be[16 - width..]);
    }

    /// Read `width` bytes at `offset` as a big-endian integer.
    pub(crate) fn get(&self, offset: usize, width: usize) -> u128 {
        let mut be = [0u8; 16];
        be[16 - width..].copy_from_slice(&self.0[offset..offset + width]);
        u128::from_be_bytes(be)
    }
}

impl fmt::Debug for StakeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StakeWord(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for StakeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Parses `0x`-prefixed or bare hex; shorter inputs are left-padded with zeros.
impl FromStr for StakeWord {
    type Err = WordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() > 64 {
            return Err(WordParseError::TooLong(digits.len()));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| WordParseError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 32]> for StakeWord {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}
