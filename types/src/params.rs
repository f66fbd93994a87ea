//! Ledger parameters: the protocol constants every ledger instance is built with.

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::block::BlockId;
use crate::error::TenureError;
use crate::time::SECONDS_PER_DAY;

/// Protocol constants for one stake ledger.
///
/// Every field has a default so a TOML config may name only what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Collection name shown in certificate metadata.
    #[serde(default = "default_name")]
    pub name: String,

    /// Collection ticker symbol.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Longest stake term accepted by `create_stake`, in days.
    #[serde(default = "default_max_term_days")]
    pub max_term_days: u64,

    /// Transfer blackout after creation and after maturity, in seconds.
    #[serde(default = "default_blackout_secs")]
    pub blackout_secs: u64,

    /// First block of the ledger's deployment.
    #[serde(default)]
    pub start_block: BlockId,

    /// Secondary-sale royalty in basis points (250 = 2.5%).
    #[serde(default = "default_royalty_bps")]
    pub royalty_bps: u16,

    /// Receiver of secondary-sale royalties. `None` disables royalties.
    #[serde(default)]
    pub royalty_receiver: Option<AccountId>,
}

fn default_name() -> String {
    "Tenure Stake".to_string()
}

fn default_symbol() -> String {
    "TNRS".to_string()
}

fn default_max_term_days() -> u64 {
    LedgerParams::MAX_TERM_DAYS
}

fn default_blackout_secs() -> u64 {
    LedgerParams::BLACKOUT_SECS
}

fn default_royalty_bps() -> u16 {
    250
}

impl LedgerParams {
    /// Maximum stake term in days.
    pub const MAX_TERM_DAYS: u64 = 1_000;

    /// Transfer blackout window: 7 days.
    pub const BLACKOUT_SECS: u64 = 7 * SECONDS_PER_DAY;

    /// Royalty basis points denominator.
    pub const BPS_DENOMINATOR: u128 = 10_000;

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), TenureError> {
        if self.max_term_days == 0 || self.max_term_days > u64::from(u16::MAX) {
            return Err(TenureError::InvalidParams(format!(
                "max_term_days must be in 1..=65535, got {}",
                self.max_term_days
            )));
        }
        if u128::from(self.royalty_bps) > Self::BPS_DENOMINATOR {
            return Err(TenureError::InvalidParams(format!(
                "royalty_bps must not exceed 10000, got {}",
                self.royalty_bps
            )));
        }
        if self.symbol.is_empty() {
            return Err(TenureError::InvalidParams("symbol must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            max_term_days: Self::MAX_TERM_DAYS,
            blackout_secs: Self::BLACKOUT_SECS,
            start_block: BlockId::GENESIS,
            royalty_bps: default_royalty_bps(),
            royalty_receiver: None,
        }
    }
}
