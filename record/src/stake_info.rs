//! Field layout, clamping and the encode/decode pair.

use serde::{Deserialize, Serialize};

use crate::word::StakeWord;

// Byte offsets and widths within the 32-byte word, most significant first.
const TERM: (usize, usize) = (0, 2);
const MATURITY_TS: (usize, usize) = (2, 8);
const AMOUNT: (usize, usize) = (10, 16);
const APY: (usize, usize) = (26, 2);
const RARITY_SCORE: (usize, usize) = (28, 2);
const RARITY_BITS: (usize, usize) = (30, 2);

/// The decoded economic state of one stake certificate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StakeInfo {
    /// Stake term in days.
    pub term: u16,
    /// Unix seconds at which the stake matures.
    pub maturity_ts: u64,
    /// Principal in raw token units.
    pub amount: u128,
    /// Yield rate in percentage points.
    pub apy: u16,
    /// Derived rarity score.
    pub rarity_score: u16,
    /// Rarity flags in bits 15..12, reserved bits below.
    pub rarity_bits: u16,
}

impl StakeInfo {
    /// Pack into a word. Infallible: every field already fits its width.
    pub fn encode(&self) -> StakeWord {
        let mut word = StakeWord::ZERO;
        word.put(TERM.0, TERM.1, u128::from(self.term));
        word.put(MATURITY_TS.0, MATURITY_TS.1, u128::from(self.maturity_ts));
        word.put(AMOUNT.0, AMOUNT.1, self.amount);
        word.put(APY.0, APY.1, u128::from(self.apy));
        word.put(RARITY_SCORE.0, RARITY_SCORE.1, u128::from(self.rarity_score));
        word.put(RARITY_BITS.0, RARITY_BITS.1, u128::from(self.rarity_bits));
        word
    }

    /// Unpack a word. Total over all 2^256 inputs.
    pub fn decode(word: &StakeWord) -> Self {
        // Each read is exactly as wide as its target type.
        Self {
            term: word.get(TERM.0, TERM.1) as u16,
            maturity_ts: word.get(MATURITY_TS.0, MATURITY_TS.1) as u64,
            amount: word.get(AMOUNT.0, AMOUNT.1),
            apy: word.get(APY.0, APY.1) as u16,
            rarity_score: word.get(RARITY_SCORE.0, RARITY_SCORE.1) as u16,
            rarity_bits: word.get(RARITY_BITS.0, RARITY_BITS.1) as u16,
        }
    }

    /// Whether this is the "no active stake" record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn clamp_u16(v: u128) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

fn clamp_u64(v: u128) -> u64 {
    u64::try_from(v).unwrap_or(u64::MAX)
}

/// Pack six raw field values into a word, clamping each to its field maximum.
///
/// `amount` occupies a full 128-bit field, so every `u128` fits it unchanged.
pub fn encode_stake_info(
    term: u128,
    maturity_ts: u128,
    amount: u128,
    apy: u128,
    rarity_score: u128,
    rarity_bits: u128,
) -> StakeWord {
    StakeInfo {
        term: clamp_u16(term),
        maturity_ts: clamp_u64(maturity_ts),
        amount,
        apy: clamp_u16(apy),
        rarity_score: clamp_u16(rarity_score),
        rarity_bits: clamp_u16(rarity_bits),
    }
    .encode()
}

/// Unpack a word into its six fields.
pub fn decode_stake_info(word: &StakeWord) -> StakeInfo {
    StakeInfo::decode(word)
}
