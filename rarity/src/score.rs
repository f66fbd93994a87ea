//! Rarity scoring policy.
//!
//! A certificate first earns a tier floor per flag set, and the floor
//! dominates: any set of `n + 1` flags outscores every set of `n`. Within a
//! tier each flag adds a weight reflecting how uncommon it is (there are 23
//! Fibonacci numbers but 6,542 primes below 65,536). The weight sum is
//! multiplied by a compound factor that grows with the flag count, so
//! combinations outscore the sum of their parts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bits::RarityFlags;

const WEIGHT_ID_FIB: u16 = 500;
const WEIGHT_BLOCK_FIB: u16 = 300;
const WEIGHT_ID_PRIME: u16 = 100;
const WEIGHT_BLOCK_PRIME: u16 = 50;

/// Floor added per flag set. Wider than the weighted spread inside any tier.
const TIER: u16 = 1_000;

/// Multiplier indexed by the number of flags set.
const COMPOUND: [u16; 5] = [0, 1, 2, 3, 5];

/// Score a set of flags. Deterministic, strictly increasing in the flag
/// count, at most 8,750.
pub fn score(flags: RarityFlags) -> u16 {
    let mut base = 0u16;
    if flags.is_fib {
        base += WEIGHT_ID_FIB;
    }
    if flags.block_is_fib {
        base += WEIGHT_BLOCK_FIB;
    }
    if flags.is_prime {
        base += WEIGHT_ID_PRIME;
    }
    if flags.block_is_prime {
        base += WEIGHT_BLOCK_PRIME;
    }
    let count = flags.count();
    TIER.saturating_mul(count as u16)
        .saturating_add(base.saturating_mul(COMPOUND[count as usize]))
}

/// Human-facing rarity tier, by number of flags set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RarityClass {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl RarityClass {
    pub fn of(flags: RarityFlags) -> Self {
        match flags.count() {
            0 => Self::Common,
            1 => Self::Rare,
            2 => Self::Epic,
            3 => Self::Legendary,
            _ => Self::Mythic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
        }
    }
}

impl fmt::Display for RarityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_scores_zero() {
        assert_eq!(score(RarityFlags::default()), 0);
        assert_eq!(RarityClass::of(RarityFlags::default()), RarityClass::Common);
    }

    #[test]
    fn all_flags_scores_maximum() {
        let all = RarityFlags {
            is_prime: true,
            is_fib: true,
            block_is_prime: true,
            block_is_fib: true,
        };
        assert_eq!(score(all), 8_750);
        assert_eq!(RarityClass::of(all), RarityClass::Mythic);
    }

    #[test]
    fn combinations_beat_the_sum_of_parts() {
        let a = RarityFlags {
            is_prime: true,
            ..Default::default()
        };
        let b = RarityFlags {
            block_is_prime: true,
            ..Default::default()
        };
        let both = RarityFlags {
            is_prime: true,
            block_is_prime: true,
            ..Default::default()
        };
        assert!(score(both) > score(a) + score(b));
    }

    #[test]
    fn more_flags_always_score_higher() {
        let combos: Vec<RarityFlags> = RarityFlags::all_combinations().collect();
        assert_eq!(combos.len(), 16);
        for a in &combos {
            for b in &combos {
                if a.count() < b.count() {
                    assert!(
                        score(*a) < score(*b),
                        "{a:?} scores {} but {b:?} scores {}",
                        score(*a),
                        score(*b)
                    );
                }
            }
        }
        // the single rarest flag still loses to the two commonest
        let id_fib = RarityFlags {
            is_fib: true,
            ..Default::default()
        };
        let both_primes = RarityFlags {
            is_prime: true,
            block_is_prime: true,
            ..Default::default()
        };
        assert!(score(id_fib) < score(both_primes));
    }

    #[test]
    fn adding_a_flag_never_lowers_the_score() {
        for flags in RarityFlags::all_combinations() {
            let mut grown = flags;
            let setters: [fn(&mut RarityFlags); 4] = [
                |f: &mut RarityFlags| f.is_prime = true,
                |f: &mut RarityFlags| f.is_fib = true,
                |f: &mut RarityFlags| f.block_is_prime = true,
                |f: &mut RarityFlags| f.block_is_fib = true,
            ];
            for set in setters {
                set(&mut grown);
                assert!(score(grown) >= score(flags));
            }
        }
    }
}
