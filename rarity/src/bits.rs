//! Rarity flag word layout.

use serde::{Deserialize, Serialize};

const ID_IS_PRIME: u16 = 1 << 15;
const ID_IS_FIB: u16 = 1 << 14;
const BLOCK_IS_PRIME: u16 = 1 << 13;
const BLOCK_IS_FIB: u16 = 1 << 12;

/// The 12 low bits, reserved for future flags.
pub const RESERVED_MASK: u16 = 0x0fff;

/// The four rarity flags of a certificate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RarityFlags {
    /// Certificate id is prime.
    pub is_prime: bool,
    /// Certificate id is a Fibonacci number.
    pub is_fib: bool,
    /// Creation block id is prime.
    pub block_is_prime: bool,
    /// Creation block id is a Fibonacci number.
    pub block_is_fib: bool,
}

impl RarityFlags {
    /// Number of flags set (0..=4).
    pub fn count(&self) -> u32 {
        [self.is_prime, self.is_fib, self.block_is_prime, self.block_is_fib]
            .iter()
            .filter(|&&f| f)
            .count() as u32
    }

    /// Whether any flag is set.
    pub fn any(&self) -> bool {
        self.count() > 0
    }

    /// All 16 flag combinations, in binary counting order.
    pub fn all_combinations() -> impl Iterator<Item = RarityFlags> {
        (0u16..16).map(|n| decode_rarity_bits(n << 12))
    }
}

/// Pack the flags into bits 15..12. The reserved bits are always zero.
pub fn encode_rarity_bits(flags: RarityFlags) -> u16 {
    let mut bits = 0u16;
    if flags.is_prime {
        bits |= ID_IS_PRIME;
    }
    if flags.is_fib {
        bits |= ID_IS_FIB;
    }
    if flags.block_is_prime {
        bits |= BLOCK_IS_PRIME;
    }
    if flags.block_is_fib {
        bits |= BLOCK_IS_FIB;
    }
    bits
}

/// Unpack the flags from bits 15..12. Reserved bits are ignored.
pub fn decode_rarity_bits(bits: u16) -> RarityFlags {
    RarityFlags {
        is_prime: bits & ID_IS_PRIME != 0,
        is_fib: bits & ID_IS_FIB != 0,
        block_is_prime: bits & BLOCK_IS_PRIME != 0,
        block_is_fib: bits & BLOCK_IS_FIB != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sixteen_combinations_roundtrip() {
        let mut seen = std::collections::HashSet::new();
        for flags in RarityFlags::all_combinations() {
            let bits = encode_rarity_bits(flags);
            assert_eq!(bits & RESERVED_MASK, 0);
            assert_eq!(decode_rarity_bits(bits), flags);
            seen.insert(bits);
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn flag_positions() {
        let only = |f: fn(&mut RarityFlags)| {
            let mut flags = RarityFlags::default();
            f(&mut flags);
            encode_rarity_bits(flags)
        };
        assert_eq!(only(|f| f.is_prime = true), 0x8000);
        assert_eq!(only(|f| f.is_fib = true), 0x4000);
        assert_eq!(only(|f| f.block_is_prime = true), 0x2000);
        assert_eq!(only(|f| f.block_is_fib = true), 0x1000);
    }

    #[test]
    fn reserved_bits_are_ignored_on_decode() {
        assert_eq!(decode_rarity_bits(0x0fff), RarityFlags::default());
        let flags = decode_rarity_bits(0xa123);
        assert!(flags.is_prime && flags.block_is_prime);
        assert!(!flags.is_fib && !flags.block_is_fib);
    }
}
