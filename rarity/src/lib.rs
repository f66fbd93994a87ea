//! Certificate rarity.
//!
//! A certificate is rare when its sequence id, or the id of the block it was
//! created in, is prime or a Fibonacci number. The four resulting flags are
//! packed into the top nibble of the record's 16-bit rarity word and scored.

pub mod bits;
pub mod score;

pub use bits::{decode_rarity_bits, encode_rarity_bits, RarityFlags, RESERVED_MASK};
pub use score::{score, RarityClass};

use tenure_types::{BlockId, CertificateId};

/// Classify a certificate from its id and creation block.
pub fn classify(certificate: CertificateId, block: BlockId) -> RarityFlags {
    RarityFlags {
        is_prime: tenure_magic::is_prime(certificate.as_u64()),
        is_fib: tenure_magic::is_fib(certificate.as_u64()),
        block_is_prime: tenure_magic::is_prime(block.as_u64()),
        block_is_fib: tenure_magic::is_fib(block.as_u64()),
    }
}

/// Everything the ledger stores about a certificate's rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rarity {
    pub flags: RarityFlags,
    pub bits: u16,
    pub score: u16,
}

/// Classify, pack and score in one step.
pub fn assess(certificate: CertificateId, block: BlockId) -> Rarity {
    let flags = classify(certificate, block);
    Rarity {
        flags,
        bits: encode_rarity_bits(flags),
        score: score(flags),
    }
}
