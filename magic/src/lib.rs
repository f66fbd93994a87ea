//! Magic numbers: constant-time membership tests backing certificate rarity.
//!
//! Both classes are answered from bit tables built at compile time over the
//! domain `0..=65535`. A lookup is one shift and one mask; identifiers outside
//! the domain are never members.

mod table;

pub use table::{BitTable, DOMAIN_MAX, DOMAIN_SIZE};

/// Primality table for `0..=65535`.
pub static PRIMES: BitTable = BitTable::primes();

/// Fibonacci table for `0..=65535` (1, 2, 3, 5, 8, …, 46368).
pub static FIBONACCI: BitTable = BitTable::fibonacci();

/// Whether `n` is prime. Always `false` above `DOMAIN_MAX`.
pub fn is_prime(n: u64) -> bool {
    PRIMES.contains(n)
}

/// Whether `n` is a Fibonacci number. Always `false` above `DOMAIN_MAX`.
pub fn is_fib(n: u64) -> bool {
    FIBONACCI.contains(n)
}
