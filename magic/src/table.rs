//! Compile-time bit tables.

/// Largest identifier covered by the tables.
pub const DOMAIN_MAX: u64 = u16::MAX as u64;

/// Number of identifiers covered by the tables.
pub const DOMAIN_SIZE: usize = DOMAIN_MAX as usize + 1;

const WORDS: usize = DOMAIN_SIZE / 64;

/// A membership set over `0..=DOMAIN_MAX`, one bit per identifier.
pub struct BitTable {
    words: [u64; WORDS],
}

impl BitTable {
    /// Sieve of Eratosthenes over the whole domain.
    pub const fn primes() -> Self {
        // Start with every odd number >= 3 plus 2 marked, then clear composites.
        let mut words = [0xAAAA_AAAA_AAAA_AAAAu64; WORDS];
        // 1 is odd but not prime; 2 is even but prime.
        words[0] = (words[0] & !0b10) | 0b100;

        let mut p = 3usize;
        while p * p < DOMAIN_SIZE {
            if words[p / 64] & (1u64 << (p % 64)) != 0 {
                let mut m = p * p;
                while m < DOMAIN_SIZE {
                    words[m / 64] &= !(1u64 << (m % 64));
                    m += 2 * p;
                }
            }
            p += 2;
        }
        Self { words }
    }

    /// The Fibonacci sequence 1, 2, 3, 5, … up to the domain bound.
    pub const fn fibonacci() -> Self {
        let mut words = [0u64; WORDS];
        let mut a = 1usize;
        let mut b = 2usize;
        while a < DOMAIN_SIZE {
            words[a / 64] |= 1u64 << (a % 64);
            let next = a + b;
            a = b;
            b = next;
        }
        Self { words }
    }

    /// O(1) membership test; `false` for anything outside the domain.
    pub fn contains(&self, n: u64) -> bool {
        if n > DOMAIN_MAX {
            return false;
        }
        let n = n as usize;
        self.words[n / 64] & (1u64 << (n % 64)) != 0
    }

    /// Number of members.
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }
}

impl std::fmt::Debug for BitTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitTable({} members)", self.count())
    }
}
