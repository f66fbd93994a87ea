//! Stake reward arithmetic.

use crate::LedgerError;

/// Fixed-point scale applied to `apy * term / 365`.
const RATE_SCALE: u128 = 1_000_000;
/// Removes `RATE_SCALE` and the percent.
const RATE_DIVISOR: u128 = 100_000_000;

/// `amount * (apy * term * 1_000_000 / 365) / 100_000_000`.
///
/// For a 365-day term this is exactly `amount * apy / 100`. The division is
/// split over the quotient and remainder of `amount` so large principals do
/// not overflow the intermediate product.
pub fn reward(amount: u128, apy: u16, term_days: u16) -> Result<u128, LedgerError> {
    let rate = u128::from(apy) * u128::from(term_days) * RATE_SCALE / 365;
    let high = (amount / RATE_DIVISOR)
        .checked_mul(rate)
        .ok_or(LedgerError::Overflow)?;
    let low = (amount % RATE_DIVISOR) * rate / RATE_DIVISOR;
    high.checked_add(low).ok_or(LedgerError::Overflow)
}

/// Principal plus reward.
pub fn payout(amount: u128, apy: u16, term_days: u16) -> Result<u128, LedgerError> {
    amount
        .checked_add(reward(amount, apy, term_days)?)
        .ok_or(LedgerError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_year_pays_apy_percent() {
        assert_eq!(reward(1_000, 19, 365).unwrap(), 190);
        assert_eq!(payout(1_000, 19, 365).unwrap(), 1_190);
    }

    #[test]
    fn short_term_rounds_down() {
        // 20% for 10 days on 1000 units: 1000 * 547945 / 1e8 = 5.479...
        assert_eq!(reward(1_000, 20, 10).unwrap(), 5);
    }

    #[test]
    fn zero_apy_returns_principal() {
        assert_eq!(payout(12_345, 0, 900).unwrap(), 12_345);
    }

    #[test]
    fn matches_naive_formula_when_it_fits() {
        for (amount, apy, term) in [(7u128, 3u16, 1u16), (10u128.pow(24), 20, 1000), (99_999_999, 65535, 65535)] {
            let rate = u128::from(apy) * u128::from(term) * 1_000_000 / 365;
            assert_eq!(reward(amount, apy, term).unwrap(), amount * rate / 100_000_000);
        }
    }

    #[test]
    fn huge_principal_overflows_cleanly() {
        assert!(matches!(
            payout(u128::MAX, 20, 1000),
            Err(LedgerError::Overflow)
        ));
    }
}
