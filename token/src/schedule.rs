//! Yield schedules: the APY a new stake locks in at creation time.

use serde::{Deserialize, Serialize};
use tenure_types::{Timestamp, SECONDS_PER_DAY};

/// Source of the annual percentage yield for a new stake.
///
/// Whether the rate depends on `term_days` is up to the schedule. Neither
/// schedule here looks at it: the reward is pro-rated as
/// `amount * apy * term / 365 / 100`, so a longer term already earns more,
/// and a term bonus on top would be a separate policy.
pub trait YieldSchedule {
    /// APY in whole percentage points for a stake of `term_days` opened at `now`.
    fn apy(&self, term_days: u16, now: Timestamp) -> u16;
}

/// APY that starts high at genesis and steps down over time. Ignores term.
///
/// `apy = max(start_apy - days_since_genesis / step_days, end_apy)`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayingApy {
    pub genesis: Timestamp,
    #[serde(default = "default_start_apy")]
    pub start_apy: u16,
    #[serde(default = "default_end_apy")]
    pub end_apy: u16,
    #[serde(default = "default_step_days")]
    pub step_days: u64,
}

fn default_start_apy() -> u16 {
    20
}

fn default_end_apy() -> u16 {
    2
}

fn default_step_days() -> u64 {
    90
}

impl DecayingApy {
    pub fn new(genesis: Timestamp) -> Self {
        Self {
            genesis,
            start_apy: default_start_apy(),
            end_apy: default_end_apy(),
            step_days: default_step_days(),
        }
    }
}

impl YieldSchedule for DecayingApy {
    fn apy(&self, _term_days: u16, now: Timestamp) -> u16 {
        let days = self.genesis.elapsed_since(now) / SECONDS_PER_DAY;
        let steps = days / self.step_days.max(1);
        let decayed = u64::from(self.start_apy).saturating_sub(steps);
        // u64 -> u16 cannot truncate: decayed <= start_apy.
        (decayed as u16).max(self.end_apy)
    }
}

/// A constant APY, regardless of term or time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedApy(pub u16);

impl YieldSchedule for FixedApy {
    fn apy(&self, _term_days: u16, _now: Timestamp) -> u16 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: u64 = 1_700_000_000;

    fn at_day(day: u64) -> Timestamp {
        Timestamp::new(GENESIS + day * SECONDS_PER_DAY)
    }

    #[test]
    fn starts_at_twenty() {
        let s = DecayingApy::new(Timestamp::new(GENESIS));
        assert_eq!(s.apy(365, at_day(0)), 20);
        assert_eq!(s.apy(365, at_day(89)), 20);
    }

    #[test]
    fn one_hundred_days_after_genesis_is_nineteen() {
        let s = DecayingApy::new(Timestamp::new(GENESIS));
        assert_eq!(s.apy(365, at_day(100)), 19);
    }

    #[test]
    fn floors_at_two() {
        let s = DecayingApy::new(Timestamp::new(GENESIS));
        assert_eq!(s.apy(1, at_day(90 * 18)), 2);
        assert_eq!(s.apy(1, at_day(90 * 100)), 2);
    }

    #[test]
    fn before_genesis_reads_as_genesis() {
        let s = DecayingApy::new(Timestamp::new(GENESIS));
        assert_eq!(s.apy(10, Timestamp::new(GENESIS - 1_000)), 20);
    }

    #[test]
    fn zero_step_does_not_divide_by_zero() {
        let mut s = DecayingApy::new(Timestamp::new(GENESIS));
        s.step_days = 0;
        assert_eq!(s.apy(10, at_day(3)), 17);
    }

    #[test]
    fn fixed_is_constant() {
        assert_eq!(FixedApy(7).apy(1, at_day(5_000)), 7);
    }

    #[test]
    fn term_does_not_change_the_rate() {
        let schedule = DecayingApy::new(Timestamp::new(GENESIS));
        for day in [0, 100, 1_000, 3_000] {
            let short = schedule.apy(1, at_day(day));
            for term in [30, 365, 1_000] {
                assert_eq!(schedule.apy(term, at_day(day)), short, "day {day}, term {term}");
            }
        }
        assert_eq!(FixedApy(7).apy(1, at_day(0)), FixedApy(7).apy(1_000, at_day(0)));
    }
}
