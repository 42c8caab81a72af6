//! The tabular Islamic calendar.
//!
//! Months alternate between 30 and 29 days, with the twelfth month gaining a
//! day in the eleven leap years of each thirty-year cycle. Which years are
//! leap years is selected by a [`LeapYearPattern`].

use core::fmt;
use core::str::FromStr;

use crate::{error::ErrorMessage, CalendarError, MS_PER_DAY};

use super::{CalendarRules, YEAR_MARGIN};

/// 0001-01-01 AH, which is 0622-07-16 Julian.
const MILLIS_YEAR_1: i64 = -42_521_587_200_000;

const CYCLE: i32 = 30;
const MONTH_PAIR_LENGTH: i64 = 59;
const LONG_MONTH_LENGTH: i64 = 30;
const SHORT_YEAR_DAYS: i64 = 354;
const CYCLE_DAYS: i64 = 19 * 354 + 11 * 355;
const MILLIS_PER_CYCLE: i64 = CYCLE_DAYS * MS_PER_DAY;

// 354.36667 days
const MILLIS_PER_YEAR: i64 = 30_617_280_288;
// 29.53056 days
const MILLIS_PER_MONTH: i64 = 2_551_440_384;

/// The distribution of leap years within the thirty-year cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeapYearPattern {
    /// Leap years 2, 5, 7, 10, 13, 15, 18, 21, 24, 26 and 29.
    Base15,
    /// Leap years 2, 5, 7, 10, 13, 16, 18, 21, 24, 26 and 29.
    #[default]
    Base16,
    /// Leap years 2, 5, 8, 10, 13, 16, 19, 21, 24, 27 and 29.
    Indian,
    /// Leap years 2, 5, 8, 11, 13, 16, 19, 21, 24, 27 and 30.
    HabashAlHasib,
}

impl LeapYearPattern {
    /// Bit `n` is set when the year `n` (mod 30) of the cycle is a leap year.
    const fn mask(self) -> u32 {
        match self {
            Self::Base15 => 623_158_436,
            Self::Base16 => 623_191_204,
            Self::Indian => 690_562_340,
            Self::HabashAlHasib => 153_692_453,
        }
    }

    #[must_use]
    pub const fn is_leap_year(self, year: i32) -> bool {
        let key = 1u32 << year.rem_euclid(CYCLE);
        self.mask() & key != 0
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base15 => "15-based",
            Self::Base16 => "16-based",
            Self::Indian => "Indian",
            Self::HabashAlHasib => "Habash al-Hasib",
        }
    }
}

impl fmt::Display for LeapYearPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LeapYearPattern {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "15-based" => Ok(Self::Base15),
            "16-based" => Ok(Self::Base16),
            "Indian" => Ok(Self::Indian),
            "Habash al-Hasib" => Ok(Self::HabashAlHasib),
            _ => Err(CalendarError::argument().with_enum(ErrorMessage::ChronologyNameInvalid)),
        }
    }
}

/// The tabular Islamic calendar rules for one leap year pattern.
#[derive(Debug, Clone, Copy)]
pub struct Islamic {
    pattern: LeapYearPattern,
    // Days from the start of the cycle to the start of each cycle year.
    days_before: [i64; 31],
}

impl Islamic {
    #[must_use]
    pub const fn new(pattern: LeapYearPattern) -> Self {
        let mut days_before = [0i64; 31];
        let mut i = 1;
        while i <= 30 {
            let leap = if pattern.is_leap_year(i as i32) { 1 } else { 0 };
            days_before[i] = days_before[i - 1] + SHORT_YEAR_DAYS + leap;
            i += 1;
        }
        Self {
            pattern,
            days_before,
        }
    }

    #[inline]
    #[must_use]
    pub const fn pattern(&self) -> LeapYearPattern {
        self.pattern
    }
}

impl CalendarRules for Islamic {
    fn id(&self) -> &'static str {
        match self.pattern {
            LeapYearPattern::Base15 => "Islamic[15-based]",
            LeapYearPattern::Base16 => "Islamic[16-based]",
            LeapYearPattern::Indian => "Islamic[Indian]",
            LeapYearPattern::HabashAlHasib => "Islamic[Habash al-Hasib]",
        }
    }

    fn min_year(&self) -> i32 {
        1
    }

    fn max_year(&self) -> i32 {
        292_271_022
    }

    fn is_leap_year(&self, year: i32) -> bool {
        self.pattern.is_leap_year(year)
    }

    fn first_day_of_year_millis(&self, year: i32) -> i64 {
        // Counted from year one since year zero may be a leap year.
        let year = i64::from(year) - 1;
        let cycle = year.div_euclid(i64::from(CYCLE));
        let position = year.rem_euclid(i64::from(CYCLE)) as usize;
        MILLIS_YEAR_1 + cycle * MILLIS_PER_CYCLE + self.days_before[position] * MS_PER_DAY
    }

    fn average_millis_per_year(&self) -> i64 {
        MILLIS_PER_YEAR
    }

    fn approx_millis_at_epoch_divided_by_two(&self) -> i64 {
        -MILLIS_YEAR_1 / 2
    }

    fn average_millis_per_month(&self) -> i64 {
        MILLIS_PER_MONTH
    }

    fn leap_month(&self) -> i32 {
        12
    }

    fn days_in_year_max(&self) -> i32 {
        355
    }

    fn days_in_month_max(&self) -> i32 {
        30
    }

    fn days_in_month_max_of(&self, month: i32) -> i32 {
        if month == 12 || (month - 1) % 2 == 0 {
            30
        } else {
            29
        }
    }

    fn days_in_year_month(&self, year: i32, month: i32) -> i32 {
        if month == 12 && self.is_leap_year(year) {
            return 30;
        }
        if (month - 1) % 2 == 0 {
            30
        } else {
            29
        }
    }

    fn millis_to_month_start(&self, _year: i32, month: i32) -> i64 {
        let month = i64::from(month - 1);
        let pairs = month / 2 * MONTH_PAIR_LENGTH;
        if month % 2 == 1 {
            (pairs + LONG_MONTH_LENGTH) * MS_PER_DAY
        } else {
            pairs * MS_PER_DAY
        }
    }

    fn month_of_year(&self, millis_in_year: i64, _year: i32) -> i32 {
        let day_of_year = millis_in_year / MS_PER_DAY;
        if day_of_year == SHORT_YEAR_DAYS {
            return 12;
        }
        ((day_of_year * 2) / MONTH_PAIR_LENGTH) as i32 + 1
    }

    /// Locates the cycle, then the year within it from the cycle table.
    /// Clamped like the estimate in the provided method.
    fn year_of(&self, instant: i64) -> i32 {
        let millis = i128::from(instant) - i128::from(MILLIS_YEAR_1);
        let cycle = millis.div_euclid(i128::from(MILLIS_PER_CYCLE));
        let day_in_cycle = (millis.rem_euclid(i128::from(MILLIS_PER_CYCLE)) as i64) / MS_PER_DAY;
        let position = self.days_before.partition_point(|start| *start <= day_in_cycle) - 1;
        let year = cycle * i128::from(CYCLE) + position as i128 + 1;
        year.clamp(
            i128::from(self.min_year() - YEAR_MARGIN),
            i128::from(self.max_year() + YEAR_MARGIN),
        ) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_table_matches_cycle_length() {
        for pattern in [
            LeapYearPattern::Base15,
            LeapYearPattern::Base16,
            LeapYearPattern::Indian,
            LeapYearPattern::HabashAlHasib,
        ] {
            assert_eq!(Islamic::new(pattern).days_before[30], CYCLE_DAYS);
        }
    }

    #[test]
    fn habash_al_hasib_thirtieth_year() {
        assert!(LeapYearPattern::HabashAlHasib.is_leap_year(30));
        assert!(!LeapYearPattern::HabashAlHasib.is_leap_year(29));
        assert!(LeapYearPattern::Base16.is_leap_year(16));
        assert!(!LeapYearPattern::Base15.is_leap_year(16));
    }

    #[test]
    fn year_one_starts_at_hijra() {
        let rules = Islamic::new(LeapYearPattern::Base16);
        assert_eq!(rules.first_day_of_year_millis(1), MILLIS_YEAR_1);
        assert_eq!(rules.year_of(MILLIS_YEAR_1), 1);
        assert_eq!(rules.year_of(MILLIS_YEAR_1 - 1), 0);
        assert_eq!(rules.year_of(MILLIS_YEAR_1 + 354 * MS_PER_DAY), 2);
        // Year 2 is a leap year.
        assert_eq!(rules.year_of(MILLIS_YEAR_1 + (354 + 354) * MS_PER_DAY), 2);
        assert_eq!(rules.year_of(MILLIS_YEAR_1 + (354 + 355) * MS_PER_DAY), 3);
    }

    #[test]
    fn month_boundaries() {
        let rules = Islamic::new(LeapYearPattern::Base16);
        assert_eq!(rules.month_of_year(29 * MS_PER_DAY, 1), 1);
        assert_eq!(rules.month_of_year(30 * MS_PER_DAY, 1), 2);
        assert_eq!(rules.month_of_year(353 * MS_PER_DAY, 2), 12);
        assert_eq!(rules.month_of_year(354 * MS_PER_DAY, 2), 12);
        assert_eq!(rules.millis_to_month_start(1, 12), 325 * MS_PER_DAY);
    }
}
