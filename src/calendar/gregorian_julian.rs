//! The Gregorian and Julian calendars.
//!
//! Both share twelve months of fixed length with February gaining a day in
//! leap years, and differ only in the leap year rule and epoch offset.

use crate::{
    error::ErrorMessage, types::DateTimeFieldType, utils, CalendarError, CalendarResult,
    MS_PER_DAY,
};

use super::CalendarRules;

const MIN_DAYS_PER_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MAX_DAYS_PER_MONTH: [i32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// Day of year (zero based) on which each month starts.
const MIN_DAYS_TO_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const MAX_DAYS_TO_MONTH: [i64; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

const FEB_29: i64 = (31 + 29 - 1) * MS_PER_DAY;

const DAYS_0000_TO_1970: i64 = 719_527;

/// The proleptic Gregorian calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gregorian;

impl Gregorian {
    const MIN_YEAR: i32 = -292_275_051;
    const MAX_YEAR: i32 = 292_278_991;
    // 365.2425 days
    const MILLIS_PER_YEAR: i64 = 31_556_952_000;
    const MILLIS_PER_MONTH: i64 = 2_629_746_000;
}

impl CalendarRules for Gregorian {
    fn id(&self) -> &'static str {
        "Gregorian"
    }

    fn min_year(&self) -> i32 {
        Self::MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        Self::MAX_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (year & 3) == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    fn first_day_of_year_millis(&self, year: i32) -> i64 {
        let mut leap_years = year / 100;
        if year < 0 {
            // Add 3 before shifting right since /4 and >>2 behave differently
            // on negative numbers.
            leap_years = ((year + 3) >> 2) - leap_years + ((leap_years + 3) >> 2) - 1;
        } else {
            leap_years = (year >> 2) - leap_years + (leap_years >> 2);
            if self.is_leap_year(year) {
                leap_years -= 1;
            }
        }
        (i64::from(year) * 365 + (i64::from(leap_years) - DAYS_0000_TO_1970)) * MS_PER_DAY
    }

    fn average_millis_per_year(&self) -> i64 {
        Self::MILLIS_PER_YEAR
    }

    fn approx_millis_at_epoch_divided_by_two(&self) -> i64 {
        1970 * Self::MILLIS_PER_YEAR / 2
    }

    fn average_millis_per_month(&self) -> i64 {
        Self::MILLIS_PER_MONTH
    }

    fn leap_month(&self) -> i32 {
        2
    }

    fn days_in_month_max_of(&self, month: i32) -> i32 {
        gj_days_in_month_max_of(month)
    }

    fn days_in_year_month(&self, year: i32, month: i32) -> i32 {
        gj_days_in_year_month(self.is_leap_year(year), month)
    }

    fn millis_to_month_start(&self, year: i32, month: i32) -> i64 {
        gj_millis_to_month_start(self.is_leap_year(year), month)
    }

    fn month_of_year(&self, millis_in_year: i64, year: i32) -> i32 {
        gj_month_of_year(self.is_leap_year(year), millis_in_year)
    }

    fn year_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        gj_year_difference(self, minuend, subtrahend)
    }

    fn set_year(&self, instant: i64, year: i32) -> i64 {
        gj_set_year(self, instant, year)
    }

    fn days_in_month_max_for_set(&self, year: i32, month: i32, value: i32) -> i32 {
        gj_days_in_month_max_for_set(self, year, month, value)
    }
}

/// The proleptic Julian calendar. Year zero does not exist; requested
/// years at or below zero are shifted up by one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Julian;

impl Julian {
    const MIN_YEAR: i32 = -292_269_050;
    const MAX_YEAR: i32 = 292_272_990;
    // 365.25 days
    const MILLIS_PER_YEAR: i64 = 31_557_600_000;
    const MILLIS_PER_MONTH: i64 = 2_629_800_000;
}

impl CalendarRules for Julian {
    fn id(&self) -> &'static str {
        "Julian"
    }

    fn min_year(&self) -> i32 {
        Self::MIN_YEAR
    }

    fn max_year(&self) -> i32 {
        Self::MAX_YEAR
    }

    fn is_leap_year(&self, year: i32) -> bool {
        (year & 3) == 0
    }

    fn first_day_of_year_millis(&self, year: i32) -> i64 {
        // 1970-01-01 Gregorian is 1969-12-19 Julian. Count from the leap
        // year 1968 and correct afterwards.
        let relative_year = year - 1968;
        let leap_years = if relative_year <= 0 {
            (relative_year + 3) >> 2
        } else {
            let mut leap_years = relative_year >> 2;
            if !self.is_leap_year(year) {
                leap_years += 1;
            }
            leap_years
        };

        let millis = (i64::from(relative_year) * 365 + i64::from(leap_years)) * MS_PER_DAY;
        millis - (366 + 352) * MS_PER_DAY
    }

    fn average_millis_per_year(&self) -> i64 {
        Self::MILLIS_PER_YEAR
    }

    fn approx_millis_at_epoch_divided_by_two(&self) -> i64 {
        (1969 * Self::MILLIS_PER_YEAR + 352 * MS_PER_DAY) / 2
    }

    fn average_millis_per_month(&self) -> i64 {
        Self::MILLIS_PER_MONTH
    }

    fn leap_month(&self) -> i32 {
        2
    }

    fn days_in_month_max_of(&self, month: i32) -> i32 {
        gj_days_in_month_max_of(month)
    }

    fn days_in_year_month(&self, year: i32, month: i32) -> i32 {
        gj_days_in_year_month(self.is_leap_year(year), month)
    }

    fn millis_to_month_start(&self, year: i32, month: i32) -> i64 {
        gj_millis_to_month_start(self.is_leap_year(year), month)
    }

    fn month_of_year(&self, millis_in_year: i64, year: i32) -> i32 {
        gj_month_of_year(self.is_leap_year(year), millis_in_year)
    }

    fn year_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        gj_year_difference(self, minuend, subtrahend)
    }

    fn set_year(&self, instant: i64, year: i32) -> i64 {
        gj_set_year(self, instant, year)
    }

    fn days_in_month_max_for_set(&self, year: i32, month: i32, value: i32) -> i32 {
        gj_days_in_month_max_for_set(self, year, month, value)
    }

    fn adjust_year_for_set(&self, year: i32) -> CalendarResult<i32> {
        match year {
            0 => Err(CalendarError::rejected(DateTimeFieldType::Year, 0)
                .with_enum(ErrorMessage::YearZero)),
            year if year < 0 => Ok(year + 1),
            year => Ok(year),
        }
    }
}

#[inline]
fn month_index(month: i32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

fn gj_days_in_month_max_of(month: i32) -> i32 {
    MAX_DAYS_PER_MONTH[month_index(month)]
}

fn gj_days_in_year_month(leap: bool, month: i32) -> i32 {
    if leap {
        MAX_DAYS_PER_MONTH[month_index(month)]
    } else {
        MIN_DAYS_PER_MONTH[month_index(month)]
    }
}

fn gj_millis_to_month_start(leap: bool, month: i32) -> i64 {
    let table = if leap {
        &MAX_DAYS_TO_MONTH
    } else {
        &MIN_DAYS_TO_MONTH
    };
    table[month_index(month)] * MS_PER_DAY
}

fn gj_month_of_year(leap: bool, millis_in_year: i64) -> i32 {
    let table = if leap {
        &MAX_DAYS_TO_MONTH
    } else {
        &MIN_DAYS_TO_MONTH
    };
    let day = millis_in_year / MS_PER_DAY;
    table.partition_point(|start| *start <= day) as i32
}

fn gj_days_in_month_max_for_set<R: CalendarRules + ?Sized>(
    rules: &R,
    year: i32,
    month: i32,
    value: i32,
) -> i32 {
    if value > 28 || value < 1 {
        rules.days_in_year_month(year, month)
    } else {
        28
    }
}

/// Year difference that treats Feb 29 as Feb 28 when only one side is a
/// leap year.
fn gj_year_difference<R: CalendarRules + ?Sized>(rules: &R, minuend: i64, subtrahend: i64) -> i64 {
    let minuend_year = rules.year_of(minuend);
    let subtrahend_year = rules.year_of(subtrahend);

    let mut minuend_rem = minuend - rules.first_day_of_year_millis(minuend_year);
    let mut subtrahend_rem = subtrahend - rules.first_day_of_year_millis(subtrahend_year);

    if subtrahend_rem >= FEB_29 {
        if rules.is_leap_year(subtrahend_year) {
            if !rules.is_leap_year(minuend_year) {
                subtrahend_rem -= MS_PER_DAY;
            }
        } else if minuend_rem >= FEB_29 && rules.is_leap_year(minuend_year) {
            minuend_rem -= MS_PER_DAY;
        }
    }

    let mut difference = i64::from(minuend_year) - i64::from(subtrahend_year);
    if minuend_rem < subtrahend_rem {
        difference -= 1;
    }
    difference
}

/// Moves `instant` into `year`, keeping month and day; Feb 29 becomes Feb 28
/// in a common year.
fn gj_set_year<R: CalendarRules + ?Sized>(rules: &R, instant: i64, year: i32) -> i64 {
    let this_year = rules.year_of(instant);
    let mut day_of_year = (instant - rules.first_day_of_year_millis(this_year)) / MS_PER_DAY + 1;
    let millis_of_day = utils::millis_of_day(instant);

    if day_of_year > 31 + 28 {
        if rules.is_leap_year(this_year) {
            if !rules.is_leap_year(year) {
                day_of_year -= 1;
            }
        } else if rules.is_leap_year(year) {
            day_of_year += 1;
        }
    }

    rules.first_day_of_year_millis(year) + (day_of_year - 1) * MS_PER_DAY + i64::from(millis_of_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_leap_rule() {
        let rules = Gregorian;
        assert!(!rules.is_leap_year(1900));
        assert!(rules.is_leap_year(2000));
        assert!(rules.is_leap_year(2024));
        assert!(!rules.is_leap_year(2023));
        assert!(rules.is_leap_year(-4));
        assert!(rules.is_leap_year(0));
    }

    #[test]
    fn julian_year_zero_is_rejected() {
        assert!(Julian.adjust_year_for_set(0).is_err());
        assert_eq!(Julian.adjust_year_for_set(-1), Ok(0));
        assert_eq!(Julian.adjust_year_for_set(1582), Ok(1582));
    }

    #[test]
    fn month_lookup_from_day_of_year() {
        assert_eq!(gj_month_of_year(false, 0), 1);
        assert_eq!(gj_month_of_year(false, 58 * MS_PER_DAY), 2);
        assert_eq!(gj_month_of_year(false, 59 * MS_PER_DAY), 3);
        assert_eq!(gj_month_of_year(true, 59 * MS_PER_DAY), 2);
        assert_eq!(gj_month_of_year(true, 365 * MS_PER_DAY), 12);
    }
}
