//! Calendars of twelve thirty-day months plus a short thirteenth month.

use crate::MS_PER_DAY;

use super::CalendarRules;

const MONTH_LENGTH: i64 = 30;
const MILLIS_PER_MONTH: i64 = MONTH_LENGTH * MS_PER_DAY;
// 365.25 days
const MILLIS_PER_YEAR: i64 = 31_557_600_000;

fn fixed_is_leap_year(year: i32) -> bool {
    (year & 3) == 3
}

/// First day of `year`, counting from the leap-cycle year `base_year`
/// which starts `offset_days` after the epoch date's year began.
fn fixed_first_day_of_year_millis(year: i32, base_year: i32) -> i64 {
    let relative_year = year - base_year;
    let leap_years = if relative_year <= 0 {
        // Add 3 before shifting right since /4 and >>2 behave differently
        // on negative numbers.
        (relative_year + 3) >> 2
    } else {
        let mut leap_years = relative_year >> 2;
        // Day one comes before the leap day.
        if !fixed_is_leap_year(year) {
            leap_years += 1;
        }
        leap_years
    };

    let millis = (i64::from(relative_year) * 365 + i64::from(leap_years)) * MS_PER_DAY;
    // 1970-01-01 is day 113 of the year before `base_year`.
    millis + (365 - 112) * MS_PER_DAY
}

macro_rules! fixed_month_rules {
    ($ty:ident, $id:literal, $base_year:literal, $min:literal, $max:literal) => {
        impl CalendarRules for $ty {
            fn id(&self) -> &'static str {
                $id
            }

            fn min_year(&self) -> i32 {
                $min
            }

            fn max_year(&self) -> i32 {
                $max
            }

            fn is_leap_year(&self, year: i32) -> bool {
                fixed_is_leap_year(year)
            }

            fn first_day_of_year_millis(&self, year: i32) -> i64 {
                fixed_first_day_of_year_millis(year, $base_year)
            }

            fn average_millis_per_year(&self) -> i64 {
                MILLIS_PER_YEAR
            }

            fn approx_millis_at_epoch_divided_by_two(&self) -> i64 {
                (($base_year - 1) * MILLIS_PER_YEAR + 112 * MS_PER_DAY) / 2
            }

            fn average_millis_per_month(&self) -> i64 {
                MILLIS_PER_YEAR / 13
            }

            fn max_month(&self) -> i32 {
                13
            }

            fn leap_month(&self) -> i32 {
                13
            }

            fn days_in_month_max(&self) -> i32 {
                30
            }

            fn days_in_month_max_of(&self, month: i32) -> i32 {
                if month != 13 {
                    30
                } else {
                    6
                }
            }

            fn days_in_year_month(&self, year: i32, month: i32) -> i32 {
                match (month, fixed_is_leap_year(year)) {
                    (13, true) => 6,
                    (13, false) => 5,
                    _ => 30,
                }
            }

            fn millis_to_month_start(&self, _year: i32, month: i32) -> i64 {
                i64::from(month - 1) * MILLIS_PER_MONTH
            }

            fn month_of_year(&self, millis_in_year: i64, _year: i32) -> i32 {
                (millis_in_year / MILLIS_PER_MONTH) as i32 + 1
            }
        }
    };
}

/// The Coptic calendar. 1970-01-01 is 1686-04-23 AM.
#[derive(Debug, Default, Clone, Copy)]
pub struct Coptic;

/// The Ethiopic calendar. 1970-01-01 is 1962-04-23 EE.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ethiopic;

fixed_month_rules!(Coptic, "Coptic", 1687, -292_269_333, 292_272_706);
fixed_month_rules!(Ethiopic, "Ethiopic", 1963, -292_269_057, 292_272_982);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_falls_on_fourth_month() {
        for (rules, year) in [(&Coptic as &dyn CalendarRules, 1686), (&Ethiopic, 1962)] {
            let start = rules.first_day_of_year_millis(year);
            assert_eq!(start, -112 * MS_PER_DAY);
            assert_eq!(rules.month_of_year(-start, year), 4);
            assert_eq!(rules.year_of(0), year);
        }
    }

    #[test]
    fn thirteenth_month_length() {
        assert_eq!(Coptic.days_in_year_month(1687, 13), 6);
        assert_eq!(Coptic.days_in_year_month(1686, 13), 5);
        assert_eq!(Coptic.days_in_year(1687), 366);
        assert_eq!(Coptic.days_in_year(1688), 365);
    }
}
