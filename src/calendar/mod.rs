//! Closed-form year/month/day arithmetic for the basic calendar systems.
//!
//! Every calendar here counts years from a first-instant-of-year formula and
//! derives month and day from the millisecond offset into the year. A
//! [`CalendarRules`] implementation supplies the parts that differ between
//! systems; [`BasicCalendar`] binds one to a week-numbering rule and provides
//! the shared derivations used by the date-time fields.

mod fixed_month;
mod gregorian_julian;
mod islamic;

use core::fmt;

use crate::{
    error::ErrorMessage,
    types::DateTimeFieldType,
    utils::{self, safe_add, verify_value_bounds},
    CalendarError, CalendarResult, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
    MS_PER_WEEK,
};

pub use fixed_month::{Coptic, Ethiopic};
pub use gregorian_julian::{Gregorian, Julian};
pub use islamic::{Islamic, LeapYearPattern};

/// Years past either end of the year range whose first instant is still
/// representable.
pub(crate) const YEAR_MARGIN: i32 = 3;

/// The rules that distinguish one basic calendar system from another.
///
/// Implementations must be stateless; the same rules are shared by every
/// chronology built on them. `first_day_of_year_millis` must not overflow
/// for any year within [`YEAR_MARGIN`] of `min_year..=max_year`.
pub trait CalendarRules: fmt::Debug + Send + Sync {
    /// A unique identifier for these rules.
    fn id(&self) -> &'static str;

    fn min_year(&self) -> i32;

    fn max_year(&self) -> i32;

    fn is_leap_year(&self, year: i32) -> bool;

    /// The instant at which `year` starts.
    fn first_day_of_year_millis(&self, year: i32) -> i64;

    fn average_millis_per_year(&self) -> i64;

    fn average_millis_per_year_divided_by_two(&self) -> i64 {
        self.average_millis_per_year() / 2
    }

    /// Half of the approximate distance between year zero and the epoch.
    fn approx_millis_at_epoch_divided_by_two(&self) -> i64;

    fn average_millis_per_month(&self) -> i64;

    fn max_month(&self) -> i32 {
        12
    }

    /// The month that gains a day in leap years.
    fn leap_month(&self) -> i32;

    fn days_in_year_max(&self) -> i32 {
        366
    }

    fn days_in_year(&self, year: i32) -> i32 {
        if self.is_leap_year(year) {
            self.days_in_year_max()
        } else {
            self.days_in_year_max() - 1
        }
    }

    fn days_in_month_max(&self) -> i32 {
        31
    }

    /// The largest length `month` can have in any year.
    fn days_in_month_max_of(&self, month: i32) -> i32;

    fn days_in_year_month(&self, year: i32, month: i32) -> i32;

    /// Milliseconds from the start of `year` to the start of `month`.
    fn millis_to_month_start(&self, year: i32, month: i32) -> i64;

    /// The month containing `millis_in_year`, a non-negative offset from the
    /// start of `year`.
    fn month_of_year(&self, millis_in_year: i64, year: i32) -> i32;

    /// The year containing `instant`.
    ///
    /// Estimates from the average year length, then corrects by at most one
    /// year.
    /// The estimate is clamped to [`YEAR_MARGIN`] years around the year
    /// range, so instants beyond it yield a year outside the range rather
    /// than overflowing.
    fn year_of(&self, instant: i64) -> i32 {
        let unit_millis = self.average_millis_per_year_divided_by_two();
        let mut i2 = (instant >> 1) + self.approx_millis_at_epoch_divided_by_two();
        if i2 < 0 {
            i2 = i2 - unit_millis + 1;
        }
        let mut year = (i2 / unit_millis).clamp(
            i64::from(self.min_year() - YEAR_MARGIN),
            i64::from(self.max_year() + YEAR_MARGIN),
        ) as i32;

        let year_start = self.first_day_of_year_millis(year);
        let diff = instant.saturating_sub(year_start);

        if diff < 0 {
            year -= 1;
        } else if diff >= MS_PER_DAY * 365 {
            let next_start =
                year_start.checked_add(MS_PER_DAY * i64::from(self.days_in_year(year)));
            if next_start.is_some_and(|next_start| next_start <= instant) {
                year += 1;
            }
        }
        year
    }

    /// Whole years between two instants with `minuend >= subtrahend`.
    fn year_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        let minuend_year = self.year_of(minuend);
        let subtrahend_year = self.year_of(subtrahend);
        let minuend_rem = minuend - self.first_day_of_year_millis(minuend_year);
        let subtrahend_rem = subtrahend - self.first_day_of_year_millis(subtrahend_year);

        let mut difference = i64::from(minuend_year) - i64::from(subtrahend_year);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        difference
    }

    /// Moves `instant` into `year`, keeping the day of year and time of day.
    ///
    /// A leap day is dropped when moving to a year without one. Entering a
    /// leap year never adds one.
    fn set_year(&self, instant: i64, year: i32) -> i64 {
        let this_year = self.year_of(instant);
        let mut day_of_year = (instant - self.first_day_of_year_millis(this_year)) / MS_PER_DAY + 1;
        let millis_of_day = utils::millis_of_day(instant);

        if day_of_year >= i64::from(self.days_in_year_max()) && !self.is_leap_year(year) {
            day_of_year -= 1;
        }

        self.first_day_of_year_millis(year)
            + (day_of_year - 1) * MS_PER_DAY
            + i64::from(millis_of_day)
    }

    /// The largest day of month accepted when setting `value` in `year`/`month`.
    fn days_in_month_max_for_set(&self, year: i32, month: i32, _value: i32) -> i32 {
        self.days_in_year_month(year, month)
    }

    /// Maps a requested year onto the proleptic numbering.
    fn adjust_year_for_set(&self, year: i32) -> CalendarResult<i32> {
        Ok(year)
    }
}

/// A basic calendar system bound to a week-numbering rule.
#[derive(Debug, Clone, Copy)]
pub struct BasicCalendar {
    rules: &'static dyn CalendarRules,
    min_days_in_first_week: u8,
}

impl PartialEq for BasicCalendar {
    fn eq(&self, other: &Self) -> bool {
        self.rules.id() == other.rules.id()
            && self.min_days_in_first_week == other.min_days_in_first_week
    }
}

impl Eq for BasicCalendar {}

static GREGORIAN: Gregorian = Gregorian;
static JULIAN: Julian = Julian;
static COPTIC: Coptic = Coptic;
static ETHIOPIC: Ethiopic = Ethiopic;
static ISLAMIC_15: Islamic = Islamic::new(LeapYearPattern::Base15);
static ISLAMIC_16: Islamic = Islamic::new(LeapYearPattern::Base16);
static ISLAMIC_INDIAN: Islamic = Islamic::new(LeapYearPattern::Indian);
static ISLAMIC_HABASH: Islamic = Islamic::new(LeapYearPattern::HabashAlHasib);

impl BasicCalendar {
    /// Binds `rules` to a week rule, validating `min_days_in_first_week`.
    pub fn try_new(
        rules: &'static dyn CalendarRules,
        min_days_in_first_week: u8,
    ) -> CalendarResult<Self> {
        if !(1..=7).contains(&min_days_in_first_week) {
            return Err(CalendarError::argument().with_enum(ErrorMessage::MinDaysInFirstWeekInvalid));
        }
        Ok(Self {
            rules,
            min_days_in_first_week,
        })
    }

    /// The Gregorian rules with ISO-8601 week numbering.
    pub(crate) const fn iso() -> Self {
        Self {
            rules: &Gregorian,
            min_days_in_first_week: 4,
        }
    }

    pub fn gregorian(min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::try_new(&GREGORIAN, min_days_in_first_week)
    }

    pub fn julian(min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::try_new(&JULIAN, min_days_in_first_week)
    }

    pub fn coptic(min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::try_new(&COPTIC, min_days_in_first_week)
    }

    pub fn ethiopic(min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::try_new(&ETHIOPIC, min_days_in_first_week)
    }

    pub fn islamic(pattern: LeapYearPattern, min_days_in_first_week: u8) -> CalendarResult<Self> {
        let rules: &'static dyn CalendarRules = match pattern {
            LeapYearPattern::Base15 => &ISLAMIC_15,
            LeapYearPattern::Base16 => &ISLAMIC_16,
            LeapYearPattern::Indian => &ISLAMIC_INDIAN,
            LeapYearPattern::HabashAlHasib => &ISLAMIC_HABASH,
        };
        Self::try_new(rules, min_days_in_first_week)
    }

    #[inline]
    #[must_use]
    pub fn rules(&self) -> &'static dyn CalendarRules {
        self.rules
    }

    #[inline]
    #[must_use]
    pub const fn min_days_in_first_week(&self) -> u8 {
        self.min_days_in_first_week
    }

    #[inline]
    pub fn min_year(&self) -> i32 {
        self.rules.min_year()
    }

    #[inline]
    pub fn max_year(&self) -> i32 {
        self.rules.max_year()
    }

    #[inline]
    pub fn max_month(&self) -> i32 {
        self.rules.max_month()
    }

    #[inline]
    pub fn is_leap_year(&self, year: i32) -> bool {
        self.rules.is_leap_year(year)
    }

    /// The first instant the closed-form arithmetic supports.
    pub fn min_instant(&self) -> i64 {
        self.year_millis(self.min_year() - 1)
    }

    /// The last instant the closed-form arithmetic supports.
    pub fn max_instant(&self) -> i64 {
        self.year_millis(self.max_year() + 2) - 1
    }

    /// Rejects instants whose year lies more than a year outside
    /// `min_year..=max_year`.
    pub fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        if instant < self.min_instant() || instant > self.max_instant() {
            return Err(CalendarError::overflow().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(instant)
    }

    #[inline]
    pub fn year_millis(&self, year: i32) -> i64 {
        self.rules.first_day_of_year_millis(year)
    }

    pub fn year_month_millis(&self, year: i32, month: i32) -> i64 {
        self.year_millis(year) + self.rules.millis_to_month_start(year, month)
    }

    pub fn year_month_day_millis(&self, year: i32, month: i32, day: i32) -> i64 {
        self.year_month_millis(year, month) + i64::from(day - 1) * MS_PER_DAY
    }

    #[inline]
    pub fn year(&self, instant: i64) -> i32 {
        self.rules.year_of(instant)
    }

    pub fn month_of_year(&self, instant: i64) -> i32 {
        self.month_of_year_in(instant, self.year(instant))
    }

    pub fn month_of_year_in(&self, instant: i64, year: i32) -> i32 {
        self.rules
            .month_of_year(instant - self.year_millis(year), year)
    }

    pub fn day_of_month(&self, instant: i64) -> i32 {
        let year = self.year(instant);
        let month = self.month_of_year_in(instant, year);
        self.day_of_month_in(instant, year, month)
    }

    pub fn day_of_month_in(&self, instant: i64, year: i32, month: i32) -> i32 {
        ((instant - self.year_month_millis(year, month)) / MS_PER_DAY) as i32 + 1
    }

    pub fn day_of_year(&self, instant: i64) -> i32 {
        self.day_of_year_in(instant, self.year(instant))
    }

    pub fn day_of_year_in(&self, instant: i64, year: i32) -> i32 {
        ((instant - self.year_millis(year)) / MS_PER_DAY) as i32 + 1
    }

    /// ISO day of week, Monday being 1. 1970-01-01 was a Thursday.
    pub fn day_of_week(&self, instant: i64) -> i32 {
        let days = utils::floor_div(instant, MS_PER_DAY);
        (days + 3).rem_euclid(7) as i32 + 1
    }

    #[inline]
    pub fn millis_of_day(&self, instant: i64) -> i32 {
        utils::millis_of_day(instant)
    }

    pub fn first_week_of_year_millis(&self, year: i32) -> i64 {
        let jan1 = self.year_millis(year);
        let jan1_day_of_week = i64::from(self.day_of_week(jan1));
        let min_days = i64::from(self.min_days_in_first_week);

        if jan1_day_of_week > 8 - min_days {
            // First week starts after Jan 1.
            jan1 + (8 - jan1_day_of_week) * MS_PER_DAY
        } else {
            jan1 - (jan1_day_of_week - 1) * MS_PER_DAY
        }
    }

    /// Weeks in a weekyear without a leap week.
    pub fn common_weeks_in_year(&self) -> i32 {
        (self.rules.days_in_year_max() - 1) / 7
    }

    pub fn weeks_in_year(&self, year: i32) -> i32 {
        let first = self.first_week_of_year_millis(year);
        let next = self.first_week_of_year_millis(year + 1);
        ((next - first) / MS_PER_WEEK) as i32
    }

    pub fn week_of_weekyear(&self, instant: i64) -> i32 {
        self.week_of_weekyear_in(instant, self.year(instant))
    }

    pub fn week_of_weekyear_in(&self, instant: i64, year: i32) -> i32 {
        let first = self.first_week_of_year_millis(year);
        if instant < first {
            return self.weeks_in_year(year - 1);
        }
        let next = self.first_week_of_year_millis(year + 1);
        if instant >= next {
            return 1;
        }
        ((instant - first) / MS_PER_WEEK) as i32 + 1
    }

    pub fn weekyear(&self, instant: i64) -> i32 {
        let year = self.year(instant);
        let week = self.week_of_weekyear_in(instant, year);
        if week == 1 {
            self.year(instant + MS_PER_WEEK)
        } else if week >= self.common_weeks_in_year() {
            self.year(instant - 2 * MS_PER_WEEK)
        } else {
            year
        }
    }

    pub fn days_in_year(&self, year: i32) -> i32 {
        self.rules.days_in_year(year)
    }

    pub fn days_in_year_month(&self, year: i32, month: i32) -> i32 {
        self.rules.days_in_year_month(year, month)
    }

    /// The length of the month containing `instant`.
    pub fn days_in_month_at(&self, instant: i64) -> i32 {
        let year = self.year(instant);
        let month = self.month_of_year_in(instant, year);
        self.days_in_year_month(year, month)
    }

    pub fn days_in_month_max_for_set(&self, instant: i64, value: i32) -> i32 {
        let year = self.year(instant);
        let month = self.month_of_year_in(instant, year);
        self.rules.days_in_month_max_for_set(year, month, value)
    }

    /// Whether `instant` falls on the extra day of a leap year.
    pub fn is_leap_day(&self, instant: i64) -> bool {
        let year = self.year(instant);
        if !self.is_leap_year(year) {
            return false;
        }
        let month = self.month_of_year_in(instant, year);
        let leap_month = self.rules.leap_month();
        month == leap_month
            && self.day_of_month_in(instant, year, month) == self.rules.days_in_month_max_of(leap_month)
    }

    #[inline]
    pub fn set_year(&self, instant: i64, year: i32) -> i64 {
        self.rules.set_year(instant, year)
    }

    /// Whole years between two instants, truncated toward zero.
    pub fn year_difference(&self, minuend: i64, subtrahend: i64) -> i64 {
        if minuend < subtrahend {
            return -self.rules.year_difference(subtrahend, minuend);
        }
        self.rules.year_difference(minuend, subtrahend)
    }

    /// The instant at midnight of the given date, after bounds checks.
    pub fn date_midnight_millis(&self, year: i32, month: i32, day: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::Year,
            i64::from(year),
            i64::from(self.min_year()) - 1,
            i64::from(self.max_year()) + 1,
        )?;
        verify_value_bounds(
            DateTimeFieldType::MonthOfYear,
            i64::from(month),
            1,
            i64::from(self.max_month()),
        )?;
        verify_value_bounds(
            DateTimeFieldType::DayOfMonth,
            i64::from(day),
            1,
            i64::from(self.days_in_year_month(year, month)),
        )?;
        Ok(self.year_month_day_millis(year, month, day))
    }

    pub fn date_time_millis(
        &self,
        year: i32,
        month: i32,
        day: i32,
        millis_of_day: i32,
    ) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::MillisOfDay,
            i64::from(millis_of_day),
            0,
            MS_PER_DAY - 1,
        )?;
        let year = self.rules.adjust_year_for_set(year)?;
        safe_add(
            self.date_midnight_millis(year, month, day)?,
            i64::from(millis_of_day),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn date_time_millis_hms(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> CalendarResult<i64> {
        verify_value_bounds(DateTimeFieldType::HourOfDay, i64::from(hour), 0, 23)?;
        verify_value_bounds(DateTimeFieldType::MinuteOfHour, i64::from(minute), 0, 59)?;
        verify_value_bounds(DateTimeFieldType::SecondOfMinute, i64::from(second), 0, 59)?;
        verify_value_bounds(DateTimeFieldType::MillisOfSecond, i64::from(millis), 0, 999)?;
        let millis_of_day = i64::from(hour) * MS_PER_HOUR
            + i64::from(minute) * MS_PER_MINUTE
            + i64::from(second) * MS_PER_SECOND
            + i64::from(millis);
        self.date_time_millis(year, month, day, millis_of_day as i32)
    }
}

#[cfg(test)]
mod tests;
