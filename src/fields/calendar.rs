//! Fields computed from a [`BasicCalendar`].

use crate::{
    calendar::BasicCalendar,
    partial::Partial,
    types::{DateTimeFieldType, DurationFieldType},
    utils::{safe_add_i32, safe_subtract, safe_to_int, verify_value_bounds, wrapped_value},
    CalendarError, CalendarResult, MS_PER_DAY, MS_PER_WEEK,
};

use super::{
    precise::{ceiling, floor, shift},
    DateTimeField, DurationField, FieldStrategy, Unit,
};

/// Verifies the year is within the calendar's supported range.
fn verify_year(cal: &BasicCalendar, ty: DateTimeFieldType, year: i32) -> CalendarResult<()> {
    verify_value_bounds(
        ty,
        i64::from(year),
        i64::from(cal.min_year()),
        i64::from(cal.max_year()),
    )
}

/// The proleptic year.
#[derive(Debug)]
pub(crate) struct YearField {
    cal: BasicCalendar,
    days: DurationField,
}

impl YearField {
    pub(crate) fn new(cal: BasicCalendar, days: DurationField) -> Self {
        Self { cal, days }
    }
}

impl FieldStrategy for YearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Year
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.year(instant))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_year(&self.cal, DateTimeFieldType::Year, value)?;
        Ok(self.cal.set_year(instant, value))
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        if value == 0 {
            return Ok(instant);
        }
        let year = safe_add_i32(self.cal.year(instant), value)?;
        self.set(instant, year)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.add(instant, safe_to_int(value)?)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        if value == 0 {
            return Ok(instant);
        }
        let year = wrapped_value(
            self.cal.year(instant),
            value,
            self.cal.min_year(),
            self.cal.max_year(),
        )?;
        self.set(instant, year)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        Ok(self.cal.year_difference(minuend, subtrahend))
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        Ok(self.cal.is_leap_year(self.cal.year(instant)))
    }

    fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        Ok(i32::from(self.is_leap(instant)?))
    }

    fn leap_duration(&self) -> Option<DurationField> {
        Some(self.days.clone())
    }

    fn duration(&self) -> Unit {
        Unit::Linked(
            DurationFieldType::Years,
            self.cal.rules().average_millis_per_year(),
        )
    }

    fn range_duration(&self) -> Option<DurationField> {
        None
    }

    fn minimum(&self) -> i32 {
        self.cal.min_year()
    }

    fn maximum(&self) -> i32 {
        self.cal.max_year()
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        Ok(self.cal.year_millis(self.cal.year(instant)))
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        let year = self.cal.year(instant);
        let start = self.cal.year_millis(year);
        if start == instant {
            return Ok(instant);
        }
        Ok(self.cal.year_millis(year + 1))
    }
}

/// The month of the year, with day-of-month clamping on arithmetic.
#[derive(Debug)]
pub(crate) struct MonthOfYearField {
    cal: BasicCalendar,
    years: DurationField,
    days: DurationField,
}

impl MonthOfYearField {
    pub(crate) fn new(cal: BasicCalendar, years: DurationField, days: DurationField) -> Self {
        Self { cal, years, days }
    }

    fn max_month(&self) -> i32 {
        self.cal.max_month()
    }
}

impl FieldStrategy for MonthOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::MonthOfYear
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.month_of_year(instant))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::MonthOfYear,
            i64::from(value),
            1,
            i64::from(self.max_month()),
        )?;
        let year = self.cal.year(instant);
        let day = self
            .cal
            .day_of_month(instant)
            .min(self.cal.days_in_year_month(year, value));
        Ok(self.cal.year_month_day_millis(year, value, day)
            + i64::from(self.cal.millis_of_day(instant)))
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        if value == 0 {
            return Ok(instant);
        }
        let year = self.cal.year(instant);
        let month = self.cal.month_of_year_in(instant, year);
        let day = self.cal.day_of_month_in(instant, year, month);

        let max = i64::from(self.max_month());
        let total = i64::from(month - 1)
            .checked_add(value)
            .ok_or(CalendarError::argument().with_message("Magnitude of add amount is too large."))?;
        let target_year = i64::from(year) + total.div_euclid(max);
        if target_year < i64::from(self.cal.min_year()) || target_year > i64::from(self.cal.max_year())
        {
            return Err(
                CalendarError::argument().with_message("Magnitude of add amount is too large.")
            );
        }
        let target_year = target_year as i32;
        let target_month = total.rem_euclid(max) as i32 + 1;
        let day = day.min(self.cal.days_in_year_month(target_year, target_month));

        Ok(self.cal.year_month_day_millis(target_year, target_month, day)
            + i64::from(self.cal.millis_of_day(instant)))
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let month = wrapped_value(self.cal.month_of_year(instant), value, 1, self.max_month())?;
        self.set(instant, month)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        if minuend < subtrahend {
            return Ok(-self.difference_long(subtrahend, minuend)?);
        }
        let cal = &self.cal;
        let minuend_year = cal.year(minuend);
        let minuend_month = cal.month_of_year_in(minuend, minuend_year);
        let subtrahend_year = cal.year(subtrahend);
        let subtrahend_month = cal.month_of_year_in(subtrahend, subtrahend_year);

        let mut difference = (i64::from(minuend_year) - i64::from(subtrahend_year))
            * i64::from(self.max_month())
            + i64::from(minuend_month)
            - i64::from(subtrahend_month);

        // The last day of a month is a whole month after any later day of an
        // earlier month.
        let mut subtrahend = subtrahend;
        let minuend_day = cal.day_of_month_in(minuend, minuend_year, minuend_month);
        if minuend_day == cal.days_in_year_month(minuend_year, minuend_month) {
            let subtrahend_day = cal.day_of_month_in(subtrahend, subtrahend_year, subtrahend_month);
            if subtrahend_day > minuend_day {
                subtrahend = shift(subtrahend, subtrahend_day, minuend_day, MS_PER_DAY)?;
            }
        }

        let minuend_rem = minuend - cal.year_month_millis(minuend_year, minuend_month);
        let subtrahend_rem = subtrahend - cal.year_month_millis(subtrahend_year, subtrahend_month);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        let year = self.cal.year(instant);
        Ok(self.cal.is_leap_year(year)
            && self.cal.month_of_year_in(instant, year) == self.cal.rules().leap_month())
    }

    fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        Ok(i32::from(self.is_leap(instant)?))
    }

    fn leap_duration(&self) -> Option<DurationField> {
        Some(self.days.clone())
    }

    fn duration(&self) -> Unit {
        Unit::Linked(
            DurationFieldType::Months,
            self.cal.rules().average_millis_per_month(),
        )
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.years.clone())
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        self.max_month()
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        let year = self.cal.year(instant);
        let month = self.cal.month_of_year_in(instant, year);
        Ok(self.cal.year_month_millis(year, month))
    }
}

/// The day of the month.
#[derive(Debug)]
pub(crate) struct DayOfMonthField {
    cal: BasicCalendar,
    days: DurationField,
    months: DurationField,
}

impl DayOfMonthField {
    pub(crate) fn new(cal: BasicCalendar, days: DurationField, months: DurationField) -> Self {
        Self { cal, days, months }
    }
}

impl FieldStrategy for DayOfMonthField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfMonth
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.day_of_month(instant))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::DayOfMonth,
            i64::from(value),
            1,
            i64::from(self.cal.days_in_month_max_for_set(instant, value)),
        )?;
        shift(instant, self.cal.day_of_month(instant), value, MS_PER_DAY)
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        Ok(self.cal.is_leap_day(instant))
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.days.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.months.clone())
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        self.cal.rules().days_in_month_max()
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.days_in_month_at(instant))
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        match (
            partial.get(DateTimeFieldType::MonthOfYear),
            partial.get(DateTimeFieldType::Year),
        ) {
            (Some(month), Some(year)) => self.cal.days_in_year_month(year, month),
            (Some(month), None) => self.cal.rules().days_in_month_max_of(month),
            _ => self.maximum(),
        }
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        floor(instant, MS_PER_DAY)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        ceiling(instant, MS_PER_DAY)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        Ok(instant.rem_euclid(MS_PER_DAY))
    }
}

/// The day of the year.
#[derive(Debug)]
pub(crate) struct DayOfYearField {
    cal: BasicCalendar,
    days: DurationField,
    years: DurationField,
}

impl DayOfYearField {
    pub(crate) fn new(cal: BasicCalendar, days: DurationField, years: DurationField) -> Self {
        Self { cal, days, years }
    }
}

impl FieldStrategy for DayOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfYear
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.day_of_year(instant))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        // The last day of the longest year is only checked against the
        // current year when it is requested.
        let max_less_one = self.cal.rules().days_in_year_max() - 1;
        let max = if value > max_less_one || value < 1 {
            self.maximum_at(instant)?
        } else {
            max_less_one
        };
        verify_value_bounds(
            DateTimeFieldType::DayOfYear,
            i64::from(value),
            1,
            i64::from(max),
        )?;
        shift(instant, self.cal.day_of_year(instant), value, MS_PER_DAY)
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        Ok(self.cal.is_leap_day(instant))
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.days.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.years.clone())
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        self.cal.rules().days_in_year_max()
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.days_in_year(self.cal.year(instant)))
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        match partial.get(DateTimeFieldType::Year) {
            Some(year) => self.cal.days_in_year(year),
            None => self.maximum(),
        }
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        floor(instant, MS_PER_DAY)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        ceiling(instant, MS_PER_DAY)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        Ok(instant.rem_euclid(MS_PER_DAY))
    }
}

// Weeks start on Monday and 1970-01-01 was a Thursday.
const WEEK_ALIGNMENT: i64 = 3 * MS_PER_DAY;

/// The week of the week-based year.
#[derive(Debug)]
pub(crate) struct WeekOfWeekyearField {
    cal: BasicCalendar,
    weeks: DurationField,
    weekyears: DurationField,
}

impl WeekOfWeekyearField {
    pub(crate) fn new(cal: BasicCalendar, weeks: DurationField, weekyears: DurationField) -> Self {
        Self {
            cal,
            weeks,
            weekyears,
        }
    }
}

impl FieldStrategy for WeekOfWeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WeekOfWeekyear
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.week_of_weekyear(instant))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let common = self.cal.common_weeks_in_year();
        let max = if value > common {
            self.maximum_at(instant)?
        } else {
            common
        };
        verify_value_bounds(
            DateTimeFieldType::WeekOfWeekyear,
            i64::from(value),
            1,
            i64::from(max),
        )?;
        shift(instant, self.cal.week_of_weekyear(instant), value, MS_PER_WEEK)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.weeks.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.weekyears.clone())
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        self.cal.common_weeks_in_year() + 1
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.weeks_in_year(self.cal.weekyear(instant)))
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        match partial.get(DateTimeFieldType::Weekyear) {
            Some(weekyear) => self.cal.weeks_in_year(weekyear),
            None => self.maximum(),
        }
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        floor(instant + WEEK_ALIGNMENT, MS_PER_WEEK).map(|floor| floor - WEEK_ALIGNMENT)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        ceiling(instant + WEEK_ALIGNMENT, MS_PER_WEEK).map(|ceiling| ceiling - WEEK_ALIGNMENT)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        Ok((instant + WEEK_ALIGNMENT).rem_euclid(MS_PER_WEEK))
    }
}

/// The ISO day of week, Monday being 1.
#[derive(Debug)]
pub(crate) struct DayOfWeekField {
    cal: BasicCalendar,
    days: DurationField,
    weeks: DurationField,
}

impl DayOfWeekField {
    pub(crate) fn new(cal: BasicCalendar, days: DurationField, weeks: DurationField) -> Self {
        Self { cal, days, weeks }
    }
}

impl FieldStrategy for DayOfWeekField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfWeek
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.day_of_week(instant))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(DateTimeFieldType::DayOfWeek, i64::from(value), 1, 7)?;
        shift(instant, self.cal.day_of_week(instant), value, MS_PER_DAY)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.days.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.weeks.clone())
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        7
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        floor(instant, MS_PER_DAY)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        ceiling(instant, MS_PER_DAY)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        Ok(instant.rem_euclid(MS_PER_DAY))
    }
}

/// The week-based year.
#[derive(Debug)]
pub(crate) struct WeekyearField {
    cal: BasicCalendar,
    weeks: DurationField,
}

impl WeekyearField {
    pub(crate) fn new(cal: BasicCalendar, weeks: DurationField) -> Self {
        Self { cal, weeks }
    }

    fn week_floor(instant: i64) -> CalendarResult<i64> {
        floor(instant + WEEK_ALIGNMENT, MS_PER_WEEK).map(|floor| floor - WEEK_ALIGNMENT)
    }
}

impl FieldStrategy for WeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Weekyear
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.cal.weekyear(instant))
    }

    /// Keeps the week number, capped to the shorter of the two weekyears,
    /// and the day of week.
    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let cal = &self.cal;
        verify_year(cal, DateTimeFieldType::Weekyear, value)?;
        let this_weekyear = cal.weekyear(instant);
        if this_weekyear == value {
            return Ok(instant);
        }
        let day_of_week = cal.day_of_week(instant);
        let max_weeks = cal.weeks_in_year(this_weekyear).min(cal.weeks_in_year(value));
        let week = cal.week_of_weekyear(instant).min(max_weeks);

        let mut work = cal.set_year(instant, value);
        let work_weekyear = cal.weekyear(work);
        if work_weekyear < value {
            work += MS_PER_WEEK;
        } else if work_weekyear > value {
            work -= MS_PER_WEEK;
        }
        work = shift(work, cal.week_of_weekyear(work), week, MS_PER_WEEK)?;
        shift(work, cal.day_of_week(work), day_of_week, MS_PER_DAY)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        if value == 0 {
            return Ok(instant);
        }
        self.set(instant, safe_add_i32(self.cal.weekyear(instant), value)?)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.add(instant, safe_to_int(value)?)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.add(instant, value)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        if minuend < subtrahend {
            return Ok(-self.difference_long(subtrahend, minuend)?);
        }
        let minuend_weekyear = self.cal.weekyear(minuend);
        let subtrahend_weekyear = self.cal.weekyear(subtrahend);
        let minuend_rem = self.remainder(minuend)?;
        let mut subtrahend_rem = self.remainder(subtrahend)?;

        // A week past the end of the minuend's weekyear counts as its last
        // week, as `set` caps it.
        let minuend_weeks = i64::from(self.cal.weeks_in_year(minuend_weekyear));
        let subtrahend_week = subtrahend_rem / MS_PER_WEEK;
        if subtrahend_week >= minuend_weeks {
            subtrahend_rem -= (subtrahend_week - minuend_weeks + 1) * MS_PER_WEEK;
        }

        let mut difference = i64::from(minuend_weekyear) - i64::from(subtrahend_weekyear);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        Ok(self.leap_amount(instant)? > 0)
    }

    fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        let weeks = self.cal.weeks_in_year(self.cal.weekyear(instant));
        Ok((weeks - self.cal.common_weeks_in_year()).max(0))
    }

    fn leap_duration(&self) -> Option<DurationField> {
        Some(self.weeks.clone())
    }

    fn duration(&self) -> Unit {
        Unit::Linked(
            DurationFieldType::Weekyears,
            self.cal.rules().average_millis_per_year(),
        )
    }

    fn range_duration(&self) -> Option<DurationField> {
        None
    }

    fn minimum(&self) -> i32 {
        self.cal.min_year()
    }

    fn maximum(&self) -> i32 {
        self.cal.max_year()
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        let week_start = Self::week_floor(instant)?;
        let week = self.cal.week_of_weekyear(week_start);
        Ok(week_start - i64::from(week - 1) * MS_PER_WEEK)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        safe_subtract(instant, self.round_floor(instant)?)
    }
}

const BCE: i32 = 0;
const CE: i32 = 1;

/// The two-valued era of the Gregorian and Julian calendars.
#[derive(Debug)]
pub(crate) struct EraField {
    cal: BasicCalendar,
    eras: DurationField,
}

impl EraField {
    pub(crate) fn new(cal: BasicCalendar) -> Self {
        Self {
            cal,
            eras: DurationField::unsupported(DurationFieldType::Eras),
        }
    }
}

impl FieldStrategy for EraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(if self.cal.year(instant) <= 0 { BCE } else { CE })
    }

    /// Flips the era, keeping the year of era.
    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::Era,
            i64::from(value),
            i64::from(BCE),
            i64::from(CE),
        )?;
        if self.get(instant)? == value {
            return Ok(instant);
        }
        Ok(self.cal.set_year(instant, 1 - self.cal.year(instant)))
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.eras.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        None
    }

    fn minimum(&self) -> i32 {
        BCE
    }

    fn maximum(&self) -> i32 {
        CE
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        if self.get(instant)? == CE {
            Ok(self.cal.set_year(0, 1))
        } else {
            Ok(i64::MIN)
        }
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        if self.get(instant)? == BCE {
            Ok(self.cal.set_year(0, 1))
        } else {
            Ok(i64::MAX)
        }
    }

    fn round_half_floor(&self, instant: i64) -> CalendarResult<i64> {
        self.round_floor(instant)
    }

    fn round_half_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        self.round_floor(instant)
    }

    fn round_half_even(&self, instant: i64) -> CalendarResult<i64> {
        self.round_floor(instant)
    }

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        match value {
            BCE => Some("BC"),
            CE => Some("AD"),
            _ => None,
        }
    }
}

/// An era field for calendars with a single era.
#[derive(Debug)]
pub(crate) struct SingleEraField {
    text: &'static str,
    eras: DurationField,
}

impl SingleEraField {
    const ERA: i32 = 1;

    pub(crate) fn new(text: &'static str) -> Self {
        Self {
            text,
            eras: DurationField::unsupported(DurationFieldType::Eras),
        }
    }
}

impl FieldStrategy for SingleEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn get(&self, _instant: i64) -> CalendarResult<i32> {
        Ok(Self::ERA)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::Era,
            i64::from(value),
            i64::from(Self::ERA),
            i64::from(Self::ERA),
        )?;
        Ok(instant)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.eras.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        None
    }

    fn minimum(&self) -> i32 {
        Self::ERA
    }

    fn maximum(&self) -> i32 {
        Self::ERA
    }

    fn round_floor(&self, _instant: i64) -> CalendarResult<i64> {
        Ok(i64::MIN)
    }

    fn round_ceiling(&self, _instant: i64) -> CalendarResult<i64> {
        Ok(i64::MAX)
    }

    fn round_half_floor(&self, _instant: i64) -> CalendarResult<i64> {
        Ok(i64::MIN)
    }

    fn round_half_ceiling(&self, _instant: i64) -> CalendarResult<i64> {
        Ok(i64::MIN)
    }

    fn round_half_even(&self, _instant: i64) -> CalendarResult<i64> {
        Ok(i64::MIN)
    }

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        (value == Self::ERA).then_some(self.text)
    }
}

/// The year of era for calendars counting proleptic year zero as 1 BC.
#[derive(Debug)]
pub(crate) struct YearOfEraField {
    year: DateTimeField,
    cal: BasicCalendar,
    eras: DurationField,
}

impl YearOfEraField {
    pub(crate) fn new(year: DateTimeField, cal: BasicCalendar) -> Self {
        Self {
            year,
            cal,
            eras: DurationField::unsupported(DurationFieldType::Eras),
        }
    }
}

impl FieldStrategy for YearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YearOfEra
    }

    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        self.cal.verify_instant(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        let year = self.year.get(instant)?;
        Ok(if year <= 0 { 1 - year } else { year })
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::YearOfEra,
            i64::from(value),
            1,
            i64::from(self.maximum()),
        )?;
        let year = if self.cal.year(instant) <= 0 {
            1 - value
        } else {
            value
        };
        self.year.set(instant, year)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.year.add(instant, value)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.year.add_long(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.year.add_wrap_field(instant, value)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        self.year.difference_long(minuend, subtrahend)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.year.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.eras.clone())
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        self.year.maximum_value()
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        self.year.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        self.year.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        self.year.remainder(instant)
    }
}
