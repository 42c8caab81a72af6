//! Yearly recurring offset transitions.

use std::sync::LazyLock;

use crate::{
    chronology::Chronology,
    error::ErrorKind,
    types::DateTimeFieldType,
    utils::{safe_add, safe_subtract, verify_value_bounds},
    CalendarError, CalendarResult, DateTimeField, MS_PER_HOUR,
};

use super::NameKey;

const MAX_TRANSITION_MILLIS: i64 = 167 * MS_PER_HOUR;

/// The ISO UTC fields every recurrence is computed with.
struct IsoFields {
    year: DateTimeField,
    month_of_year: DateTimeField,
    day_of_month: DateTimeField,
    day_of_week: DateTimeField,
    millis_of_day: DateTimeField,
}

static ISO_FIELDS: LazyLock<IsoFields> = LazyLock::new(|| {
    let iso = Chronology::iso_utc();
    IsoFields {
        year: iso.field(DateTimeFieldType::Year),
        month_of_year: iso.field(DateTimeFieldType::MonthOfYear),
        day_of_month: iso.field(DateTimeFieldType::DayOfMonth),
        day_of_week: iso.field(DateTimeFieldType::DayOfWeek),
        millis_of_day: iso.field(DateTimeFieldType::MillisOfDay),
    }
});

/// The clock a recurrence's time of day is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionMode {
    /// Universal time.
    Utc,
    /// Local wall time, including any savings in effect before the transition.
    Wall,
    /// Local standard time.
    Standard,
}

impl TransitionMode {
    fn offset(self, standard: i32, savings: i32) -> i64 {
        match self {
            Self::Utc => 0,
            Self::Wall => i64::from(standard) + i64::from(savings),
            Self::Standard => i64::from(standard),
        }
    }
}

impl TryFrom<char> for TransitionMode {
    type Error = CalendarError;

    /// Parses the zone compiler's mode letters: `u` (also `g`, `z`), `w` and `s`.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'u' | 'g' | 'z' => Ok(Self::Utc),
            'w' => Ok(Self::Wall),
            's' => Ok(Self::Standard),
            _ => Err(CalendarError::argument().with_message("Unknown transition mode.")),
        }
    }
}

/// A day in the year at which a transition happens, such as "the last
/// Sunday of March at 01:00 UTC".
///
/// A negative `day_of_month` counts back from the end of the month, so -1
/// is the last day. With a `day_of_week` (1 = Monday) the date moves to
/// that weekday, forwards when `advance` is set and backwards otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OfYear {
    mode: TransitionMode,
    month_of_year: i32,
    day_of_month: i32,
    day_of_week: i32,
    advance: bool,
    millis_of_day: i32,
}

impl OfYear {
    /// Validates and creates a new day-of-year rule. A `day_of_week` of zero
    /// means the date is used as is.
    pub fn new(
        mode: TransitionMode,
        month_of_year: i32,
        day_of_month: i32,
        day_of_week: i32,
        advance: bool,
        millis_of_day: i32,
    ) -> CalendarResult<Self> {
        verify_value_bounds(
            DateTimeFieldType::MonthOfYear,
            i64::from(month_of_year),
            1,
            12,
        )?;
        verify_value_bounds(
            DateTimeFieldType::DayOfMonth,
            i64::from(day_of_month),
            -30,
            31,
        )?;
        if day_of_month == 0 {
            return Err(CalendarError::rejected(DateTimeFieldType::DayOfMonth, 0));
        }
        verify_value_bounds(
            DateTimeFieldType::DayOfWeek,
            i64::from(day_of_week),
            0,
            7,
        )?;
        // Times past midnight and before it are allowed, as in "M3.4.4/26".
        verify_value_bounds(
            DateTimeFieldType::MillisOfDay,
            i64::from(millis_of_day),
            -MAX_TRANSITION_MILLIS,
            MAX_TRANSITION_MILLIS,
        )?;
        Ok(Self {
            mode,
            month_of_year,
            day_of_month,
            day_of_week,
            advance,
            millis_of_day,
        })
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// The first matching instant after `instant`.
    pub(crate) fn next(&self, instant: i64, standard: i32, savings: i32) -> CalendarResult<i64> {
        let iso = &*ISO_FIELDS;
        let offset = self.mode.offset(standard, savings);
        let instant = safe_add(instant, offset)?;

        let date = self.date(iso, instant, Some(1))?;
        let mut next = safe_add(date, i64::from(self.millis_of_day))?;
        if next <= instant {
            let date = self.date(iso, iso.year.add(date, 1)?, Some(1))?;
            next = safe_add(date, i64::from(self.millis_of_day))?;
        }
        safe_subtract(next, offset)
    }

    /// The last matching instant before `instant`.
    pub(crate) fn previous(&self, instant: i64, standard: i32, savings: i32) -> CalendarResult<i64> {
        let iso = &*ISO_FIELDS;
        let offset = self.mode.offset(standard, savings);
        let instant = safe_add(instant, offset)?;

        let date = self.date(iso, instant, Some(-1))?;
        let mut prev = safe_add(date, i64::from(self.millis_of_day))?;
        if prev >= instant {
            let date = self.date(iso, iso.year.add(date, -1)?, Some(-1))?;
            prev = safe_add(date, i64::from(self.millis_of_day))?;
        }
        safe_subtract(prev, offset)
    }

    /// The matching instant in `year`.
    pub(crate) fn in_year(&self, year: i32, standard: i32, savings: i32) -> CalendarResult<i64> {
        let iso = &*ISO_FIELDS;
        let offset = self.mode.offset(standard, savings);
        let date = self.date(iso, iso.year.set(0, year)?, None)?;
        safe_subtract(safe_add(date, i64::from(self.millis_of_day))?, offset)
    }

    /// Midnight of the matching date in the year of `instant`.
    ///
    /// February 29th moves by `leap_step` years until it exists, and fails
    /// without one.
    fn date(&self, iso: &IsoFields, instant: i64, leap_step: Option<i32>) -> CalendarResult<i64> {
        let month = iso.month_of_year.set(instant, self.month_of_year)?;
        let midnight = iso.millis_of_day.set(month, 0)?;
        let date = match (self.set_day_of_month(iso, midnight), leap_step) {
            (Err(err), Some(step))
                if err.kind() == ErrorKind::IllegalFieldValue
                    && self.month_of_year == 2
                    && self.day_of_month == 29 =>
            {
                let mut instant = midnight;
                while !iso.year.is_leap(instant)? {
                    instant = iso.year.add(instant, step)?;
                }
                self.set_day_of_month(iso, instant)?
            }
            (result, _) => result?,
        };
        if self.day_of_week == 0 {
            return Ok(date);
        }
        self.set_day_of_week(iso, date)
    }

    fn set_day_of_month(&self, iso: &IsoFields, instant: i64) -> CalendarResult<i64> {
        if self.day_of_month >= 0 {
            return iso.day_of_month.set(instant, self.day_of_month);
        }
        let instant = iso.day_of_month.set(instant, 1)?;
        let instant = iso.month_of_year.add(instant, 1)?;
        iso.day_of_month.add(instant, self.day_of_month)
    }

    fn set_day_of_week(&self, iso: &IsoFields, instant: i64) -> CalendarResult<i64> {
        let current = iso.day_of_week.get(instant)?;
        let mut days = self.day_of_week - current;
        if days == 0 {
            return Ok(instant);
        }
        if self.advance {
            if days < 0 {
                days += 7;
            }
        } else if days > 0 {
            days -= 7;
        }
        iso.day_of_week.add(instant, days)
    }
}

/// A named savings amount that starts on a yearly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Recurrence {
    pub(crate) of_year: OfYear,
    pub(crate) name_key: NameKey,
    pub(crate) savings: i32,
}

impl Recurrence {
    pub fn new(of_year: OfYear, name_key: NameKey, savings: i32) -> Self {
        Self {
            of_year,
            name_key,
            savings,
        }
    }

    fn next(&self, instant: i64, standard: i32, savings: i32) -> CalendarResult<i64> {
        self.of_year.next(instant, standard, savings)
    }

    fn previous(&self, instant: i64, standard: i32, savings: i32) -> CalendarResult<i64> {
        self.of_year.previous(instant, standard, savings)
    }
}

/// Two infinitely recurring rules alternating around a standard offset.
///
/// Used as the open-ended tail of a precalculated zone. Which rule is the
/// start and which the end does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DstZone {
    pub(crate) standard: i32,
    pub(crate) start: Recurrence,
    pub(crate) end: Recurrence,
}

impl DstZone {
    /// The rule in effect at `instant`: whichever of the two does not come
    /// next.
    fn matching(&self, instant: i64) -> &Recurrence {
        // Both rules fail only at the ends of the supported range.
        let start = self
            .start
            .next(instant, self.standard, self.end.savings)
            .unwrap_or(instant);
        let end = self
            .end
            .next(instant, self.standard, self.start.savings)
            .unwrap_or(instant);
        if start > end {
            &self.start
        } else {
            &self.end
        }
    }

    pub(crate) fn name_key(&self, instant: i64) -> NameKey {
        self.matching(instant).name_key
    }

    pub(crate) fn offset(&self, instant: i64) -> i32 {
        self.standard + self.matching(instant).savings
    }

    pub(crate) fn next_transition(&self, instant: i64) -> i64 {
        let start = self
            .start
            .next(instant, self.standard, self.end.savings)
            .unwrap_or(instant);
        let end = self
            .end
            .next(instant, self.standard, self.start.savings)
            .unwrap_or(instant);
        start.min(end)
    }

    pub(crate) fn previous_transition(&self, instant: i64) -> i64 {
        let Some(after) = instant.checked_add(1) else {
            return instant;
        };
        let start = self
            .start
            .previous(after, self.standard, self.end.savings)
            .unwrap_or(after);
        let end = self
            .end
            .previous(after, self.standard, self.start.savings)
            .unwrap_or(after);
        start.max(end) - 1
    }
}

