//! Chronologies: calendar systems that hand out date-time fields.
//!
//! Every chronology is assembled once in UTC from the calendar rules of its
//! kind. A chronology in another zone wraps each UTC field so that it works
//! in local time, and a lenient chronology wraps each field so that
//! out-of-range values roll over.
//!
//! Chronologies are canonical: asking twice for the same kind, zone and
//! parameters returns the same instance.

mod assemble;
mod cache;
mod cutover;

#[cfg(test)]
mod tests;

use core::{fmt, str::FromStr};
use std::sync::{Arc, LazyLock};

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    calendar::{BasicCalendar, LeapYearPattern},
    error::ErrorMessage,
    fields::{offset_to_add, subtract_offset_from_local, DateTimeField, DurationField},
    partial::Partial,
    types::{DateTimeFieldType, DurationFieldType},
    zone::DateTimeZone,
    CalendarError, CalendarResult, DEFAULT_CUTOVER_MILLIS,
};

use assemble::Fields;
use cutover::CutoverDate;

pub(crate) use cutover::CutoverContext;

const DEFAULT_MIN_DAYS_IN_FIRST_WEEK: u8 = 4;

/// The calendar system of a [`Chronology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChronologyKind {
    /// ISO-8601: proleptic Gregorian with zero-based centuries.
    Iso,
    /// Proleptic Gregorian.
    Gregorian,
    /// Proleptic Julian, without a year zero.
    Julian,
    /// Julian before a cutover instant and Gregorian from it.
    GregorianJulian,
    /// The Buddhist era over the proleptic Gregorian calendar.
    Buddhist,
    Coptic,
    Ethiopic,
    /// Tabular Islamic with a choice of leap year pattern.
    Islamic,
    /// ISO with every field lenient.
    Lenient,
}

impl ChronologyKind {
    /// Returns the short name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso => "ISO",
            Self::Gregorian => "Gregorian",
            Self::Julian => "Julian",
            Self::GregorianJulian => "GJ",
            Self::Buddhist => "Buddhist",
            Self::Coptic => "Coptic",
            Self::Ethiopic => "Ethiopic",
            Self::Islamic => "Islamic",
            Self::Lenient => "Lenient",
        }
    }

    const fn fixes_min_days(self) -> bool {
        matches!(self, Self::Iso | Self::Buddhist | Self::Islamic)
    }
}

impl fmt::Display for ChronologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChronologyKind {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            Self::Iso,
            Self::Gregorian,
            Self::Julian,
            Self::GregorianJulian,
            Self::Buddhist,
            Self::Coptic,
            Self::Ethiopic,
            Self::Islamic,
            Self::Lenient,
        ]
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(s))
        .ok_or(CalendarError::argument().with_enum(ErrorMessage::ChronologyNameInvalid))
    }
}

/// The parameters of a [`Chronology`].
///
/// `cutover` only applies to [`ChronologyKind::GregorianJulian`] and
/// `leap_year_pattern` only to [`ChronologyKind::Islamic`]. The ISO,
/// Buddhist and Islamic calendars always use a minimum of four days in the
/// first week.
#[derive(Debug, Clone, PartialEq)]
pub struct ChronologyOptions {
    pub zone: DateTimeZone,
    pub min_days_in_first_week: u8,
    /// The first Gregorian instant, 1582-10-15 by default.
    pub cutover: Option<i64>,
    pub leap_year_pattern: LeapYearPattern,
}

impl Default for ChronologyOptions {
    fn default() -> Self {
        Self {
            zone: DateTimeZone::utc(),
            min_days_in_first_week: DEFAULT_MIN_DAYS_IN_FIRST_WEEK,
            cutover: None,
            leap_year_pattern: LeapYearPattern::default(),
        }
    }
}

impl ChronologyOptions {
    #[must_use]
    pub fn with_zone(mut self, zone: DateTimeZone) -> Self {
        self.zone = zone;
        self
    }
}

/// The identity of a cached chronology.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ChronologyKey {
    kind: ChronologyKind,
    zone: DateTimeZone,
    min_days: u8,
    cutover: Option<i64>,
    pattern: Option<LeapYearPattern>,
}

impl ChronologyKey {
    fn in_zone(&self, zone: DateTimeZone) -> Self {
        Self {
            zone,
            ..self.clone()
        }
    }
}

/// How dates resolve to instants.
#[derive(Debug)]
enum Base {
    /// Closed-form calendar arithmetic.
    Calendar(BasicCalendar),
    /// A Julian and a Gregorian chronology blended at a cutover.
    Cutover(Arc<CutoverContext>),
    /// Setting the fields one at a time from the epoch.
    Fields,
    /// The UTC chronology, resolved and then shifted out of local time.
    Zoned(Chronology),
    /// The strict chronology wrapped by a lenient one.
    Lenient(Chronology),
}

#[derive(Debug)]
struct ChronologyInner {
    key: ChronologyKey,
    fields: Fields,
    base: Base,
}

/// A calendar system in a time zone.
///
/// ```rust
/// use chronology_rs::{Chronology, ChronologyKind, ChronologyOptions, DateTimeFieldType};
///
/// let gj = Chronology::new(ChronologyKind::GregorianJulian, ChronologyOptions::default()).unwrap();
/// let day = gj.field(DateTimeFieldType::DayOfMonth);
///
/// // The day after the last Julian date is the first Gregorian one.
/// let last_julian = gj.get_date_time_millis(1582, 10, 4, 0).unwrap();
/// let next = day.add(last_julian, 1).unwrap();
/// assert_eq!(next, gj.get_date_time_millis(1582, 10, 15, 0).unwrap());
/// assert!(gj.get_date_time_millis(1582, 10, 10, 0).is_err());
/// ```
#[derive(Clone)]
pub struct Chronology(Arc<ChronologyInner>);

static ISO_UTC: LazyLock<Chronology> = LazyLock::new(|| {
    Chronology(Arc::new(ChronologyInner {
        key: ChronologyKey {
            kind: ChronologyKind::Iso,
            zone: DateTimeZone::utc(),
            min_days: DEFAULT_MIN_DAYS_IN_FIRST_WEEK,
            cutover: None,
            pattern: None,
        },
        fields: assemble::iso(),
        base: Base::Calendar(BasicCalendar::iso()),
    }))
});

// ==== Construction ====

impl Chronology {
    /// Returns the canonical chronology of `kind` with `options`.
    pub fn new(kind: ChronologyKind, options: ChronologyOptions) -> CalendarResult<Self> {
        let ChronologyOptions {
            zone,
            min_days_in_first_week,
            cutover,
            leap_year_pattern,
        } = options;

        if !(1..=7).contains(&min_days_in_first_week) {
            return Err(CalendarError::argument().with_enum(ErrorMessage::MinDaysInFirstWeekInvalid));
        }
        if kind.fixes_min_days() && min_days_in_first_week != DEFAULT_MIN_DAYS_IN_FIRST_WEEK {
            return Err(CalendarError::argument()
                .with_message("This calendar always has four minimum days in the first week."));
        }
        if kind == ChronologyKind::Lenient {
            return Self::lenient(&Self::iso(zone)?);
        }

        Self::for_key(ChronologyKey {
            kind,
            zone,
            min_days: min_days_in_first_week,
            cutover: (kind == ChronologyKind::GregorianJulian)
                .then(|| cutover.unwrap_or(DEFAULT_CUTOVER_MILLIS)),
            pattern: (kind == ChronologyKind::Islamic).then_some(leap_year_pattern),
        })
    }

    /// The ISO chronology in UTC.
    #[must_use]
    pub fn iso_utc() -> Self {
        ISO_UTC.clone()
    }

    pub fn iso(zone: DateTimeZone) -> CalendarResult<Self> {
        Self::new(ChronologyKind::Iso, ChronologyOptions::default().with_zone(zone))
    }

    pub fn gregorian(zone: DateTimeZone, min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::new(
            ChronologyKind::Gregorian,
            ChronologyOptions {
                min_days_in_first_week,
                ..ChronologyOptions::default().with_zone(zone)
            },
        )
    }

    pub fn julian(zone: DateTimeZone, min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::new(
            ChronologyKind::Julian,
            ChronologyOptions {
                min_days_in_first_week,
                ..ChronologyOptions::default().with_zone(zone)
            },
        )
    }

    /// The Julian/Gregorian chronology switching at `cutover`, or at
    /// 1582-10-15 when `None`.
    pub fn gj(zone: DateTimeZone, cutover: Option<i64>, min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::new(
            ChronologyKind::GregorianJulian,
            ChronologyOptions {
                min_days_in_first_week,
                cutover,
                ..ChronologyOptions::default().with_zone(zone)
            },
        )
    }

    pub fn buddhist(zone: DateTimeZone) -> CalendarResult<Self> {
        Self::new(ChronologyKind::Buddhist, ChronologyOptions::default().with_zone(zone))
    }

    pub fn coptic(zone: DateTimeZone, min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::new(
            ChronologyKind::Coptic,
            ChronologyOptions {
                min_days_in_first_week,
                ..ChronologyOptions::default().with_zone(zone)
            },
        )
    }

    pub fn ethiopic(zone: DateTimeZone, min_days_in_first_week: u8) -> CalendarResult<Self> {
        Self::new(
            ChronologyKind::Ethiopic,
            ChronologyOptions {
                min_days_in_first_week,
                ..ChronologyOptions::default().with_zone(zone)
            },
        )
    }

    pub fn islamic(zone: DateTimeZone, leap_year_pattern: LeapYearPattern) -> CalendarResult<Self> {
        Self::new(
            ChronologyKind::Islamic,
            ChronologyOptions {
                leap_year_pattern,
                ..ChronologyOptions::default().with_zone(zone)
            },
        )
    }

    /// Wraps `base` so that every field accepts out-of-range values by
    /// rolling over into the larger fields.
    ///
    /// Lenient chronologies are not cached.
    pub fn lenient(base: &Self) -> CalendarResult<Self> {
        if base.kind() == ChronologyKind::Lenient {
            return Ok(base.clone());
        }
        let utc = base.with_utc()?;
        let fields = assemble::lenient(&base.0.fields, &utc.0.fields, base.zone());
        Ok(Self(Arc::new(ChronologyInner {
            key: ChronologyKey {
                kind: ChronologyKind::Lenient,
                ..base.0.key.clone()
            },
            fields,
            base: Base::Lenient(base.clone()),
        })))
    }

    fn for_key(key: ChronologyKey) -> CalendarResult<Self> {
        if key == ISO_UTC.0.key {
            return Ok(Self::iso_utc());
        }
        cache::get_or_build(key, Self::build)
    }

    fn build(key: &ChronologyKey) -> CalendarResult<Self> {
        let utc_zone = DateTimeZone::utc();
        if key.zone != utc_zone {
            let utc = Self::for_key(key.in_zone(utc_zone))?;
            let fields = assemble::zoned(&utc.0.fields, &key.zone);
            return Ok(Self::assembled(key, fields, Base::Zoned(utc)));
        }

        let min_days = key.min_days;
        let (fields, base) = match (key.kind, key.cutover, key.pattern) {
            (ChronologyKind::Iso, ..) => (assemble::iso(), Base::Calendar(BasicCalendar::iso())),
            (ChronologyKind::Gregorian, ..) => {
                let cal = BasicCalendar::gregorian(min_days)?;
                (assemble::basic(cal), Base::Calendar(cal))
            }
            (ChronologyKind::Julian, ..) => {
                let cal = BasicCalendar::julian(min_days)?;
                (assemble::without_year_zero(cal), Base::Calendar(cal))
            }
            (ChronologyKind::Coptic, ..) => {
                let cal = BasicCalendar::coptic(min_days)?;
                (assemble::fixed_month(cal, "AM"), Base::Calendar(cal))
            }
            (ChronologyKind::Ethiopic, ..) => {
                let cal = BasicCalendar::ethiopic(min_days)?;
                (assemble::fixed_month(cal, "EE"), Base::Calendar(cal))
            }
            (ChronologyKind::Islamic, _, Some(pattern)) => {
                let cal = BasicCalendar::islamic(pattern, min_days)?;
                (assemble::islamic(cal), Base::Calendar(cal))
            }
            (ChronologyKind::GregorianJulian, Some(cutover), _) => {
                let context = Arc::new(CutoverContext::try_new(
                    Self::julian(DateTimeZone::utc(), min_days)?,
                    Self::gregorian(DateTimeZone::utc(), min_days)?,
                    cutover,
                )?);
                (cutover::gj(&context)?, Base::Cutover(context))
            }
            (ChronologyKind::Buddhist, ..) => {
                let cal = BasicCalendar::gregorian(min_days)?;
                (assemble::buddhist(&assemble::basic(cal)), Base::Fields)
            }
            _ => return Err(CalendarError::assert()),
        };
        Ok(Self::assembled(key, fields, base))
    }

    fn assembled(key: &ChronologyKey, fields: Fields, base: Base) -> Self {
        Self(Arc::new(ChronologyInner {
            key: key.clone(),
            fields,
            base,
        }))
    }
}

// ==== Accessors ====

impl Chronology {
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ChronologyKind {
        self.0.key.kind
    }

    #[inline]
    #[must_use]
    pub fn zone(&self) -> &DateTimeZone {
        &self.0.key.zone
    }

    #[inline]
    #[must_use]
    pub fn min_days_in_first_week(&self) -> u8 {
        self.0.key.min_days
    }

    /// The cutover instant of a Julian/Gregorian chronology.
    #[inline]
    #[must_use]
    pub fn cutover(&self) -> Option<i64> {
        self.0.key.cutover
    }

    #[inline]
    #[must_use]
    pub fn leap_year_pattern(&self) -> Option<LeapYearPattern> {
        self.0.key.pattern
    }

    /// Returns the field of type `ty`.
    #[must_use]
    pub fn field(&self, ty: DateTimeFieldType) -> DateTimeField {
        self.0.fields.field(ty).clone()
    }

    /// Returns the duration field of type `ty`.
    #[must_use]
    pub fn duration_field(&self, ty: DurationFieldType) -> DurationField {
        self.0.fields.duration(ty).clone()
    }

    pub(crate) fn inner_fields(&self) -> &Fields {
        &self.0.fields
    }

    /// This chronology in `zone`.
    pub fn with_zone(&self, zone: DateTimeZone) -> CalendarResult<Self> {
        if &zone == self.zone() {
            return Ok(self.clone());
        }
        match &self.0.base {
            Base::Lenient(base) => Self::lenient(&base.with_zone(zone)?),
            _ => Self::for_key(self.0.key.in_zone(zone)),
        }
    }

    /// This chronology in UTC.
    pub fn with_utc(&self) -> CalendarResult<Self> {
        self.with_zone(DateTimeZone::utc())
    }
}

// ==== Dates to instants ====

impl Chronology {
    /// Returns the instant of a date and a millisecond of the day.
    pub fn get_date_time_millis(
        &self,
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        millis_of_day: i32,
    ) -> CalendarResult<i64> {
        match &self.0.base {
            Base::Calendar(cal) => cal.date_time_millis(year, month_of_year, day_of_month, millis_of_day),
            Base::Cutover(context) => {
                context.date_time_millis(year, month_of_year, day_of_month, millis_of_day)
            }
            Base::Zoned(utc) => {
                self.local_to_utc(utc.get_date_time_millis(year, month_of_year, day_of_month, millis_of_day)?)
            }
            Base::Fields | Base::Lenient(_) => self.set_each(
                0,
                &[
                    (DateTimeFieldType::Year, year),
                    (DateTimeFieldType::MonthOfYear, month_of_year),
                    (DateTimeFieldType::DayOfMonth, day_of_month),
                    (DateTimeFieldType::MillisOfDay, millis_of_day),
                ],
            ),
        }
    }

    /// Returns the instant of a date and a time of day.
    #[allow(clippy::too_many_arguments)]
    pub fn get_date_time_millis_hms(
        &self,
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> CalendarResult<i64> {
        match &self.0.base {
            Base::Calendar(cal) => cal.date_time_millis_hms(
                year,
                month_of_year,
                day_of_month,
                hour_of_day,
                minute_of_hour,
                second_of_minute,
                millis_of_second,
            ),
            Base::Cutover(context) => context.date_time_millis_hms(
                year,
                month_of_year,
                day_of_month,
                hour_of_day,
                minute_of_hour,
                second_of_minute,
                millis_of_second,
            ),
            Base::Zoned(utc) => self.local_to_utc(utc.get_date_time_millis_hms(
                year,
                month_of_year,
                day_of_month,
                hour_of_day,
                minute_of_hour,
                second_of_minute,
                millis_of_second,
            )?),
            Base::Fields | Base::Lenient(_) => self.set_each(
                0,
                &[
                    (DateTimeFieldType::Year, year),
                    (DateTimeFieldType::MonthOfYear, month_of_year),
                    (DateTimeFieldType::DayOfMonth, day_of_month),
                    (DateTimeFieldType::HourOfDay, hour_of_day),
                    (DateTimeFieldType::MinuteOfHour, minute_of_hour),
                    (DateTimeFieldType::SecondOfMinute, second_of_minute),
                    (DateTimeFieldType::MillisOfSecond, millis_of_second),
                ],
            ),
        }
    }

    /// Returns `instant` with its time of day replaced.
    pub fn get_date_time_millis_on(
        &self,
        instant: i64,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> CalendarResult<i64> {
        if let Base::Zoned(utc) = &self.0.base {
            let (_, local) = offset_to_add(self.zone(), instant)?;
            let local = utc.get_date_time_millis_on(
                local,
                hour_of_day,
                minute_of_hour,
                second_of_minute,
                millis_of_second,
            )?;
            return self.local_to_utc(local);
        }
        self.set_each(
            instant,
            &[
                (DateTimeFieldType::HourOfDay, hour_of_day),
                (DateTimeFieldType::MinuteOfHour, minute_of_hour),
                (DateTimeFieldType::SecondOfMinute, second_of_minute),
                (DateTimeFieldType::MillisOfSecond, millis_of_second),
            ],
        )
    }

    fn set_each(&self, instant: i64, values: &[(DateTimeFieldType, i32)]) -> CalendarResult<i64> {
        values
            .iter()
            .try_fold(instant, |instant, (ty, value)| self.0.fields.field(*ty).set(instant, *value))
    }

    /// Converts a local instant to UTC, rejecting local times skipped by a
    /// transition.
    fn local_to_utc(&self, local: i64) -> CalendarResult<i64> {
        let zone = self.zone();
        let utc = subtract_offset_from_local(zone, local)?;
        if i64::from(zone.offset(utc)) != local - utc {
            return Err(CalendarError::gap(None, local));
        }
        Ok(utc)
    }
}

// ==== Partials ====

impl Chronology {
    /// Checks every value of `partial` against its field's bounds, first
    /// alone and then given the other values.
    pub fn validate(&self, partial: &Partial) -> CalendarResult<()> {
        for (ty, value) in partial.iter() {
            let field = self.0.fields.field(ty);
            check_bounds(ty, value, field.minimum_value(), field.maximum_value())?;
        }
        for (ty, value) in partial.iter() {
            let field = self.0.fields.field(ty);
            check_bounds(
                ty,
                value,
                field.minimum_value_for(partial),
                field.maximum_value_for(partial),
            )?;
        }
        Ok(())
    }

    /// Sets each value of `partial` onto `instant`, largest field first.
    pub fn set_partial(&self, partial: &Partial, instant: i64) -> CalendarResult<i64> {
        partial
            .iter()
            .try_fold(instant, |instant, (ty, value)| self.0.fields.field(ty).set(instant, value))
    }
}

fn check_bounds(ty: DateTimeFieldType, value: i32, lower: i32, upper: i32) -> CalendarResult<()> {
    if value < lower || value > upper {
        return Err(CalendarError::out_of_bounds(
            ty,
            i64::from(value),
            i64::from(lower),
            i64::from(upper),
        ));
    }
    Ok(())
}

// ==== Trait impls ====

impl PartialEq for Chronology {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        if self.0.key != other.0.key {
            return false;
        }
        match (&self.0.base, &other.0.base) {
            (Base::Lenient(a), Base::Lenient(b)) => a == b,
            (Base::Lenient(_), _) | (_, Base::Lenient(_)) => false,
            _ => true,
        }
    }
}

impl Eq for Chronology {}

impl fmt::Debug for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Chronology")
            .field(&self.write_to_string())
            .finish()
    }
}

impl Writeable for Chronology {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        if let Base::Lenient(base) = &self.0.base {
            sink.write_str("LenientChronology[")?;
            base.write_to(sink)?;
            return sink.write_char(']');
        }
        sink.write_str(self.kind().name())?;
        sink.write_str("Chronology[")?;
        sink.write_str(self.zone().id())?;
        if let Some(cutover) = self.cutover().filter(|c| *c != DEFAULT_CUTOVER_MILLIS) {
            sink.write_str(",cutover=")?;
            let utc = match &self.0.base {
                Base::Zoned(utc) => utc,
                _ => self,
            };
            CutoverDate {
                chronology: utc,
                instant: cutover,
            }
            .write_to(sink)?;
        }
        if self.min_days_in_first_week() != DEFAULT_MIN_DAYS_IN_FIRST_WEEK {
            write!(sink, ",mdfw={}", self.min_days_in_first_week())?;
        }
        sink.write_char(']')
    }
}

impl_display_with_writeable!(Chronology);
