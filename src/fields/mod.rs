//! Date-time fields and the strategies they are composed from.
//!
//! A [`DateTimeField`] is a handle to one arithmetic strategy. Simple
//! strategies compute directly from a [`BasicCalendar`][crate::calendar::BasicCalendar]
//! or a fixed unit length; decorating strategies wrap another field and
//! adjust its values (offsets, skipped zero, division into centuries),
//! blend two fields across a calendar cutover, or convert to and from a
//! zone's local time. Every field is immutable and cheap to clone.

mod calendar;
mod cutover;
mod decorated;
mod duration;
mod lenient;
mod precise;
mod zoned;

use core::fmt;
use std::sync::Arc;

use crate::{
    partial::Partial,
    text::FieldTextProvider,
    types::{DateTimeFieldType, DurationFieldType},
    utils, CalendarError, CalendarResult,
};

pub(crate) use calendar::{
    DayOfMonthField, DayOfWeekField, DayOfYearField, EraField, MonthOfYearField, SingleEraField,
    WeekOfWeekyearField, WeekyearField, YearField, YearOfEraField,
};
pub(crate) use cutover::CutoverField;
pub(crate) use decorated::{
    DelegatedField, DividedField, IsoYearOfEraField, OffsetField, RemainderField, SkipField,
    ZeroIsMaxField,
};
pub use duration::DurationField;
pub(crate) use duration::{offset_to_add, subtract_offset_from_local};
pub(crate) use lenient::LenientField;
pub(crate) use precise::PreciseField;
pub(crate) use zoned::ZonedField;

/// The unit a strategy counts in.
#[derive(Debug, Clone)]
pub(crate) enum Unit {
    Duration(DurationField),
    /// An imprecise unit whose arithmetic is performed by the field itself.
    Linked(DurationFieldType, i64),
}

/// The operations every field strategy provides.
///
/// The provided methods follow the behavior shared by most fields; a
/// strategy overrides whatever its arithmetic does differently.
pub(crate) trait FieldStrategy: fmt::Debug + Send + Sync {
    fn field_type(&self) -> DateTimeFieldType;

    fn is_lenient(&self) -> bool {
        false
    }

    /// Rejects instants outside the range the strategy can compute over.
    fn verify_instant(&self, instant: i64) -> CalendarResult<i64> {
        Ok(instant)
    }

    fn get(&self, instant: i64) -> CalendarResult<i32>;

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64>;

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        match self.duration() {
            Unit::Duration(duration) => duration.add_long(instant, value),
            Unit::Linked(..) => Err(CalendarError::assert()),
        }
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let current = self.get(instant)?;
        let wrapped = utils::wrapped_value(
            current,
            value,
            self.minimum_at(instant)?,
            self.maximum_at(instant)?,
        )?;
        self.set(instant, wrapped)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        match self.duration() {
            Unit::Duration(duration) => duration.difference_long(minuend, subtrahend),
            Unit::Linked(..) => Err(CalendarError::assert()),
        }
    }

    fn is_leap(&self, _instant: i64) -> CalendarResult<bool> {
        Ok(false)
    }

    fn leap_amount(&self, _instant: i64) -> CalendarResult<i32> {
        Ok(0)
    }

    fn leap_duration(&self) -> Option<DurationField> {
        None
    }

    fn duration(&self) -> Unit;

    fn range_duration(&self) -> Option<DurationField>;

    fn minimum(&self) -> i32;

    fn maximum(&self) -> i32;

    fn minimum_at(&self, _instant: i64) -> CalendarResult<i32> {
        Ok(self.minimum())
    }

    fn maximum_at(&self, _instant: i64) -> CalendarResult<i32> {
        Ok(self.maximum())
    }

    fn minimum_for(&self, _partial: &Partial) -> i32 {
        self.minimum()
    }

    fn maximum_for(&self, _partial: &Partial) -> i32 {
        self.maximum()
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64>;

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        self.add(floor, 1)
    }

    fn round_half_floor(&self, instant: i64) -> CalendarResult<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if distance(floor, instant) <= distance(instant, ceiling) {
            Ok(floor)
        } else {
            Ok(ceiling)
        }
    }

    fn round_half_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        if distance(instant, ceiling) <= distance(floor, instant) {
            Ok(ceiling)
        } else {
            Ok(floor)
        }
    }

    fn round_half_even(&self, instant: i64) -> CalendarResult<i64> {
        let floor = self.round_floor(instant)?;
        let ceiling = self.round_ceiling(instant)?;
        let below = distance(floor, instant);
        let above = distance(instant, ceiling);
        if below < above {
            Ok(floor)
        } else if above < below {
            Ok(ceiling)
        } else if self.get(ceiling)? & 1 == 0 {
            Ok(ceiling)
        } else {
            Ok(floor)
        }
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        utils::safe_subtract(instant, self.round_floor(instant)?)
    }

    fn canonical_text(&self, _value: i32) -> Option<&'static str> {
        None
    }
}

#[inline]
fn distance(from: i64, to: i64) -> i128 {
    i128::from(to) - i128::from(from)
}

#[derive(Debug)]
pub(crate) enum FieldKind {
    Precise(PreciseField),
    ZeroIsMax(ZeroIsMaxField),
    Year(YearField),
    MonthOfYear(MonthOfYearField),
    DayOfMonth(DayOfMonthField),
    DayOfYear(DayOfYearField),
    WeekOfWeekyear(WeekOfWeekyearField),
    DayOfWeek(DayOfWeekField),
    Weekyear(WeekyearField),
    Era(EraField),
    SingleEra(SingleEraField),
    YearOfEra(YearOfEraField),
    IsoYearOfEra(IsoYearOfEraField),
    Offset(OffsetField),
    Skip(SkipField),
    Divided(DividedField),
    Remainder(RemainderField),
    Delegated(DelegatedField),
    Cutover(CutoverField),
    Zoned(ZonedField),
    Lenient(LenientField),
}

impl FieldKind {
    fn strategy(&self) -> &dyn FieldStrategy {
        match self {
            Self::Precise(f) => f,
            Self::ZeroIsMax(f) => f,
            Self::Year(f) => f,
            Self::MonthOfYear(f) => f,
            Self::DayOfMonth(f) => f,
            Self::DayOfYear(f) => f,
            Self::WeekOfWeekyear(f) => f,
            Self::DayOfWeek(f) => f,
            Self::Weekyear(f) => f,
            Self::Era(f) => f,
            Self::SingleEra(f) => f,
            Self::YearOfEra(f) => f,
            Self::IsoYearOfEra(f) => f,
            Self::Offset(f) => f,
            Self::Skip(f) => f,
            Self::Divided(f) => f,
            Self::Remainder(f) => f,
            Self::Delegated(f) => f,
            Self::Cutover(f) => f,
            Self::Zoned(f) => f,
            Self::Lenient(f) => f,
        }
    }
}

macro_rules! impl_from_strategy {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for DateTimeField {
                fn from(value: $ty) -> Self {
                    Self(Arc::new(FieldKind::$variant(value)))
                }
            }
        )+
    };
}

impl_from_strategy!(
    Precise => PreciseField,
    ZeroIsMax => ZeroIsMaxField,
    Year => YearField,
    MonthOfYear => MonthOfYearField,
    DayOfMonth => DayOfMonthField,
    DayOfYear => DayOfYearField,
    WeekOfWeekyear => WeekOfWeekyearField,
    DayOfWeek => DayOfWeekField,
    Weekyear => WeekyearField,
    Era => EraField,
    SingleEra => SingleEraField,
    YearOfEra => YearOfEraField,
    IsoYearOfEra => IsoYearOfEraField,
    Offset => OffsetField,
    Skip => SkipField,
    Divided => DividedField,
    Remainder => RemainderField,
    Delegated => DelegatedField,
    Cutover => CutoverField,
    Zoned => ZonedField,
    Lenient => LenientField,
);

/// A calendrical field of a chronology, such as `monthOfYear`.
///
/// All operations are pure functions of the instant and value passed in.
/// Instants are milliseconds from 1970-01-01T00:00:00Z.
#[derive(Clone)]
pub struct DateTimeField(Arc<FieldKind>);

impl fmt::Debug for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DateTimeField").field(&self.name()).finish()
    }
}

impl DateTimeField {
    #[inline]
    fn strategy(&self) -> &dyn FieldStrategy {
        self.0.strategy()
    }

    #[must_use]
    pub fn field_type(&self) -> DateTimeFieldType {
        self.strategy().field_type()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.field_type().name()
    }

    /// Every field handed out by a chronology is supported.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        true
    }

    /// Whether `set` rolls out-of-range values over instead of rejecting them.
    #[must_use]
    pub fn is_lenient(&self) -> bool {
        self.strategy().is_lenient()
    }

    /// Returns the value of this field at `instant`.
    pub fn get(&self, instant: i64) -> CalendarResult<i32> {
        let strategy = self.strategy();
        strategy.get(strategy.verify_instant(instant)?)
    }

    /// Sets this field to `value`, keeping the other fields where possible.
    ///
    /// Values outside the field's bounds at `instant` are rejected with an
    /// `IllegalFieldValue` error.
    pub fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.set(strategy.verify_instant(instant)?, value)
    }

    /// Adds `value` units of this field to `instant`.
    ///
    /// Larger fields carry. For months and years the day of month is clamped
    /// to the end of the resulting month.
    pub fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.add(strategy.verify_instant(instant)?, value)
    }

    pub fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.add_long(strategy.verify_instant(instant)?, value)
    }

    /// Adds `value` units, wrapping within this field's range without
    /// carrying into larger fields.
    pub fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.add_wrap_field(strategy.verify_instant(instant)?, value)
    }

    /// Whole units of this field between two instants, truncated toward zero.
    pub fn difference(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i32> {
        utils::safe_to_int(self.difference_long(minuend, subtrahend)?)
    }

    pub fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.difference_long(
            strategy.verify_instant(minuend)?,
            strategy.verify_instant(subtrahend)?,
        )
    }

    pub fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        let strategy = self.strategy();
        strategy.is_leap(strategy.verify_instant(instant)?)
    }

    /// The number of extra units this field has at `instant` in a leap period.
    pub fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        let strategy = self.strategy();
        strategy.leap_amount(strategy.verify_instant(instant)?)
    }

    #[must_use]
    pub fn leap_duration_field(&self) -> Option<DurationField> {
        self.strategy().leap_duration()
    }

    /// The unit this field counts in.
    #[must_use]
    pub fn duration_field(&self) -> DurationField {
        match self.strategy().duration() {
            Unit::Duration(duration) => duration,
            Unit::Linked(ty, unit) => DurationField::linked(self.clone(), ty, unit),
        }
    }

    /// The unit one level up, or `None` if this field is unbounded.
    #[must_use]
    pub fn range_duration_field(&self) -> Option<DurationField> {
        self.strategy().range_duration()
    }

    #[must_use]
    pub fn minimum_value(&self) -> i32 {
        self.strategy().minimum()
    }

    #[must_use]
    pub fn maximum_value(&self) -> i32 {
        self.strategy().maximum()
    }

    pub fn minimum_value_at(&self, instant: i64) -> CalendarResult<i32> {
        let strategy = self.strategy();
        strategy.minimum_at(strategy.verify_instant(instant)?)
    }

    pub fn maximum_value_at(&self, instant: i64) -> CalendarResult<i32> {
        let strategy = self.strategy();
        strategy.maximum_at(strategy.verify_instant(instant)?)
    }

    /// The smallest legal value given the other fields of `partial`.
    #[must_use]
    pub fn minimum_value_for(&self, partial: &Partial) -> i32 {
        self.strategy().minimum_for(partial)
    }

    /// The largest legal value given the other fields of `partial`.
    #[must_use]
    pub fn maximum_value_for(&self, partial: &Partial) -> i32 {
        self.strategy().maximum_for(partial)
    }

    /// Start of the period of this field containing `instant`.
    pub fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.round_floor(strategy.verify_instant(instant)?)
    }

    /// Start of the next period unless `instant` is already on a boundary.
    pub fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.round_ceiling(strategy.verify_instant(instant)?)
    }

    /// The nearer of floor and ceiling, favoring the floor on a tie.
    pub fn round_half_floor(&self, instant: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.round_half_floor(strategy.verify_instant(instant)?)
    }

    /// The nearer of floor and ceiling, favoring the ceiling on a tie.
    pub fn round_half_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.round_half_ceiling(strategy.verify_instant(instant)?)
    }

    /// The nearer of floor and ceiling, favoring an even value on a tie.
    pub fn round_half_even(&self, instant: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.round_half_even(strategy.verify_instant(instant)?)
    }

    /// Milliseconds from the floor of `instant` to `instant`.
    pub fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        let strategy = self.strategy();
        strategy.remainder(strategy.verify_instant(instant)?)
    }

    /// The locale independent text for `value`, if the field has one.
    #[must_use]
    pub fn canonical_text(&self, value: i32) -> Option<&'static str> {
        self.strategy().canonical_text(value)
    }

    /// Text for `value` from `provider`, falling back to the canonical text
    /// and then to the decimal value.
    #[must_use]
    pub fn as_text(&self, value: i32, provider: &dyn FieldTextProvider) -> String {
        provider
            .text(self.field_type(), value)
            .or_else(|| self.canonical_text(value).map(String::from))
            .unwrap_or_else(|| value.to_string())
    }

    /// Short text for `value`, with the same fallbacks as [`Self::as_text`].
    #[must_use]
    pub fn as_short_text(&self, value: i32, provider: &dyn FieldTextProvider) -> String {
        provider
            .short_text(self.field_type(), value)
            .or_else(|| self.canonical_text(value).map(String::from))
            .unwrap_or_else(|| value.to_string())
    }
}

#[cfg(test)]
mod tests;
