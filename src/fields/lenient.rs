//! Fields that roll out-of-range values over instead of rejecting them.

use crate::{
    partial::Partial,
    types::DateTimeFieldType,
    utils::safe_subtract,
    zone::DateTimeZone,
    CalendarResult,
};

use super::{DateTimeField, DurationField, FieldStrategy, Unit};

/// Sets a value by adding the difference from the current value in local
/// time, so that month 13 becomes January of the next year.
#[derive(Debug)]
pub(crate) struct LenientField {
    wrapped: DateTimeField,
    utc: DateTimeField,
    zone: DateTimeZone,
}

impl LenientField {
    /// `utc` is the same field of the base chronology in UTC.
    pub(crate) fn new(wrapped: DateTimeField, utc: DateTimeField, zone: DateTimeZone) -> Self {
        Self { wrapped, utc, zone }
    }
}

impl FieldStrategy for LenientField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn is_lenient(&self) -> bool {
        true
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        self.wrapped.get(instant)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let local = self.zone.convert_utc_to_local(instant)?;
        let difference = safe_subtract(i64::from(value), i64::from(self.get(instant)?))?;
        let local = self.utc.add_long(local, difference)?;
        self.zone.convert_local_to_utc_near(local, false, instant)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.wrapped.add(instant, value)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.wrapped.add_long(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.wrapped.add_wrap_field(instant, value)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        self.wrapped.difference_long(minuend, subtrahend)
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        self.wrapped.is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        self.wrapped.leap_amount(instant)
    }

    fn leap_duration(&self) -> Option<DurationField> {
        self.wrapped.leap_duration_field()
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.wrapped.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.wrapped.range_duration_field()
    }

    fn minimum(&self) -> i32 {
        self.wrapped.minimum_value()
    }

    fn maximum(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    fn minimum_at(&self, instant: i64) -> CalendarResult<i32> {
        self.wrapped.minimum_value_at(instant)
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        self.wrapped.maximum_value_at(instant)
    }

    fn minimum_for(&self, partial: &Partial) -> i32 {
        self.wrapped.minimum_value_for(partial)
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        self.wrapped.maximum_value_for(partial)
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn round_half_floor(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_half_floor(instant)
    }

    fn round_half_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_half_ceiling(instant)
    }

    fn round_half_even(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_half_even(instant)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.remainder(instant)
    }

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        self.wrapped.canonical_text(value)
    }
}
