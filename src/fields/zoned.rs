//! Fields that operate in the local time of a zone.

use crate::{
    partial::Partial,
    types::DateTimeFieldType,
    utils::{safe_add, safe_subtract},
    zone::DateTimeZone,
    CalendarError, CalendarResult,
};

use super::{
    duration::TIME_ARITHMETIC_LIMIT, offset_to_add, DateTimeField, DurationField, FieldStrategy,
    Unit,
};

/// Converts each instant to local time, delegates to a UTC field, and
/// converts the result back.
///
/// Fields with units under half a day apply the offset in effect at the
/// starting instant on both sides, which is exact for them. Longer units
/// resolve the offset again at the result, preferring the offset of the
/// original instant when the local time is ambiguous.
#[derive(Debug)]
pub(crate) struct ZonedField {
    field: DateTimeField,
    zone: DateTimeZone,
    time_field: bool,
    duration: DurationField,
    range: Option<DurationField>,
    leap: Option<DurationField>,
}

impl ZonedField {
    pub(crate) fn new(
        field: DateTimeField,
        zone: DateTimeZone,
        duration: DurationField,
        range: Option<DurationField>,
        leap: Option<DurationField>,
    ) -> Self {
        let time_field = field.duration_field().unit_millis() < TIME_ARITHMETIC_LIMIT;
        Self {
            field,
            zone,
            time_field,
            duration,
            range,
            leap,
        }
    }

    fn local(&self, instant: i64) -> CalendarResult<i64> {
        self.zone.convert_utc_to_local(instant)
    }

    fn to_utc(&self, local: i64, original: i64) -> CalendarResult<i64> {
        self.zone.convert_local_to_utc_near(local, false, original)
    }

    /// Applies `op` in local time.
    fn in_local<F>(&self, instant: i64, op: F) -> CalendarResult<i64>
    where
        F: FnOnce(i64) -> CalendarResult<i64>,
    {
        if self.time_field {
            let (offset, local) = offset_to_add(&self.zone, instant)?;
            return safe_subtract(op(local)?, i64::from(offset));
        }
        let local = self.local(instant)?;
        self.to_utc(op(local)?, instant)
    }
}

impl FieldStrategy for ZonedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field.field_type()
    }

    fn is_lenient(&self) -> bool {
        self.field.is_lenient()
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        self.field.get(self.local(instant)?)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let local = self.field.set(self.local(instant)?, value)?;
        let result = self.to_utc(local, instant)?;
        if self.get(result)? != value {
            return Err(CalendarError::gap(Some(self.field_type()), local));
        }
        Ok(result)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.in_local(instant, |local| self.field.add(local, value))
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.in_local(instant, |local| self.field.add_long(local, value))
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.in_local(instant, |local| self.field.add_wrap_field(local, value))
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        let (offset, subtrahend) = offset_to_add(&self.zone, subtrahend)?;
        let minuend = if self.time_field {
            safe_add(minuend, i64::from(offset))?
        } else {
            offset_to_add(&self.zone, minuend)?.1
        };
        self.field.difference_long(minuend, subtrahend)
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        self.field.is_leap(self.local(instant)?)
    }

    fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        self.field.leap_amount(self.local(instant)?)
    }

    fn leap_duration(&self) -> Option<DurationField> {
        self.leap.clone()
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.duration.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.range.clone()
    }

    fn minimum(&self) -> i32 {
        self.field.minimum_value()
    }

    fn maximum(&self) -> i32 {
        self.field.maximum_value()
    }

    fn minimum_at(&self, instant: i64) -> CalendarResult<i32> {
        self.field.minimum_value_at(self.local(instant)?)
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        self.field.maximum_value_at(self.local(instant)?)
    }

    fn minimum_for(&self, partial: &Partial) -> i32 {
        self.field.minimum_value_for(partial)
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        self.field.maximum_value_for(partial)
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        self.in_local(instant, |local| self.field.round_floor(local))
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        self.in_local(instant, |local| self.field.round_ceiling(local))
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        self.field.remainder(self.local(instant)?)
    }

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        self.field.canonical_text(value)
    }
}
