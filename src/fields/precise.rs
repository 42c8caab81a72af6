//! Fields whose unit has a fixed length in milliseconds.

use crate::{
    types::DateTimeFieldType,
    utils::{floor_div, safe_add, safe_multiply, safe_subtract, verify_value_bounds},
    CalendarResult,
};

use super::{DurationField, FieldStrategy, Unit};

/// Rounds `instant` down to a multiple of `unit`.
#[inline]
pub(super) fn floor(instant: i64, unit: i64) -> CalendarResult<i64> {
    safe_subtract(instant, instant.rem_euclid(unit))
}

/// Rounds `instant` up to a multiple of `unit`.
#[inline]
pub(super) fn ceiling(instant: i64, unit: i64) -> CalendarResult<i64> {
    match instant.rem_euclid(unit) {
        0 => Ok(instant),
        rem => safe_add(instant, unit - rem),
    }
}

/// Moves `instant` by `value - current` units.
#[inline]
pub(super) fn shift(instant: i64, current: i32, value: i32, unit: i64) -> CalendarResult<i64> {
    let delta = safe_multiply(i64::from(value) - i64::from(current), unit)?;
    safe_add(instant, delta)
}

/// A zero-based field counting precise units within a precise range,
/// such as `minuteOfHour` or `millisOfDay`.
#[derive(Debug)]
pub(crate) struct PreciseField {
    ty: DateTimeFieldType,
    unit: DurationField,
    range: DurationField,
    unit_millis: i64,
    range_count: i32,
    labels: &'static [&'static str],
}

impl PreciseField {
    pub(crate) fn new(ty: DateTimeFieldType, unit: DurationField, range: DurationField) -> Self {
        let unit_millis = unit.unit_millis();
        let range_count = (range.unit_millis() / unit_millis) as i32;
        debug_assert!(unit.is_precise() && range.is_precise() && range_count >= 2);
        Self {
            ty,
            unit,
            range,
            unit_millis,
            range_count,
            labels: &[],
        }
    }

    /// Attaches canonical text to the values of this field.
    pub(crate) fn with_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.labels = labels;
        self
    }
}

impl FieldStrategy for PreciseField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(floor_div(instant, self.unit_millis).rem_euclid(i64::from(self.range_count)) as i32)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            self.ty,
            i64::from(value),
            0,
            i64::from(self.range_count - 1),
        )?;
        shift(instant, self.get(instant)?, value, self.unit_millis)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.unit.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.range.clone())
    }

    fn minimum(&self) -> i32 {
        0
    }

    fn maximum(&self) -> i32 {
        self.range_count - 1
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        floor(instant, self.unit_millis)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        ceiling(instant, self.unit_millis)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        Ok(instant.rem_euclid(self.unit_millis))
    }

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        usize::try_from(value)
            .ok()
            .and_then(|index| self.labels.get(index))
            .copied()
    }
}
