//! Duration fields: conversions between unit counts and millisecond spans.

use core::fmt;
use std::sync::Arc;

use crate::{
    error::ErrorMessage,
    types::DurationFieldType,
    utils::{safe_add, safe_multiply, safe_negate, safe_subtract, safe_to_int},
    zone::DateTimeZone,
    CalendarError, CalendarResult, MS_PER_HOUR,
};

use super::DateTimeField;

/// Units shorter than half a day never cross an offset transition in a way
/// that requires the local time to be resolved again.
pub(crate) const TIME_ARITHMETIC_LIMIT: i64 = 12 * MS_PER_HOUR;

/// A unit of calendrical duration.
///
/// Precise units have an exact length in milliseconds. Imprecise units
/// (months, years, weekyears, and anything in a zone with offset
/// transitions) need a reference instant to resolve their length.
#[derive(Clone)]
pub struct DurationField(Arc<DurationKind>);

#[derive(Debug)]
enum DurationKind {
    Millis,
    Precise {
        ty: DurationFieldType,
        unit: i64,
    },
    Scaled {
        wrapped: DurationField,
        ty: DurationFieldType,
        scalar: i32,
    },
    /// Arithmetic is routed back through the field that owns the unit.
    Linked {
        field: DateTimeField,
        ty: DurationFieldType,
        unit: i64,
    },
    Zoned {
        wrapped: DurationField,
        zone: DateTimeZone,
        time_field: bool,
    },
    Unsupported(DurationFieldType),
}

impl fmt::Debug for DurationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DurationField").field(&self.name()).finish()
    }
}

impl DurationField {
    #[must_use]
    pub(crate) fn millis() -> Self {
        Self(Arc::new(DurationKind::Millis))
    }

    #[must_use]
    pub(crate) fn precise(ty: DurationFieldType, unit: i64) -> Self {
        Self(Arc::new(DurationKind::Precise { ty, unit }))
    }

    #[must_use]
    pub(crate) fn scaled(wrapped: DurationField, ty: DurationFieldType, scalar: i32) -> Self {
        Self(Arc::new(DurationKind::Scaled {
            wrapped,
            ty,
            scalar,
        }))
    }

    #[must_use]
    pub(crate) fn linked(field: DateTimeField, ty: DurationFieldType, unit: i64) -> Self {
        Self(Arc::new(DurationKind::Linked { field, ty, unit }))
    }

    /// Wraps `wrapped` so that arithmetic happens in the local time of `zone`.
    /// Unsupported units are returned unchanged.
    #[must_use]
    pub(crate) fn zoned(wrapped: DurationField, zone: DateTimeZone) -> Self {
        if !wrapped.is_supported() {
            return wrapped;
        }
        let time_field = wrapped.unit_millis() < TIME_ARITHMETIC_LIMIT;
        Self(Arc::new(DurationKind::Zoned {
            wrapped,
            zone,
            time_field,
        }))
    }

    #[must_use]
    pub(crate) fn unsupported(ty: DurationFieldType) -> Self {
        Self(Arc::new(DurationKind::Unsupported(ty)))
    }

    /// Returns the unit this field measures.
    #[must_use]
    pub fn duration_type(&self) -> DurationFieldType {
        match &*self.0 {
            DurationKind::Millis => DurationFieldType::Millis,
            DurationKind::Precise { ty, .. }
            | DurationKind::Scaled { ty, .. }
            | DurationKind::Linked { ty, .. }
            | DurationKind::Unsupported(ty) => *ty,
            DurationKind::Zoned { wrapped, .. } => wrapped.duration_type(),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.duration_type().name()
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(&*self.0, DurationKind::Unsupported(_))
    }

    /// Whether every unit has the same length in milliseconds.
    #[must_use]
    pub fn is_precise(&self) -> bool {
        match &*self.0 {
            DurationKind::Millis | DurationKind::Precise { .. } | DurationKind::Unsupported(_) => {
                true
            }
            DurationKind::Scaled { wrapped, .. } => wrapped.is_precise(),
            DurationKind::Linked { .. } => false,
            DurationKind::Zoned {
                wrapped,
                zone,
                time_field,
            } => {
                if *time_field {
                    wrapped.is_precise()
                } else {
                    wrapped.is_precise() && zone.is_fixed()
                }
            }
        }
    }

    /// The exact unit length for precise fields, the average otherwise.
    #[must_use]
    pub fn unit_millis(&self) -> i64 {
        match &*self.0 {
            DurationKind::Millis => 1,
            DurationKind::Precise { unit, .. } | DurationKind::Linked { unit, .. } => *unit,
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => wrapped.unit_millis().saturating_mul(i64::from(*scalar)),
            DurationKind::Zoned { wrapped, .. } => wrapped.unit_millis(),
            DurationKind::Unsupported(_) => 0,
        }
    }

    fn unsupported_error(&self) -> CalendarError {
        CalendarError::unsupported_duration(self.duration_type())
    }

    /// Whole units in `duration`, using the average unit length.
    pub fn value(&self, duration: i64) -> CalendarResult<i32> {
        safe_to_int(self.value_long(duration)?)
    }

    pub fn value_long(&self, duration: i64) -> CalendarResult<i64> {
        match &*self.0 {
            DurationKind::Millis => Ok(duration),
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => Ok(wrapped.value_long(duration)? / i64::from(*scalar)),
            DurationKind::Zoned { wrapped, .. } => wrapped.value_long(duration),
            DurationKind::Unsupported(_) => Err(self.unsupported_error()),
            DurationKind::Precise { unit, .. } | DurationKind::Linked { unit, .. } => {
                Ok(duration / *unit)
            }
        }
    }

    /// Whole units in `duration` measured forward from `instant`.
    pub fn value_at(&self, duration: i64, instant: i64) -> CalendarResult<i32> {
        safe_to_int(self.value_long_at(duration, instant)?)
    }

    pub fn value_long_at(&self, duration: i64, instant: i64) -> CalendarResult<i64> {
        match &*self.0 {
            DurationKind::Linked { field, .. } => {
                field.difference_long(safe_add(instant, duration)?, instant)
            }
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => Ok(wrapped.value_long_at(duration, instant)? / i64::from(*scalar)),
            DurationKind::Zoned { wrapped, zone, .. } => {
                wrapped.value_long_at(duration, offset_to_add(zone, instant)?.1)
            }
            _ => self.value_long(duration),
        }
    }

    /// The span of `value` units, using the average unit length.
    pub fn span_millis(&self, value: i64) -> CalendarResult<i64> {
        match &*self.0 {
            DurationKind::Millis => Ok(value),
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => wrapped.span_millis(safe_multiply(value, i64::from(*scalar))?),
            DurationKind::Zoned { wrapped, .. } => wrapped.span_millis(value),
            DurationKind::Unsupported(_) => Err(self.unsupported_error()),
            DurationKind::Precise { unit, .. } | DurationKind::Linked { unit, .. } => {
                safe_multiply(value, *unit)
            }
        }
    }

    /// The span of `value` units measured forward from `instant`.
    pub fn span_millis_at(&self, value: i64, instant: i64) -> CalendarResult<i64> {
        match &*self.0 {
            DurationKind::Linked { field, .. } => {
                safe_subtract(field.add_long(instant, value)?, instant)
            }
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => wrapped.span_millis_at(safe_multiply(value, i64::from(*scalar))?, instant),
            DurationKind::Zoned { wrapped, zone, .. } => {
                wrapped.span_millis_at(value, offset_to_add(zone, instant)?.1)
            }
            _ => self.span_millis(value),
        }
    }

    pub fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.add_long(instant, i64::from(value))
    }

    /// Adds `value` units to `instant`.
    pub fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        match &*self.0 {
            DurationKind::Millis => safe_add(instant, value),
            DurationKind::Precise { unit, .. } => safe_add(instant, safe_multiply(value, *unit)?),
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => wrapped.add_long(instant, safe_multiply(value, i64::from(*scalar))?),
            DurationKind::Linked { field, .. } => field.add_long(instant, value),
            DurationKind::Zoned {
                wrapped,
                zone,
                time_field,
            } => {
                let (offset, local) = offset_to_add(zone, instant)?;
                let local = wrapped.add_long(local, value)?;
                if *time_field {
                    safe_subtract(local, i64::from(offset))
                } else {
                    subtract_offset_from_local(zone, local)
                }
            }
            DurationKind::Unsupported(_) => Err(self.unsupported_error()),
        }
    }

    /// Subtracts `value` units from `instant`.
    pub fn subtract(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.add_long(instant, safe_negate(value)?)
    }

    pub fn difference(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i32> {
        safe_to_int(self.difference_long(minuend, subtrahend)?)
    }

    /// Whole units between two instants, truncated toward zero.
    pub fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        match &*self.0 {
            DurationKind::Millis => safe_subtract(minuend, subtrahend),
            DurationKind::Precise { unit, .. } => Ok(safe_subtract(minuend, subtrahend)? / *unit),
            DurationKind::Scaled {
                wrapped, scalar, ..
            } => Ok(wrapped.difference_long(minuend, subtrahend)? / i64::from(*scalar)),
            DurationKind::Linked { field, .. } => field.difference_long(minuend, subtrahend),
            DurationKind::Zoned {
                wrapped,
                zone,
                time_field,
            } => {
                let (offset, subtrahend) = offset_to_add(zone, subtrahend)?;
                let minuend = if *time_field {
                    safe_add(minuend, i64::from(offset))?
                } else {
                    offset_to_add(zone, minuend)?.1
                };
                wrapped.difference_long(minuend, subtrahend)
            }
            DurationKind::Unsupported(_) => Err(self.unsupported_error()),
        }
    }
}

/// Returns the zone offset at `instant` and the local instant it yields.
pub(crate) fn offset_to_add(zone: &DateTimeZone, instant: i64) -> CalendarResult<(i32, i64)> {
    let offset = zone.offset(instant);
    instant
        .checked_add(i64::from(offset))
        .map(|local| (offset, local))
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::OffsetAdditionOverflow))
}

/// Converts a local instant back to UTC with the offset in effect there.
pub(crate) fn subtract_offset_from_local(zone: &DateTimeZone, local: i64) -> CalendarResult<i64> {
    let offset = zone.offset_from_local(local);
    local
        .checked_sub(i64::from(offset))
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::OffsetSubtractionOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, MS_PER_DAY};

    #[test]
    fn precise_add_and_difference_are_inverse() {
        let days = DurationField::precise(DurationFieldType::Days, MS_PER_DAY);
        for amount in [-400_i64, -1, 0, 1, 31, 10_000] {
            let start = 1_000_000_i64;
            let end = days.add_long(start, amount).unwrap();
            assert_eq!(days.difference_long(end, start), Ok(amount));
        }
        assert_eq!(days.value(MS_PER_DAY * 3 - 1), Ok(2));
        assert!(days.is_precise());
    }

    #[test]
    fn subtracting_min_value_overflows() {
        let millis = DurationField::millis();
        let err = millis.subtract(0, i64::MIN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArithmeticOverflow);
        assert_eq!(
            millis.add_long(i64::MAX, 1).unwrap_err().kind(),
            ErrorKind::ArithmeticOverflow
        );
    }

    #[test]
    fn scaled_units() {
        let hours = DurationField::precise(DurationFieldType::Hours, MS_PER_HOUR);
        let halfdays = DurationField::scaled(hours, DurationFieldType::Halfdays, 12);
        assert_eq!(halfdays.unit_millis(), 12 * MS_PER_HOUR);
        assert_eq!(halfdays.add(0, 2), Ok(MS_PER_DAY));
        assert_eq!(halfdays.difference(MS_PER_DAY + 1, 0), Ok(2));
        assert_eq!(halfdays.span_millis(3), Ok(36 * MS_PER_HOUR));
        assert_eq!(halfdays.span_millis_at(-1, 0), Ok(-12 * MS_PER_HOUR));
    }

    #[test]
    fn unsupported_unit_reports_kind() {
        let eras = DurationField::unsupported(DurationFieldType::Eras);
        assert!(!eras.is_supported());
        let err = eras.add(0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }
}
