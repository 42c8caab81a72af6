//! Fields that decorate another field.
//!
//! Each decorator keeps the wrapped field's arithmetic and adjusts the value
//! space: shifting it by a constant, skipping or restoring zero, splitting it
//! by a divisor, or renaming its type.

use crate::{
    partial::Partial,
    types::DateTimeFieldType,
    utils::{safe_multiply, safe_to_int, verify_value_bounds, wrapped_value},
    CalendarError, CalendarResult,
};

use super::{DateTimeField, DurationField, FieldStrategy, Unit};

/// Forwards the operations that decorators leave untouched.
macro_rules! forward_to_wrapped {
    () => {
        fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
            self.wrapped.is_leap(instant)
        }

        fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
            self.wrapped.leap_amount(instant)
        }

        fn leap_duration(&self) -> Option<DurationField> {
            self.wrapped.leap_duration_field()
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
    };
}

/// Adds a constant to every value of the wrapped field.
#[derive(Debug)]
pub(crate) struct OffsetField {
    wrapped: DateTimeField,
    ty: DateTimeFieldType,
    offset: i32,
    min: i32,
    max: i32,
}

impl OffsetField {
    pub(crate) fn new(wrapped: DateTimeField, offset: i32) -> Self {
        let ty = wrapped.field_type();
        Self::with_type(wrapped, ty, offset)
    }

    pub(crate) fn with_type(wrapped: DateTimeField, ty: DateTimeFieldType, offset: i32) -> Self {
        debug_assert!(offset != 0);
        let min = wrapped.minimum_value().saturating_add(offset);
        let max = wrapped.maximum_value().saturating_add(offset);
        Self {
            wrapped,
            ty,
            offset,
            min,
            max,
        }
    }

    fn verify(&self, value: i32) -> CalendarResult<()> {
        verify_value_bounds(
            self.ty,
            i64::from(value),
            i64::from(self.min),
            i64::from(self.max),
        )
    }
}

impl FieldStrategy for OffsetField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.wrapped.get(instant)? + self.offset)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.verify(value)?;
        self.wrapped.set(instant, value - self.offset)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let instant = self.wrapped.add(instant, value)?;
        self.verify(self.get(instant)?)?;
        Ok(instant)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        let instant = self.wrapped.add_long(instant, value)?;
        self.verify(self.get(instant)?)?;
        Ok(instant)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let wrapped = wrapped_value(self.get(instant)?, value, self.min, self.max)?;
        self.set(instant, wrapped)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        self.wrapped.difference_long(minuend, subtrahend)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.wrapped.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.wrapped.range_duration_field()
    }

    fn minimum(&self) -> i32 {
        self.min
    }

    fn maximum(&self) -> i32 {
        self.max
    }

    forward_to_wrapped!();
}

/// Removes a year zero from a proleptic year field: proleptic zero reads
/// as -1 and setting zero is rejected.
#[derive(Debug)]
pub(crate) struct SkipField {
    wrapped: DateTimeField,
    min: i32,
}

impl SkipField {
    pub(crate) fn new(wrapped: DateTimeField) -> Self {
        let min = match wrapped.minimum_value() {
            min if min < 0 => min - 1,
            0 => 1,
            min => min,
        };
        Self { wrapped, min }
    }
}

impl FieldStrategy for SkipField {
    fn field_type(&self) -> DateTimeFieldType {
        self.wrapped.field_type()
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        let value = self.wrapped.get(instant)?;
        Ok(if value <= 0 { value - 1 } else { value })
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let ty = self.field_type();
        verify_value_bounds(
            ty,
            i64::from(value),
            i64::from(self.min),
            i64::from(self.maximum()),
        )?;
        let value = match value {
            0 => return Err(CalendarError::rejected(ty, 0)),
            value if value < 0 => value + 1,
            value => value,
        };
        self.wrapped.set(instant, value)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.wrapped.add(instant, value)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.wrapped.add_long(instant, value)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        self.wrapped.difference_long(minuend, subtrahend)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.wrapped.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.wrapped.range_duration_field()
    }

    fn minimum(&self) -> i32 {
        self.min
    }

    fn maximum(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    forward_to_wrapped!();
}

/// The quotient of the wrapped field's value by a divisor, such as
/// `centuryOfEra` from `yearOfEra`.
#[derive(Debug)]
pub(crate) struct DividedField {
    wrapped: DateTimeField,
    ty: DateTimeFieldType,
    divisor: i32,
    duration: DurationField,
    range: Option<DurationField>,
    min: i32,
    max: i32,
}

impl DividedField {
    /// Divides `wrapped` by `divisor`, ranged by `range` or by the wrapped
    /// field's range when `None`.
    pub(crate) fn new(
        wrapped: DateTimeField,
        range: Option<DurationField>,
        ty: DateTimeFieldType,
        divisor: i32,
    ) -> Self {
        debug_assert!(divisor >= 2);
        let duration = DurationField::scaled(wrapped.duration_field(), ty.duration_type(), divisor);
        let range = range.or_else(|| wrapped.range_duration_field());
        let min = wrapped.minimum_value().div_euclid(divisor);
        let max = wrapped.maximum_value().div_euclid(divisor);
        Self {
            wrapped,
            ty,
            divisor,
            duration,
            range,
            min,
            max,
        }
    }
}

impl FieldStrategy for DividedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.wrapped.get(instant)?.div_euclid(self.divisor))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            self.ty,
            i64::from(value),
            i64::from(self.min),
            i64::from(self.max),
        )?;
        let remainder = self.wrapped.get(instant)?.rem_euclid(self.divisor);
        let value = safe_multiply(i64::from(value), i64::from(self.divisor))? + i64::from(remainder);
        self.wrapped.set(instant, safe_to_int(value)?)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.wrapped
            .add_long(instant, safe_multiply(value, i64::from(self.divisor))?)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let wrapped = wrapped_value(self.get(instant)?, value, self.min, self.max)?;
        self.set(instant, wrapped)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        Ok(self.wrapped.difference_long(minuend, subtrahend)? / i64::from(self.divisor))
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.duration.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.range.clone()
    }

    fn minimum(&self) -> i32 {
        self.min
    }

    fn maximum(&self) -> i32 {
        self.max
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        let start = self
            .wrapped
            .set(instant, self.get(instant)?.saturating_mul(self.divisor))?;
        self.wrapped.round_floor(start)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        let value = self.get(self.wrapped.remainder(instant)?)?;
        self.set(instant, value)
    }
}

/// The remainder of the wrapped field's value by a divisor, such as
/// `yearOfCentury` from `yearOfEra`.
#[derive(Debug)]
pub(crate) struct RemainderField {
    wrapped: DateTimeField,
    ty: DateTimeFieldType,
    divisor: i32,
    duration: DurationField,
    range: Option<DurationField>,
}

impl RemainderField {
    /// The remainder paired with an existing divided field.
    pub(crate) fn from_divided(divided: &DividedField, ty: DateTimeFieldType) -> Self {
        Self {
            wrapped: divided.wrapped.clone(),
            ty,
            divisor: divided.divisor,
            duration: divided.wrapped.duration_field(),
            range: Some(divided.duration.clone()),
        }
    }

    pub(crate) fn new(
        wrapped: DateTimeField,
        range: DurationField,
        ty: DateTimeFieldType,
        divisor: i32,
    ) -> Self {
        debug_assert!(divisor >= 2);
        let duration = wrapped.duration_field();
        Self {
            wrapped,
            ty,
            divisor,
            duration,
            range: Some(range),
        }
    }
}

impl FieldStrategy for RemainderField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.wrapped.get(instant)?.rem_euclid(self.divisor))
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            self.ty,
            i64::from(value),
            0,
            i64::from(self.divisor - 1),
        )?;
        let quotient = self.wrapped.get(instant)?.div_euclid(self.divisor);
        let value = i64::from(quotient) * i64::from(self.divisor) + i64::from(value);
        self.wrapped.set(instant, safe_to_int(value)?)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.wrapped.add(instant, value)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.wrapped.add_long(instant, value)
    }

    fn add_wrap_field(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let wrapped = wrapped_value(self.get(instant)?, value, 0, self.divisor - 1)?;
        self.set(instant, wrapped)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        self.wrapped.difference_long(minuend, subtrahend)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.duration.clone())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.range.clone()
    }

    fn minimum(&self) -> i32 {
        0
    }

    fn maximum(&self) -> i32 {
        self.divisor - 1
    }

    forward_to_wrapped!();
}

/// Replaces a zero value with the maximum, as a clock hour reads 24 or 12
/// where the hour reads 0.
#[derive(Debug)]
pub(crate) struct ZeroIsMaxField {
    wrapped: DateTimeField,
    ty: DateTimeFieldType,
}

impl ZeroIsMaxField {
    pub(crate) fn new(wrapped: DateTimeField, ty: DateTimeFieldType) -> Self {
        debug_assert_eq!(wrapped.minimum_value(), 0);
        Self { wrapped, ty }
    }
}

impl FieldStrategy for ZeroIsMaxField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        match self.wrapped.get(instant)? {
            0 => Ok(self.maximum()),
            value => Ok(value),
        }
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let max = self.maximum();
        verify_value_bounds(self.ty, i64::from(value), 1, i64::from(max))?;
        let value = if value == max { 0 } else { value };
        self.wrapped.set(instant, value)
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

    fn duration(&self) -> Unit {
        Unit::Duration(self.wrapped.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.wrapped.range_duration_field()
    }

    fn minimum(&self) -> i32 {
        1
    }

    fn maximum(&self) -> i32 {
        self.wrapped.maximum_value() + 1
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.wrapped.maximum_value_at(instant)? + 1)
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        self.wrapped.maximum_value_for(partial) + 1
    }

    forward_to_wrapped!();
}

/// Presents the wrapped field under another type and range.
#[derive(Debug)]
pub(crate) struct DelegatedField {
    wrapped: DateTimeField,
    ty: DateTimeFieldType,
    range: Option<DurationField>,
}

impl DelegatedField {
    pub(crate) fn new(wrapped: DateTimeField, range: DurationField, ty: DateTimeFieldType) -> Self {
        Self {
            wrapped,
            ty,
            range: Some(range),
        }
    }
}

impl FieldStrategy for DelegatedField {
    fn field_type(&self) -> DateTimeFieldType {
        self.ty
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        self.wrapped.get(instant)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.wrapped.set(instant, value)
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

    fn duration(&self) -> Unit {
        Unit::Duration(self.wrapped.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.range.clone()
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

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        self.wrapped.canonical_text(value)
    }

    forward_to_wrapped!();
}

/// The ISO year of era: the absolute value of the proleptic year, so that
/// both 1 BCE and 1 CE read as 1 and year zero reads as 0.
#[derive(Debug)]
pub(crate) struct IsoYearOfEraField {
    wrapped: DateTimeField,
    eras: DurationField,
}

impl IsoYearOfEraField {
    pub(crate) fn new(year: DateTimeField, eras: DurationField) -> Self {
        Self {
            wrapped: year,
            eras,
        }
    }
}

impl FieldStrategy for IsoYearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YearOfEra
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        Ok(self.wrapped.get(instant)?.abs())
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        verify_value_bounds(
            DateTimeFieldType::YearOfEra,
            i64::from(value),
            0,
            i64::from(self.maximum()),
        )?;
        let value = if self.wrapped.get(instant)? < 0 {
            -value
        } else {
            value
        };
        self.wrapped.set(instant, value)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.wrapped.add(instant, value)
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        self.wrapped.add_long(instant, value)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        self.wrapped.difference_long(minuend, subtrahend)
    }

    fn duration(&self) -> Unit {
        Unit::Duration(self.wrapped.duration_field())
    }

    fn range_duration(&self) -> Option<DurationField> {
        Some(self.eras.clone())
    }

    fn minimum(&self) -> i32 {
        0
    }

    fn maximum(&self) -> i32 {
        self.wrapped.maximum_value()
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> CalendarResult<i64> {
        self.wrapped.remainder(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        calendar::BasicCalendar,
        fields::{PreciseField, YearField},
        types::DurationFieldType,
        MS_PER_DAY, MS_PER_HOUR,
    };

    fn year(cal: BasicCalendar) -> DateTimeField {
        YearField::new(cal, DurationField::precise(DurationFieldType::Days, MS_PER_DAY)).into()
    }

    #[test]
    fn skip_moves_year_zero_to_minus_one() {
        let cal = BasicCalendar::julian(4).unwrap();
        let skip: DateTimeField = SkipField::new(year(cal)).into();

        let proleptic_zero = cal.year_millis(0);
        assert_eq!(skip.get(proleptic_zero), Ok(-1));
        assert_eq!(skip.get(cal.year_millis(1)), Ok(1));
        assert_eq!(skip.set(0, -1), Ok(cal.set_year(0, 0)));
        let err = skip.set(0, 0).unwrap_err();
        assert_eq!(err.rejected_value(), Some(0));
    }

    #[test]
    fn century_and_year_of_century() {
        let cal = BasicCalendar::gregorian(4).unwrap();
        let year = year(cal);
        let divided = DividedField::new(year.clone(), None, DateTimeFieldType::CenturyOfEra, 100);
        let remainder = RemainderField::from_divided(&divided, DateTimeFieldType::YearOfCentury);

        let instant = cal.year_month_day_millis(1987, 6, 5);
        assert_eq!(divided.get(instant), Ok(19));
        assert_eq!(remainder.get(instant), Ok(87));
        assert_eq!(
            divided.set(instant, 20),
            Ok(cal.year_month_day_millis(2087, 6, 5))
        );
        assert_eq!(
            remainder.set(instant, 3),
            Ok(cal.year_month_day_millis(1903, 6, 5))
        );
        assert_eq!(divided.round_floor(instant), Ok(cal.year_millis(1900)));
        assert_eq!(divided.add(instant, 1), Ok(cal.year_month_day_millis(2087, 6, 5)));
    }

    #[test]
    fn clock_hour_reads_twenty_four() {
        let hour_of_day: DateTimeField = PreciseField::new(
            DateTimeFieldType::HourOfDay,
            DurationField::precise(DurationFieldType::Hours, MS_PER_HOUR),
            DurationField::precise(DurationFieldType::Days, MS_PER_DAY),
        )
        .into();
        let clock = ZeroIsMaxField::new(hour_of_day, DateTimeFieldType::ClockhourOfDay);
        assert_eq!(clock.get(0), Ok(24));
        assert_eq!(clock.get(MS_PER_HOUR), Ok(1));
        assert_eq!(clock.set(MS_PER_HOUR, 24), Ok(0));
        assert_eq!(clock.minimum(), 1);
        assert_eq!(clock.maximum(), 24);
    }

    #[test]
    fn offset_checks_result_bounds() {
        let cal = BasicCalendar::gregorian(4).unwrap();
        let offset = OffsetField::new(year(cal), 543);
        assert_eq!(offset.get(0), Ok(2513));
        assert_eq!(offset.set(0, 2543), Ok(cal.set_year(0, 2000)));
        assert!(offset.set(0, i32::MIN).is_err());
    }

    #[test]
    fn iso_year_of_era_is_absolute() {
        let cal = BasicCalendar::gregorian(4).unwrap();
        let eras = DurationField::unsupported(DurationFieldType::Eras);
        let field = IsoYearOfEraField::new(year(cal), eras);
        let bce = cal.year_month_day_millis(-5, 1, 1);
        assert_eq!(field.get(bce), Ok(5));
        assert_eq!(field.set(bce, 7), Ok(cal.year_month_day_millis(-7, 1, 1)));
    }
}
