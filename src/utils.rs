//! Checked integer helpers shared by the field arithmetic.

use num_traits::ToPrimitive;

use crate::{
    error::ErrorMessage, types::DateTimeFieldType, CalendarError, CalendarResult, MS_PER_DAY,
};

#[inline]
pub(crate) fn safe_add(a: i64, b: i64) -> CalendarResult<i64> {
    a.checked_add(b)
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::AdditionOverflow))
}

#[inline]
pub(crate) fn safe_subtract(a: i64, b: i64) -> CalendarResult<i64> {
    a.checked_sub(b)
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::SubtractionOverflow))
}

#[inline]
pub(crate) fn safe_multiply(a: i64, b: i64) -> CalendarResult<i64> {
    a.checked_mul(b)
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::MultiplicationOverflow))
}

#[inline]
pub(crate) fn safe_negate(value: i64) -> CalendarResult<i64> {
    value
        .checked_neg()
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::NegationOverflow))
}

#[inline]
pub(crate) fn safe_add_i32(a: i32, b: i32) -> CalendarResult<i32> {
    a.checked_add(b)
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::AdditionOverflow))
}

/// Narrows a 64-bit value to an `i32`, failing on overflow.
#[inline]
pub(crate) fn safe_to_int<T: ToPrimitive>(value: T) -> CalendarResult<i32> {
    value
        .to_i32()
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::IntegerOverflow))
}

/// Verifies that `value` is within `lower..=upper` for `field`.
#[inline]
pub(crate) fn verify_value_bounds(
    field: DateTimeFieldType,
    value: i64,
    lower: i64,
    upper: i64,
) -> CalendarResult<()> {
    if value < lower || value > upper {
        return Err(CalendarError::out_of_bounds(field, value, lower, upper));
    }
    Ok(())
}

/// Adds `amount` to `current` and wraps the result into `min..=max`.
pub(crate) fn wrapped_value(current: i32, amount: i32, min: i32, max: i32) -> CalendarResult<i32> {
    if min >= max {
        return Err(CalendarError::argument().with_message("Minimum must be less than maximum."));
    }
    let range = i64::from(max) - i64::from(min) + 1;
    let value = i64::from(current) + i64::from(amount) - i64::from(min);
    safe_to_int(value.rem_euclid(range) + i64::from(min))
}

/// Returns the millisecond of the day for `instant`.
#[inline]
pub(crate) fn millis_of_day(instant: i64) -> i32 {
    instant.rem_euclid(MS_PER_DAY) as i32
}

/// `floor(instant / unit)` for a positive unit.
#[inline]
pub(crate) fn floor_div(value: i64, unit: i64) -> i64 {
    value.div_euclid(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_stays_in_range() {
        assert_eq!(wrapped_value(12, 1, 1, 12), Ok(1));
        assert_eq!(wrapped_value(1, -1, 1, 12), Ok(12));
        assert_eq!(wrapped_value(5, -30, 1, 12), Ok(11));
        assert_eq!(wrapped_value(0, 25, 0, 23), Ok(1));
        assert!(wrapped_value(3, 1, 5, 5).is_err());
    }

    #[test]
    fn checked_ops_report_overflow() {
        use crate::error::ErrorKind;
        assert_eq!(
            safe_add(i64::MAX, 1).unwrap_err().kind(),
            ErrorKind::ArithmeticOverflow
        );
        assert_eq!(
            safe_negate(i64::MIN).unwrap_err().kind(),
            ErrorKind::ArithmeticOverflow
        );
        assert_eq!(safe_to_int(i64::from(i32::MAX)), Ok(i32::MAX));
        assert!(safe_to_int(i64::from(i32::MAX) + 1).is_err());
    }

    #[test]
    fn negative_millis_of_day() {
        assert_eq!(millis_of_day(-1), (MS_PER_DAY - 1) as i32);
        assert_eq!(millis_of_day(MS_PER_DAY + 5), 5);
    }
}
