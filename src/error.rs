//! This module implements `CalendarError`.

use core::fmt;

use crate::types::{DateTimeFieldType, DurationFieldType};

/// `CalendarError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field value was outside of its legal range, or did not read back
    /// after being set.
    #[default]
    IllegalFieldValue,
    /// Malformed configuration or arguments.
    IllegalArgument,
    /// A millisecond computation exceeded the 64-bit range.
    ArithmeticOverflow,
    /// A local date-time that does not exist in a time zone.
    IllegalInstant,
    /// The field or duration is not supported by the chronology.
    Unsupported,
    /// Assert
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalFieldValue => "IllegalFieldValue",
            Self::IllegalArgument => "IllegalArgument",
            Self::ArithmeticOverflow => "ArithmeticOverflow",
            Self::IllegalInstant => "IllegalInstant",
            Self::Unsupported => "Unsupported",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// Structured information attached to an error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetail {
    #[default]
    None,
    /// The rejected field value and, when known, its legal bounds.
    FieldValue {
        field: DateTimeFieldType,
        value: i64,
        lower: Option<i64>,
        upper: Option<i64>,
    },
    /// The local instant that fell into a zone offset gap.
    LocalInstant {
        field: Option<DateTimeFieldType>,
        local_millis: i64,
    },
    /// The unsupported duration unit.
    Duration(DurationFieldType),
}

/// The error type for `chronology_rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarError {
    kind: ErrorKind,
    msg: ErrorMessage,
    detail: ErrorDetail,
}

impl CalendarError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: ErrorMessage::None,
            detail: ErrorDetail::None,
        }
    }

    /// Create an illegal field value error.
    #[inline]
    #[must_use]
    pub const fn field_value() -> Self {
        Self::new(ErrorKind::IllegalFieldValue)
    }

    /// Create an illegal argument error.
    #[inline]
    #[must_use]
    pub const fn argument() -> Self {
        Self::new(ErrorKind::IllegalArgument)
    }

    /// Create an arithmetic overflow error.
    #[inline]
    #[must_use]
    pub const fn overflow() -> Self {
        Self::new(ErrorKind::ArithmeticOverflow)
    }

    /// Create an illegal instant error.
    #[inline]
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(ErrorKind::IllegalInstant)
    }

    /// Create an unsupported operation error.
    #[inline]
    #[must_use]
    pub const fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    #[cfg_attr(debug_assertions, track_caller)]
    pub(crate) const fn assert() -> Self {
        #[cfg(not(debug_assertions))]
        {
            Self::new(ErrorKind::Assert)
        }
        #[cfg(debug_assertions)]
        Self {
            kind: ErrorKind::Assert,
            msg: ErrorMessage::String(core::panic::Location::caller().file()),
            detail: ErrorDetail::None,
        }
    }

    /// Builds the error for a value outside of `lower..=upper`.
    #[inline]
    #[must_use]
    pub(crate) fn out_of_bounds(field: DateTimeFieldType, value: i64, lower: i64, upper: i64) -> Self {
        Self::field_value()
            .with_enum(ErrorMessage::ValueOutOfBounds)
            .with_detail(ErrorDetail::FieldValue {
                field,
                value,
                lower: Some(lower),
                upper: Some(upper),
            })
    }

    /// Builds the error for a value that did not survive a `set`.
    #[inline]
    #[must_use]
    pub(crate) fn rejected(field: DateTimeFieldType, value: i64) -> Self {
        Self::field_value()
            .with_enum(ErrorMessage::ValueRejected)
            .with_detail(ErrorDetail::FieldValue {
                field,
                value,
                lower: None,
                upper: None,
            })
    }

    /// Builds the error for a local instant inside an offset transition gap.
    #[inline]
    #[must_use]
    pub(crate) fn gap(field: Option<DateTimeFieldType>, local_millis: i64) -> Self {
        Self::instant()
            .with_enum(ErrorMessage::LocalTimeInGap)
            .with_detail(ErrorDetail::LocalInstant {
                field,
                local_millis,
            })
    }

    /// Builds the error for an unsupported duration unit.
    #[inline]
    #[must_use]
    pub(crate) fn unsupported_duration(unit: DurationFieldType) -> Self {
        Self::unsupported()
            .with_enum(ErrorMessage::UnsupportedDuration)
            .with_detail(ErrorDetail::Duration(unit))
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message(mut self, msg: &'static str) -> Self {
        self.msg = ErrorMessage::String(msg);
        self
    }

    /// Add a message enum to the error.
    #[inline]
    #[must_use]
    pub(crate) fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = msg;
        self
    }

    #[inline]
    #[must_use]
    pub(crate) fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the structured detail of this error.
    #[inline]
    #[must_use]
    pub const fn detail(&self) -> ErrorDetail {
        self.detail
    }

    /// Returns the field this error concerns, if any.
    #[must_use]
    pub const fn field(&self) -> Option<DateTimeFieldType> {
        match self.detail {
            ErrorDetail::FieldValue { field, .. } => Some(field),
            ErrorDetail::LocalInstant { field, .. } => field,
            _ => None,
        }
    }

    /// Returns the rejected value, if any.
    #[must_use]
    pub const fn rejected_value(&self) -> Option<i64> {
        match self.detail {
            ErrorDetail::FieldValue { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> &'static str {
        self.msg.to_string()
    }
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.to_string();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        match self.detail {
            ErrorDetail::FieldValue {
                field,
                value,
                lower: Some(lower),
                upper: Some(upper),
            } => write!(f, " (value {value} for {field} must be in the range [{lower},{upper}])"),
            ErrorDetail::FieldValue { field, value, .. } => {
                write!(f, " (value {value} for {field} is not supported)")
            }
            ErrorDetail::LocalInstant { local_millis, .. } => {
                write!(f, " (local instant {local_millis})")
            }
            ErrorDetail::Duration(unit) => write!(f, " ({unit})"),
            ErrorDetail::None => Ok(()),
        }
    }
}

impl core::error::Error for CalendarError {}

/// The error message
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum ErrorMessage {
    // Field values
    ValueOutOfBounds,
    ValueRejected,
    YearZero,

    // Arithmetic
    AdditionOverflow,
    SubtractionOverflow,
    MultiplicationOverflow,
    NegationOverflow,
    IntegerOverflow,
    OffsetAdditionOverflow,
    OffsetSubtractionOverflow,
    InstantOutOfRange,

    // Configuration
    MinDaysInFirstWeekInvalid,
    MinDaysMismatch,
    CutoverTooEarly,
    DateDoesNotExist,
    OffsetOutOfRange,
    ZoneIdInvalid,
    ChronologyNameInvalid,

    // Zones
    LocalTimeInGap,
    TransitionsUnordered,
    NameKeyInvalid,
    CacheLockPoisoned,

    // Unsupported
    UnsupportedDuration,
    UnsupportedField,

    // Typed
    None,
    String(&'static str),
}

impl ErrorMessage {
    pub fn to_string(self) -> &'static str {
        match self {
            Self::ValueOutOfBounds => "Value is out of bounds.",
            Self::ValueRejected => "Value does not exist at this instant.",
            Self::YearZero => "There is no year zero.",
            Self::AdditionOverflow => "The calculation caused an overflow during addition.",
            Self::SubtractionOverflow => "The calculation caused an overflow during subtraction.",
            Self::MultiplicationOverflow => {
                "The calculation caused an overflow during multiplication."
            }
            Self::NegationOverflow => "The minimum value cannot be negated.",
            Self::IntegerOverflow => "Value cannot fit in an i32.",
            Self::OffsetAdditionOverflow => "Adding time zone offset caused overflow.",
            Self::OffsetSubtractionOverflow => "Subtracting time zone offset caused overflow.",
            Self::InstantOutOfRange => "Instant is outside the range of the calendar.",
            Self::MinDaysInFirstWeekInvalid => "Invalid min days in first week.",
            Self::MinDaysMismatch => {
                "Blended chronologies must agree on the minimum days in the first week."
            }
            Self::CutoverTooEarly => "Cutover too early. Must be on or after 0001-01-01.",
            Self::DateDoesNotExist => "Specified date does not exist.",
            Self::OffsetOutOfRange => "Offset is out of range.",
            Self::ZoneIdInvalid => "The time zone id is not recognised.",
            Self::ChronologyNameInvalid => "The chronology name is not recognised.",
            Self::LocalTimeInGap => "Illegal instant due to time zone offset transition.",
            Self::TransitionsUnordered => "Zone transitions must be ascending and distinct.",
            Self::NameKeyInvalid => "Zone name keys must be at most 16 ASCII characters.",
            Self::CacheLockPoisoned => "A cache lock was poisoned.",
            Self::UnsupportedDuration => "Duration field is not supported.",
            Self::UnsupportedField => "Field is not supported.",
            Self::None => "",
            Self::String(s) => s,
        }
    }
}
