//! The `chronology_rs` crate is a calendar arithmetic engine over
//! millisecond instants.
//!
//! An instant is a signed count of milliseconds from 1970-01-01T00:00:00Z.
//! A [`Chronology`] is a named set of calendar rules (ISO, Gregorian,
//! Julian, the Julian/Gregorian cutover, Buddhist, Coptic, Ethiopic and
//! tabular Islamic) that hands out [`DateTimeField`]s and
//! [`DurationField`]s. All field values are derived from the instant on
//! demand.
//!
//! ```rust
//! use chronology_rs::{Chronology, DateTimeFieldType};
//!
//! let iso = Chronology::iso_utc();
//! let instant = iso.get_date_time_millis(2013, 7, 31, 0).unwrap();
//!
//! // Month arithmetic clamps the day of month to the end of the target month.
//! let month = iso.field(DateTimeFieldType::MonthOfYear);
//! let earlier = month.add(instant, -1).unwrap();
//! assert_eq!(earlier, iso.get_date_time_millis(2013, 6, 30, 0).unwrap());
//!
//! // Chronologies are canonical instances.
//! assert_eq!(Chronology::iso_utc(), iso);
//! ```
//!
//! Chronologies with a time zone other than UTC decorate the UTC chronology
//! so that every field converts between UTC and local time before
//! delegating. See [`DateTimeZone`] for the zone model.
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/boa-dev/boa/main/assets/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/boa-dev/boa/main/assets/logo.svg"
)]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in benchmarks.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // Field arithmetic narrows between i64 and i32 after explicit range checks.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

pub mod calendar;
pub mod chronology;
pub mod error;
pub mod fields;
pub mod partial;
pub mod text;
pub mod types;
pub mod zone;

#[cfg(feature = "sys")]
pub mod sys;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::CalendarError;

/// The `chronology_rs` result type
pub type CalendarResult<T> = Result<T, CalendarError>;

pub use crate::{
    calendar::LeapYearPattern,
    chronology::{Chronology, ChronologyKind, ChronologyOptions},
    fields::{DateTimeField, DurationField},
    partial::Partial,
    text::FieldTextProvider,
    types::{DateTimeFieldType, DurationFieldType},
    zone::{DateTimeZone, ZoneBuilder, ZoneProvider},
};

/// A library specific trait for unwrapping assertions.
pub(crate) trait CalendarUnwrap {
    type Output;

    /// `chronology_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but returns an error during runtime.
    fn calendar_unwrap(self) -> CalendarResult<Self::Output>;
}

impl<T> CalendarUnwrap for Option<T> {
    type Output = T;

    fn calendar_unwrap(self) -> CalendarResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(CalendarError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! calendar_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::CalendarError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::CalendarError::assert());
        }
    };
}

// Relevant numeric constants
/// Milliseconds per second constant.
pub const MS_PER_SECOND: i64 = 1_000;
/// Milliseconds per minute constant.
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
/// Milliseconds per hour constant.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
/// Milliseconds per week constant.
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// The default Julian to Gregorian cutover, 1582-10-15T00:00:00Z.
pub const DEFAULT_CUTOVER_MILLIS: i64 = -12_219_292_800_000;
