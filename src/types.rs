//! Identifiers for duration units and date-time fields.

use core::fmt;
use core::str::FromStr;

use crate::{error::ErrorMessage, CalendarError};

/// A unit of calendrical duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationFieldType {
    Eras,
    Centuries,
    Weekyears,
    Years,
    Months,
    Weeks,
    Days,
    Halfdays,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl DurationFieldType {
    /// All duration types, largest first.
    pub const ALL: [Self; 12] = [
        Self::Eras,
        Self::Centuries,
        Self::Weekyears,
        Self::Years,
        Self::Months,
        Self::Weeks,
        Self::Days,
        Self::Halfdays,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Millis,
    ];

    /// Returns the canonical name of this unit.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eras => "eras",
            Self::Centuries => "centuries",
            Self::Weekyears => "weekyears",
            Self::Years => "years",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Halfdays => "halfdays",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Millis => "millis",
        }
    }
}

impl fmt::Display for DurationFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A calendrical field of a date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateTimeFieldType {
    Era,
    YearOfEra,
    CenturyOfEra,
    YearOfCentury,
    Year,
    DayOfYear,
    MonthOfYear,
    DayOfMonth,
    WeekyearOfCentury,
    Weekyear,
    WeekOfWeekyear,
    DayOfWeek,
    HalfdayOfDay,
    HourOfHalfday,
    ClockhourOfHalfday,
    ClockhourOfDay,
    HourOfDay,
    MinuteOfDay,
    MinuteOfHour,
    SecondOfDay,
    SecondOfMinute,
    MillisOfDay,
    MillisOfSecond,
}

impl DateTimeFieldType {
    /// All field types in declaration order.
    pub const ALL: [Self; 23] = [
        Self::Era,
        Self::YearOfEra,
        Self::CenturyOfEra,
        Self::YearOfCentury,
        Self::Year,
        Self::DayOfYear,
        Self::MonthOfYear,
        Self::DayOfMonth,
        Self::WeekyearOfCentury,
        Self::Weekyear,
        Self::WeekOfWeekyear,
        Self::DayOfWeek,
        Self::HalfdayOfDay,
        Self::HourOfHalfday,
        Self::ClockhourOfHalfday,
        Self::ClockhourOfDay,
        Self::HourOfDay,
        Self::MinuteOfDay,
        Self::MinuteOfHour,
        Self::SecondOfDay,
        Self::SecondOfMinute,
        Self::MillisOfDay,
        Self::MillisOfSecond,
    ];

    /// Returns the canonical name of this field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Era => "era",
            Self::YearOfEra => "yearOfEra",
            Self::CenturyOfEra => "centuryOfEra",
            Self::YearOfCentury => "yearOfCentury",
            Self::Year => "year",
            Self::DayOfYear => "dayOfYear",
            Self::MonthOfYear => "monthOfYear",
            Self::DayOfMonth => "dayOfMonth",
            Self::WeekyearOfCentury => "weekyearOfCentury",
            Self::Weekyear => "weekyear",
            Self::WeekOfWeekyear => "weekOfWeekyear",
            Self::DayOfWeek => "dayOfWeek",
            Self::HalfdayOfDay => "halfdayOfDay",
            Self::HourOfHalfday => "hourOfHalfday",
            Self::ClockhourOfHalfday => "clockhourOfHalfday",
            Self::ClockhourOfDay => "clockhourOfDay",
            Self::HourOfDay => "hourOfDay",
            Self::MinuteOfDay => "minuteOfDay",
            Self::MinuteOfHour => "minuteOfHour",
            Self::SecondOfDay => "secondOfDay",
            Self::SecondOfMinute => "secondOfMinute",
            Self::MillisOfDay => "millisOfDay",
            Self::MillisOfSecond => "millisOfSecond",
        }
    }

    /// The unit in which this field counts.
    #[must_use]
    pub const fn duration_type(self) -> DurationFieldType {
        match self {
            Self::Era => DurationFieldType::Eras,
            Self::YearOfEra | Self::YearOfCentury | Self::Year => DurationFieldType::Years,
            Self::CenturyOfEra => DurationFieldType::Centuries,
            Self::DayOfYear | Self::DayOfMonth | Self::DayOfWeek => DurationFieldType::Days,
            Self::MonthOfYear => DurationFieldType::Months,
            Self::WeekyearOfCentury | Self::Weekyear => DurationFieldType::Weekyears,
            Self::WeekOfWeekyear => DurationFieldType::Weeks,
            Self::HalfdayOfDay => DurationFieldType::Halfdays,
            Self::HourOfHalfday
            | Self::ClockhourOfHalfday
            | Self::ClockhourOfDay
            | Self::HourOfDay => DurationFieldType::Hours,
            Self::MinuteOfDay | Self::MinuteOfHour => DurationFieldType::Minutes,
            Self::SecondOfDay | Self::SecondOfMinute => DurationFieldType::Seconds,
            Self::MillisOfDay | Self::MillisOfSecond => DurationFieldType::Millis,
        }
    }

    /// The unit one level up, or `None` for unbounded fields.
    #[must_use]
    pub const fn range_type(self) -> Option<DurationFieldType> {
        match self {
            Self::Era | Self::Year | Self::Weekyear => None,
            Self::YearOfEra | Self::CenturyOfEra => Some(DurationFieldType::Eras),
            Self::YearOfCentury | Self::WeekyearOfCentury => Some(DurationFieldType::Centuries),
            Self::DayOfYear | Self::MonthOfYear => Some(DurationFieldType::Years),
            Self::DayOfMonth => Some(DurationFieldType::Months),
            Self::WeekOfWeekyear => Some(DurationFieldType::Weekyears),
            Self::DayOfWeek => Some(DurationFieldType::Weeks),
            Self::HalfdayOfDay
            | Self::HourOfDay
            | Self::ClockhourOfDay
            | Self::MinuteOfDay
            | Self::SecondOfDay
            | Self::MillisOfDay => Some(DurationFieldType::Days),
            Self::HourOfHalfday | Self::ClockhourOfHalfday => Some(DurationFieldType::Halfdays),
            Self::MinuteOfHour => Some(DurationFieldType::Hours),
            Self::SecondOfMinute => Some(DurationFieldType::Minutes),
            Self::MillisOfSecond => Some(DurationFieldType::Seconds),
        }
    }
}

impl fmt::Display for DateTimeFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DateTimeFieldType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
            .ok_or(
                CalendarError::argument()
                    .with_enum(ErrorMessage::UnsupportedField),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_month_is_ranged_by_months() {
        let ty = DateTimeFieldType::DayOfMonth;
        assert_eq!(ty.duration_type(), DurationFieldType::Days);
        assert_eq!(ty.range_type(), Some(DurationFieldType::Months));
        assert_eq!(DateTimeFieldType::Weekyear.range_type(), None);
    }

    #[test]
    fn parse_field_names() {
        assert_eq!(
            "weekOfWeekyear".parse::<DateTimeFieldType>(),
            Ok(DateTimeFieldType::WeekOfWeekyear)
        );
        assert_eq!(
            "CLOCKHOUROFDAY".parse::<DateTimeFieldType>(),
            Ok(DateTimeFieldType::ClockhourOfDay)
        );
        assert!("fortnight".parse::<DateTimeFieldType>().is_err());
    }
}
