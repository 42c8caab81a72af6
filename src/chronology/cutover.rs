//! The Julian/Gregorian cutover.

use std::sync::Arc;

use writeable::Writeable;

use crate::{
    error::ErrorMessage,
    fields::{CutoverField, DateTimeField},
    types::DateTimeFieldType,
    CalendarError, CalendarResult,
};

use super::{assemble::Fields, Chronology};

/// The two UTC chronologies blended at a cutover instant, and the gap
/// between them there.
#[derive(Debug)]
pub(crate) struct CutoverContext {
    julian: Chronology,
    gregorian: Chronology,
    cutover: i64,
    gap: i64,
}

impl CutoverContext {
    pub(crate) fn try_new(julian: Chronology, gregorian: Chronology, cutover: i64) -> CalendarResult<Self> {
        if julian.min_days_in_first_week() != gregorian.min_days_in_first_week() {
            return Err(CalendarError::argument().with_enum(ErrorMessage::MinDaysMismatch));
        }
        if gregorian.field(DateTimeFieldType::Year).get(cutover)? <= 0 {
            return Err(CalendarError::argument().with_enum(ErrorMessage::CutoverTooEarly));
        }
        let mut context = Self {
            julian,
            gregorian,
            cutover,
            gap: 0,
        };
        context.gap = cutover - context.julian_to_gregorian(cutover, false)?;
        Ok(context)
    }

    #[inline]
    pub(crate) fn cutover(&self) -> i64 {
        self.cutover
    }

    /// The Gregorian instant of the cutover less its Julian reading
    /// converted to Gregorian.
    #[inline]
    pub(crate) fn gap(&self) -> i64 {
        self.gap
    }

    pub(crate) fn gregorian_field(&self, ty: DateTimeFieldType) -> DateTimeField {
        self.gregorian.field(ty)
    }

    pub(crate) fn julian_to_gregorian(&self, instant: i64, by_weekyear: bool) -> CalendarResult<i64> {
        convert(instant, &self.julian, &self.gregorian, by_weekyear)
    }

    pub(crate) fn gregorian_to_julian(&self, instant: i64, by_weekyear: bool) -> CalendarResult<i64> {
        convert(instant, &self.gregorian, &self.julian, by_weekyear)
    }

    /// Resolves a date, preferring the Gregorian reading. Dates falling in
    /// the gap do not exist.
    pub(crate) fn date_time_millis(
        &self,
        year: i32,
        month: i32,
        day: i32,
        millis_of_day: i32,
    ) -> CalendarResult<i64> {
        self.resolve(month, day, |chrono, day| {
            chrono.get_date_time_millis(year, month, day, millis_of_day)
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn date_time_millis_hms(
        &self,
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millis: i32,
    ) -> CalendarResult<i64> {
        self.resolve(month, day, |chrono, day| {
            chrono.get_date_time_millis_hms(year, month, day, hour, minute, second, millis)
        })
    }

    fn resolve(
        &self,
        month: i32,
        day: i32,
        millis: impl Fn(&Chronology, i32) -> CalendarResult<i64>,
    ) -> CalendarResult<i64> {
        let instant = match millis(&self.gregorian, day) {
            Ok(instant) => instant,
            // February 29th of a Julian leap year that is not a Gregorian one.
            Err(err) if month == 2 && day == 29 => {
                if millis(&self.gregorian, 28)? >= self.cutover {
                    return Err(err);
                }
                return self.julian_only(millis(&self.julian, day)?);
            }
            Err(err) => return Err(err),
        };
        if instant >= self.cutover {
            return Ok(instant);
        }
        self.julian_only(millis(&self.julian, day)?)
    }

    fn julian_only(&self, instant: i64) -> CalendarResult<i64> {
        if instant >= self.cutover {
            return Err(CalendarError::argument().with_enum(ErrorMessage::DateDoesNotExist));
        }
        Ok(instant)
    }
}

fn convert(instant: i64, from: &Chronology, to: &Chronology, by_weekyear: bool) -> CalendarResult<i64> {
    use DateTimeFieldType as F;

    let millis_of_day = from.field(F::MillisOfDay).get(instant)?;
    if by_weekyear {
        let mut converted = to.field(F::Weekyear).set(0, from.field(F::Weekyear).get(instant)?)?;
        converted = to
            .field(F::WeekOfWeekyear)
            .set(converted, from.field(F::WeekOfWeekyear).get(instant)?)?;
        converted = to
            .field(F::DayOfWeek)
            .set(converted, from.field(F::DayOfWeek).get(instant)?)?;
        return to.field(F::MillisOfDay).set(converted, millis_of_day);
    }
    to.get_date_time_millis(
        from.field(F::Year).get(instant)?,
        from.field(F::MonthOfYear).get(instant)?,
        from.field(F::DayOfMonth).get(instant)?,
        millis_of_day,
    )
}

/// Starts from the Gregorian fields and blends in the Julian ones wherever
/// the cutover changes the reading.
pub(crate) fn gj(context: &Arc<CutoverContext>) -> CalendarResult<Fields> {
    use DateTimeFieldType as F;

    let julian = &context.julian;
    let gregorian = &context.gregorian;
    let cutover = context.cutover;
    let mut fields = gregorian.inner_fields().clone();

    let blend = |ty: DateTimeFieldType| {
        CutoverField::new(julian.field(ty), gregorian.field(ty), context.clone(), cutover)
    };
    let imprecise = |ty: DateTimeFieldType, duration| {
        CutoverField::imprecise(julian.field(ty), gregorian.field(ty), context.clone(), duration)
    };

    // Time of day reads the same on both sides unless the cutover falls
    // within a day.
    if gregorian.field(F::MillisOfDay).get(cutover)? != 0 {
        for ty in [
            F::MillisOfSecond,
            F::MillisOfDay,
            F::SecondOfMinute,
            F::SecondOfDay,
            F::MinuteOfHour,
            F::MinuteOfDay,
            F::HourOfDay,
            F::HourOfHalfday,
            F::ClockhourOfDay,
            F::ClockhourOfHalfday,
            F::HalfdayOfDay,
        ] {
            fields.set(blend(ty));
        }
    }

    fields.set(blend(F::Era));

    let year: DateTimeField = imprecise(F::Year, None).into();
    let years = year.duration_field();
    fields.set(year);
    fields.set(imprecise(F::YearOfEra, Some(years.clone())));
    fields.set(imprecise(F::YearOfCentury, Some(years.clone())));
    fields.set_duration(years.clone());

    let century_of_era: DateTimeField = imprecise(F::CenturyOfEra, None).into();
    fields.set_duration(century_of_era.duration_field());
    fields.set(century_of_era);

    let month_of_year: DateTimeField = imprecise(F::MonthOfYear, None).into();
    let months = month_of_year.duration_field();
    fields.set(month_of_year);
    fields.set_duration(months.clone());

    let weekyear: DateTimeField = imprecise(F::Weekyear, None).by_weekyear().into();
    let weekyears = weekyear.duration_field();
    fields.set(weekyear);
    fields.set(imprecise(F::WeekyearOfCentury, Some(weekyears.clone())));
    fields.set_duration(weekyears.clone());

    // Day of year and week of weekyear switch at the first year or weekyear
    // wholly in the Gregorian calendar.
    let year_ceiling = gregorian.field(F::Year).round_ceiling(cutover)?;
    fields.set(
        CutoverField::new(
            julian.field(F::DayOfYear),
            gregorian.field(F::DayOfYear),
            context.clone(),
            year_ceiling,
        )
        .with_range(years),
    );
    let weekyear_ceiling = gregorian.field(F::Weekyear).round_ceiling(cutover)?;
    fields.set(
        CutoverField::new(
            julian.field(F::WeekOfWeekyear),
            gregorian.field(F::WeekOfWeekyear),
            context.clone(),
            weekyear_ceiling,
        )
        .by_weekyear()
        .with_range(weekyears),
    );

    fields.set(blend(F::DayOfMonth).with_range(months));
    Ok(fields)
}

/// The cutover as an ISO date, with the time when it is not at midnight.
pub(crate) struct CutoverDate<'a> {
    pub(crate) chronology: &'a Chronology,
    pub(crate) instant: i64,
}

impl Writeable for CutoverDate<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        use DateTimeFieldType as F;

        let value = |ty: DateTimeFieldType| {
            self.chronology
                .field(ty)
                .get(self.instant)
                .map_err(|_| core::fmt::Error)
        };
        let year = value(F::Year)?;
        if year < 0 {
            sink.write_char('-')?;
        }
        write!(sink, "{:04}-{:02}-{:02}", year.unsigned_abs(), value(F::MonthOfYear)?, value(F::DayOfMonth)?)?;
        let millis_of_day = value(F::MillisOfDay)?;
        if millis_of_day != 0 {
            write!(
                sink,
                "T{:02}:{:02}:{:02}.{:03}Z",
                value(F::HourOfDay)?,
                value(F::MinuteOfHour)?,
                value(F::SecondOfMinute)?,
                value(F::MillisOfSecond)?
            )?;
        }
        Ok(())
    }
}
