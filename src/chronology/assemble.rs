//! Field tables and the assembly of each calendar system's fields.

use crate::{
    calendar::BasicCalendar,
    fields::{
        DateTimeField, DayOfMonthField, DayOfWeekField, DayOfYearField, DelegatedField,
        DividedField, DurationField, EraField, IsoYearOfEraField, LenientField, MonthOfYearField,
        OffsetField, PreciseField, RemainderField, SingleEraField, SkipField,
        WeekOfWeekyearField, WeekyearField, YearField, YearOfEraField, ZeroIsMaxField, ZonedField,
    },
    types::{DateTimeFieldType, DurationFieldType},
    zone::DateTimeZone,
    MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK,
};

const BUDDHIST_OFFSET: i32 = 543;

/// Every duration and date-time field of a chronology, indexed by type.
#[derive(Debug, Clone)]
pub(crate) struct Fields {
    durations: Vec<DurationField>,
    fields: Vec<DateTimeField>,
}

impl Fields {
    #[inline]
    pub(crate) fn duration(&self, ty: DurationFieldType) -> &DurationField {
        &self.durations[ty as usize]
    }

    #[inline]
    pub(crate) fn field(&self, ty: DateTimeFieldType) -> &DateTimeField {
        &self.fields[ty as usize]
    }

    /// Replaces the field of the same type.
    pub(crate) fn set(&mut self, field: impl Into<DateTimeField>) {
        let field = field.into();
        let index = field.field_type() as usize;
        self.fields[index] = field;
    }

    /// Replaces the duration of the same type.
    pub(crate) fn set_duration(&mut self, duration: DurationField) {
        let index = duration.duration_type() as usize;
        self.durations[index] = duration;
    }

    fn map(
        &self,
        duration: impl Fn(&DurationField) -> DurationField,
        field: impl Fn(&DateTimeField) -> DateTimeField,
    ) -> Self {
        Self {
            durations: self.durations.iter().map(duration).collect(),
            fields: self.fields.iter().map(field).collect(),
        }
    }
}

/// The fields shared by every calendar with a year, month and day
/// structure.
pub(crate) fn basic(cal: BasicCalendar) -> Fields {
    use DateTimeFieldType as F;
    use DurationFieldType as D;

    let millis = DurationField::millis();
    let seconds = DurationField::precise(D::Seconds, MS_PER_SECOND);
    let minutes = DurationField::precise(D::Minutes, MS_PER_MINUTE);
    let hours = DurationField::precise(D::Hours, MS_PER_HOUR);
    let halfdays = DurationField::precise(D::Halfdays, 12 * MS_PER_HOUR);
    let days = DurationField::precise(D::Days, MS_PER_DAY);
    let weeks = DurationField::precise(D::Weeks, MS_PER_WEEK);
    let eras = DurationField::unsupported(D::Eras);

    let millis_of_second = PreciseField::new(F::MillisOfSecond, millis.clone(), seconds.clone());
    let millis_of_day = PreciseField::new(F::MillisOfDay, millis, days.clone());
    let second_of_minute = PreciseField::new(F::SecondOfMinute, seconds.clone(), minutes.clone());
    let second_of_day = PreciseField::new(F::SecondOfDay, seconds.clone(), days.clone());
    let minute_of_hour = PreciseField::new(F::MinuteOfHour, minutes.clone(), hours.clone());
    let minute_of_day = PreciseField::new(F::MinuteOfDay, minutes.clone(), days.clone());
    let hour_of_day: DateTimeField =
        PreciseField::new(F::HourOfDay, hours.clone(), days.clone()).into();
    let hour_of_halfday: DateTimeField =
        PreciseField::new(F::HourOfHalfday, hours.clone(), halfdays.clone()).into();
    let clockhour_of_day = ZeroIsMaxField::new(hour_of_day.clone(), F::ClockhourOfDay);
    let clockhour_of_halfday = ZeroIsMaxField::new(hour_of_halfday.clone(), F::ClockhourOfHalfday);
    let halfday_of_day =
        PreciseField::new(F::HalfdayOfDay, halfdays.clone(), days.clone()).with_labels(&["AM", "PM"]);

    let year: DateTimeField = YearField::new(cal, days.clone()).into();
    let years = year.duration_field();
    let year_of_era: DateTimeField = YearOfEraField::new(year.clone(), cal).into();

    // One-based century and year of century.
    let century_of_era = DividedField::new(
        OffsetField::new(year_of_era.clone(), 99).into(),
        Some(eras.clone()),
        F::CenturyOfEra,
        100,
    );
    let year_of_century = OffsetField::with_type(
        RemainderField::from_divided(&century_of_era, F::YearOfCentury).into(),
        F::YearOfCentury,
        1,
    );
    let century_of_era: DateTimeField = century_of_era.into();
    let centuries = century_of_era.duration_field();

    let era = EraField::new(cal);
    let day_of_week = DayOfWeekField::new(cal, days.clone(), weeks.clone());
    let month_of_year: DateTimeField = MonthOfYearField::new(cal, years.clone(), days.clone()).into();
    let months = month_of_year.duration_field();
    let day_of_month = DayOfMonthField::new(cal, days.clone(), months.clone());
    let day_of_year = DayOfYearField::new(cal, days.clone(), years.clone());

    let weekyear: DateTimeField = WeekyearField::new(cal, weeks.clone()).into();
    let weekyears = weekyear.duration_field();
    let week_of_weekyear = WeekOfWeekyearField::new(cal, weeks.clone(), weekyears.clone());
    let weekyear_of_century = OffsetField::new(
        RemainderField::new(weekyear.clone(), centuries.clone(), F::WeekyearOfCentury, 100).into(),
        1,
    );

    // Declaration order of the type enums.
    Fields {
        durations: vec![
            eras,
            centuries,
            weekyears,
            years,
            months,
            weeks,
            days,
            halfdays,
            hours,
            minutes,
            seconds,
            DurationField::millis(),
        ],
        fields: vec![
            era.into(),
            year_of_era,
            century_of_era,
            year_of_century.into(),
            year,
            day_of_year.into(),
            month_of_year,
            day_of_month.into(),
            weekyear_of_century.into(),
            weekyear,
            week_of_weekyear.into(),
            day_of_week.into(),
            halfday_of_day.into(),
            hour_of_halfday,
            clockhour_of_halfday.into(),
            clockhour_of_day.into(),
            hour_of_day,
            minute_of_day.into(),
            minute_of_hour.into(),
            second_of_day.into(),
            second_of_minute.into(),
            millis_of_day.into(),
            millis_of_second.into(),
        ],
    }
}

/// ISO-8601: Gregorian with zero-based century and year of century.
pub(crate) fn iso() -> Fields {
    use DateTimeFieldType as F;

    let mut fields = basic(BasicCalendar::iso());
    let eras = fields.duration(DurationFieldType::Eras).clone();
    let year_of_era = IsoYearOfEraField::new(fields.field(F::Year).clone(), eras);
    let century_of_era = DividedField::new(year_of_era.into(), None, F::CenturyOfEra, 100);
    let year_of_century = RemainderField::from_divided(&century_of_era, F::YearOfCentury);
    let century_of_era: DateTimeField = century_of_era.into();
    let centuries = century_of_era.duration_field();
    let weekyear_of_century = RemainderField::new(
        fields.field(F::Weekyear).clone(),
        centuries.clone(),
        F::WeekyearOfCentury,
        100,
    );

    fields.set(century_of_era);
    fields.set(year_of_century);
    fields.set(weekyear_of_century);
    fields.set_duration(centuries);
    fields
}

/// Calendars without a year zero, where year -1 precedes year 1.
pub(crate) fn without_year_zero(cal: BasicCalendar) -> Fields {
    let mut fields = basic(cal);
    skip_year_zero(&mut fields);
    fields
}

fn skip_year_zero(fields: &mut Fields) {
    let year = SkipField::new(fields.field(DateTimeFieldType::Year).clone());
    let weekyear = SkipField::new(fields.field(DateTimeFieldType::Weekyear).clone());
    fields.set(year);
    fields.set(weekyear);
}

/// Coptic and Ethiopic: no year zero and a single era.
pub(crate) fn fixed_month(cal: BasicCalendar, era: &'static str) -> Fields {
    let mut fields = without_year_zero(cal);
    fields.set(SingleEraField::new(era));
    fields
}

/// Tabular Islamic: a single era counted from the Hijra.
pub(crate) fn islamic(cal: BasicCalendar) -> Fields {
    let mut fields = basic(cal);
    fields.set(SingleEraField::new("AH"));
    fields
}

/// The Buddhist era over the proleptic Gregorian calendar.
pub(crate) fn buddhist(gregorian: &Fields) -> Fields {
    use DateTimeFieldType as F;

    let mut fields = gregorian.clone();
    let eras = fields.duration(DurationFieldType::Eras).clone();

    let year: DateTimeField = OffsetField::new(fields.field(F::Year).clone(), BUDDHIST_OFFSET).into();
    let year_of_era: DateTimeField = DelegatedField::new(year.clone(), eras.clone(), F::YearOfEra).into();
    let weekyear: DateTimeField =
        OffsetField::new(fields.field(F::Weekyear).clone(), BUDDHIST_OFFSET).into();

    let century_of_era = DividedField::new(
        OffsetField::new(year_of_era.clone(), 99).into(),
        Some(eras),
        F::CenturyOfEra,
        100,
    );
    let year_of_century = OffsetField::with_type(
        RemainderField::from_divided(&century_of_era, F::YearOfCentury).into(),
        F::YearOfCentury,
        1,
    );
    let century_of_era: DateTimeField = century_of_era.into();
    let centuries = century_of_era.duration_field();
    let weekyear_of_century = OffsetField::new(
        RemainderField::new(weekyear.clone(), centuries.clone(), F::WeekyearOfCentury, 100).into(),
        1,
    );

    fields.set(year);
    fields.set(year_of_era);
    fields.set(weekyear);
    fields.set(century_of_era);
    fields.set(year_of_century);
    fields.set(weekyear_of_century);
    fields.set(SingleEraField::new("BE"));
    fields.set_duration(centuries);
    fields
}

/// Wraps every supported field and duration so that it works in the local
/// time of `zone`.
pub(crate) fn zoned(utc: &Fields, zone: &DateTimeZone) -> Fields {
    let zone_duration = |duration: &DurationField| zoned_duration(duration, zone);
    utc.map(zone_duration, |field| {
        if !field.is_supported() {
            return field.clone();
        }
        ZonedField::new(
            field.clone(),
            zone.clone(),
            zoned_duration(&field.duration_field(), zone),
            field.range_duration_field().map(|range| zoned_duration(&range, zone)),
            field.leap_duration_field().map(|leap| zoned_duration(&leap, zone)),
        )
        .into()
    })
}

fn zoned_duration(duration: &DurationField, zone: &DateTimeZone) -> DurationField {
    DurationField::zoned(duration.clone(), zone.clone())
}

/// Makes every field of `base` lenient. `utc` holds the same fields in UTC.
pub(crate) fn lenient(base: &Fields, utc: &Fields, zone: &DateTimeZone) -> Fields {
    base.map(DurationField::clone, |field| {
        let utc_field = utc.field(field.field_type()).clone();
        LenientField::new(field.clone(), utc_field, zone.clone()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_follow_type_order() {
        let fields = iso();
        for ty in DateTimeFieldType::ALL {
            assert_eq!(fields.field(ty).field_type(), ty);
        }
        for ty in DurationFieldType::ALL {
            assert_eq!(fields.duration(ty).duration_type(), ty);
        }
    }

    #[test]
    fn julian_years_skip_zero() {
        let cal = BasicCalendar::julian(4).unwrap();
        let fields = without_year_zero(cal);
        let year = fields.field(DateTimeFieldType::Year);
        assert_eq!(year.minimum_value(), cal.min_year() - 1);
        let one = year.set(0, 1).unwrap();
        assert_eq!(year.get(year.add(one, -1).unwrap()).unwrap(), -1);
        assert!(year.set(0, 0).is_err());
    }

    #[test]
    fn islamic_era_is_single() {
        let cal = BasicCalendar::islamic(crate::LeapYearPattern::Base16, 4).unwrap();
        let era = islamic(cal).field(DateTimeFieldType::Era).clone();
        assert_eq!(era.get(0).unwrap(), 1);
        assert_eq!(era.canonical_text(1), Some("AH"));
    }
}
