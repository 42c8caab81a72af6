use std::sync::Arc;

use writeable::Writeable;

use super::{Chronology, ChronologyKind, ChronologyOptions};
use crate::{
    error::ErrorKind,
    zone::{OfYear, TransitionMode},
    DateTimeFieldType, DateTimeZone, DurationFieldType, LeapYearPattern, Partial, ZoneBuilder,
    DEFAULT_CUTOVER_MILLIS, MS_PER_DAY, MS_PER_HOUR,
};

/// Central European time with the current rules since 1981.
fn central_europe() -> DateTimeZone {
    let hour = MS_PER_HOUR as i32;
    let spring = OfYear::new(TransitionMode::Utc, 3, -1, 7, false, hour).unwrap();
    let autumn = OfYear::new(TransitionMode::Utc, 10, -1, 7, false, hour).unwrap();
    let mut builder = ZoneBuilder::new();
    builder.set_standard_offset(hour);
    builder
        .add_recurring_savings("CEST", hour, 1981, i32::MAX, spring)
        .unwrap();
    builder
        .add_recurring_savings("CET", 0, 1981, i32::MAX, autumn)
        .unwrap();
    builder.to_date_time_zone("Test/Central").unwrap()
}

#[test]
fn iso_utc_is_canonical() {
    let a = Chronology::iso_utc();
    let b = Chronology::iso(DateTimeZone::utc()).unwrap();
    let c = Chronology::new(ChronologyKind::Iso, ChronologyOptions::default()).unwrap();
    assert!(Arc::ptr_eq(&a.0, &b.0));
    assert!(Arc::ptr_eq(&a.0, &c.0));
}

#[test]
fn equal_parameters_share_an_instance() {
    let zone = DateTimeZone::for_offset_hours_minutes(5, 30).unwrap();
    let a = Chronology::gregorian(zone.clone(), 1).unwrap();
    let b = Chronology::gregorian(zone, 1).unwrap();
    assert!(Arc::ptr_eq(&a.0, &b.0));

    let c = Chronology::gregorian(DateTimeZone::utc(), 2).unwrap();
    assert_ne!(a, c);
    assert_eq!(c.min_days_in_first_week(), 2);
}

#[test]
fn invalid_parameters() {
    let err = Chronology::gregorian(DateTimeZone::utc(), 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
    let err = Chronology::new(
        ChronologyKind::Iso,
        ChronologyOptions {
            min_days_in_first_week: 1,
            ..ChronologyOptions::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);

    let year_zero = Chronology::iso_utc().get_date_time_millis(0, 6, 1, 0).unwrap();
    let err = Chronology::gj(DateTimeZone::utc(), Some(year_zero), 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn iso_fields() {
    let iso = Chronology::iso_utc();
    let instant = iso.get_date_time_millis_hms(2000, 2, 29, 13, 45, 10, 500).unwrap();
    let get = |ty| iso.field(ty).get(instant).unwrap();

    assert_eq!(get(DateTimeFieldType::Era), 1);
    assert_eq!(get(DateTimeFieldType::Year), 2000);
    assert_eq!(get(DateTimeFieldType::YearOfEra), 2000);
    assert_eq!(get(DateTimeFieldType::CenturyOfEra), 20);
    assert_eq!(get(DateTimeFieldType::YearOfCentury), 0);
    assert_eq!(get(DateTimeFieldType::MonthOfYear), 2);
    assert_eq!(get(DateTimeFieldType::DayOfMonth), 29);
    assert_eq!(get(DateTimeFieldType::DayOfYear), 60);
    assert_eq!(get(DateTimeFieldType::DayOfWeek), 2);
    assert_eq!(get(DateTimeFieldType::HalfdayOfDay), 1);
    assert_eq!(get(DateTimeFieldType::HourOfHalfday), 1);
    assert_eq!(get(DateTimeFieldType::ClockhourOfHalfday), 1);
    assert_eq!(get(DateTimeFieldType::HourOfDay), 13);
    assert_eq!(get(DateTimeFieldType::MinuteOfHour), 45);
    assert_eq!(get(DateTimeFieldType::SecondOfMinute), 10);
    assert_eq!(get(DateTimeFieldType::MillisOfSecond), 500);
    assert_eq!(get(DateTimeFieldType::MinuteOfDay), 13 * 60 + 45);

    let midnight = iso.get_date_time_millis(2000, 1, 1, 0).unwrap();
    assert_eq!(iso.field(DateTimeFieldType::ClockhourOfDay).get(midnight).unwrap(), 24);
    assert_eq!(midnight, 946_684_800_000);
}

#[test]
fn gregorian_centuries_are_one_based() {
    let gregorian = Chronology::gregorian(DateTimeZone::utc(), 4).unwrap();
    let y2000 = gregorian.get_date_time_millis(2000, 6, 1, 0).unwrap();
    let y2001 = gregorian.get_date_time_millis(2001, 6, 1, 0).unwrap();
    let century = gregorian.field(DateTimeFieldType::CenturyOfEra);
    let year_of_century = gregorian.field(DateTimeFieldType::YearOfCentury);
    assert_eq!(century.get(y2000).unwrap(), 20);
    assert_eq!(year_of_century.get(y2000).unwrap(), 100);
    assert_eq!(century.get(y2001).unwrap(), 21);
    assert_eq!(year_of_century.get(y2001).unwrap(), 1);
}

#[test]
fn week_numbering() {
    let iso = Chronology::iso_utc();
    let instant = iso.get_date_time_millis(2008, 12, 29, 0).unwrap();
    assert_eq!(iso.field(DateTimeFieldType::Weekyear).get(instant).unwrap(), 2009);
    assert_eq!(iso.field(DateTimeFieldType::WeekOfWeekyear).get(instant).unwrap(), 1);

    // With one day enough for the first week, 2010-01-01 (a Friday) starts week 1.
    let gregorian = Chronology::gregorian(DateTimeZone::utc(), 1).unwrap();
    let instant = gregorian.get_date_time_millis(2010, 1, 1, 0).unwrap();
    assert_eq!(gregorian.field(DateTimeFieldType::WeekOfWeekyear).get(instant).unwrap(), 1);
    assert_eq!(iso.field(DateTimeFieldType::WeekOfWeekyear).get(instant).unwrap(), 53);
}

#[test]
fn month_arithmetic_and_differences() {
    let iso = Chronology::iso_utc();
    let months = iso.field(DateTimeFieldType::MonthOfYear);
    let jan31 = iso.get_date_time_millis(2024, 1, 31, 0).unwrap();
    let feb29 = iso.get_date_time_millis(2024, 2, 29, 0).unwrap();
    assert_eq!(months.add(jan31, 1).unwrap(), feb29);

    let years = iso.duration_field(DurationFieldType::Years);
    let start = iso.get_date_time_millis(2023, 2, 28, 0).unwrap();
    let anniversary = iso.get_date_time_millis(2024, 2, 28, 0).unwrap();
    assert_eq!(years.difference(anniversary, start).unwrap(), 1);
    assert_eq!(years.difference(anniversary - 1, start).unwrap(), 0);
}

#[test]
fn cutover_dates() {
    let gj = Chronology::gj(DateTimeZone::utc(), None, 4).unwrap();
    assert_eq!(gj.cutover(), Some(DEFAULT_CUTOVER_MILLIS));

    let first_gregorian = gj.get_date_time_millis(1582, 10, 15, 0).unwrap();
    assert_eq!(first_gregorian, DEFAULT_CUTOVER_MILLIS);
    let last_julian = gj.get_date_time_millis(1582, 10, 4, 0).unwrap();
    assert_eq!(last_julian, DEFAULT_CUTOVER_MILLIS - MS_PER_DAY);

    let day = gj.field(DateTimeFieldType::DayOfMonth);
    assert_eq!(day.add(last_julian, 1).unwrap(), first_gregorian);
    assert_eq!(day.get(last_julian).unwrap(), 4);
    assert_eq!(day.get(first_gregorian).unwrap(), 15);

    let err = gj.get_date_time_millis(1582, 10, 10, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);

    // 1500 is a leap year only in the Julian calendar.
    let julian = Chronology::julian(DateTimeZone::utc(), 4).unwrap();
    assert_eq!(
        gj.get_date_time_millis(1500, 2, 29, 0).unwrap(),
        julian.get_date_time_millis(1500, 2, 29, 0).unwrap()
    );
    assert!(gj.get_date_time_millis(1700, 2, 29, 0).is_err());
}

#[test]
fn cutover_month_arithmetic() {
    let gj = Chronology::gj(DateTimeZone::utc(), None, 4).unwrap();
    let months = gj.field(DateTimeFieldType::MonthOfYear);
    let september = gj.get_date_time_millis(1582, 9, 20, 0).unwrap();
    let november = months.add(september, 2).unwrap();
    assert_eq!(november, gj.get_date_time_millis(1582, 11, 20, 0).unwrap());
    assert_eq!(months.difference(november, september).unwrap(), 2);

    let years = gj.field(DateTimeFieldType::Year);
    let before = gj.get_date_time_millis(1500, 3, 1, 0).unwrap();
    let after = years.add(before, 100).unwrap();
    assert_eq!(after, gj.get_date_time_millis(1600, 3, 1, 0).unwrap());
}

#[test]
fn cutover_ranges_count_cutover_years() {
    let gj = Chronology::gj(DateTimeZone::utc(), None, 4).unwrap();
    let june = gj.get_date_time_millis(1582, 6, 1, 0).unwrap();

    let years = gj.field(DateTimeFieldType::DayOfYear).range_duration_field().unwrap();
    assert_eq!(years.add(june, 1).unwrap(), gj.get_date_time_millis(1583, 6, 1, 0).unwrap());

    let weekyear = gj.field(DateTimeFieldType::Weekyear);
    let weekyears = gj
        .field(DateTimeFieldType::WeekOfWeekyear)
        .range_duration_field()
        .unwrap();
    assert_eq!(weekyears.add(june, 1).unwrap(), weekyear.add(june, 1).unwrap());
    let weekyear_of_century = gj.field(DateTimeFieldType::WeekyearOfCentury);
    assert_eq!(
        weekyear_of_century.add(june, 1).unwrap(),
        weekyear.add(june, 1).unwrap()
    );
}

#[test]
fn buddhist_years_offset_the_gregorian_calendar() {
    let gregorian = Chronology::gregorian(DateTimeZone::utc(), 4).unwrap();
    let buddhist = Chronology::buddhist(DateTimeZone::utc()).unwrap();
    let year = buddhist.field(DateTimeFieldType::Year);
    for (y, m, d) in [
        (2, 1, 1),
        (1000, 12, 31),
        (1500, 1, 3),
        (1582, 10, 10),
        (1970, 1, 1),
        (2024, 2, 29),
    ] {
        let instant = gregorian.get_date_time_millis(y, m, d, 0).unwrap();
        assert_eq!(year.get(instant).unwrap(), y + 543);
    }
    assert_eq!(buddhist.field(DateTimeFieldType::Era).canonical_text(1), Some("BE"));
    assert_eq!(
        buddhist.get_date_time_millis(2513, 1, 1, 0).unwrap(),
        gregorian.get_date_time_millis(1970, 1, 1, 0).unwrap()
    );
    // No cutover gap: the days Julian/Gregorian skips exist here.
    assert_eq!(
        buddhist.get_date_time_millis(2125, 10, 10, 0).unwrap(),
        gregorian.get_date_time_millis(1582, 10, 10, 0).unwrap()
    );
}

#[test]
fn fixed_month_calendars() {
    let iso = Chronology::iso_utc();
    let instant = iso.get_date_time_millis(2004, 6, 9, 0).unwrap();

    let coptic = Chronology::coptic(DateTimeZone::utc(), 4).unwrap();
    assert_eq!(coptic.get_date_time_millis(1720, 10, 2, 0).unwrap(), instant);
    assert_eq!(coptic.field(DateTimeFieldType::Era).canonical_text(1), Some("AM"));

    let ethiopic = Chronology::ethiopic(DateTimeZone::utc(), 4).unwrap();
    assert_eq!(ethiopic.get_date_time_millis(1996, 10, 2, 0).unwrap(), instant);

    // The thirteenth month has five or six days.
    let day = coptic.field(DateTimeFieldType::DayOfMonth);
    let epagomenal = coptic.get_date_time_millis(1720, 13, 1, 0).unwrap();
    assert_eq!(day.maximum_value_at(epagomenal).unwrap(), 5);
    assert!(coptic.get_date_time_millis(1720, 13, 6, 0).is_err());
}

#[test]
fn islamic_months_alternate() {
    let islamic = Chronology::islamic(DateTimeZone::utc(), LeapYearPattern::Base16).unwrap();
    assert_eq!(islamic.leap_year_pattern(), Some(LeapYearPattern::Base16));
    let day = islamic.field(DateTimeFieldType::DayOfMonth);
    let first = islamic.get_date_time_millis(1426, 1, 1, 0).unwrap();
    let second = islamic.get_date_time_millis(1426, 2, 1, 0).unwrap();
    assert_eq!(day.maximum_value_at(first).unwrap(), 30);
    assert_eq!(day.maximum_value_at(second).unwrap(), 29);
    assert_eq!(second - first, 30 * MS_PER_DAY);
}

#[test]
fn zoned_fields_read_local_time() {
    let zone = DateTimeZone::for_offset_hours_minutes(2, 0).unwrap();
    let iso = Chronology::iso(zone).unwrap();
    let instant = iso.get_date_time_millis(2020, 1, 1, 0).unwrap();
    assert_eq!(instant, 1_577_836_800_000 - 2 * MS_PER_HOUR);
    assert_eq!(iso.field(DateTimeFieldType::HourOfDay).get(0).unwrap(), 2);
    assert_eq!(iso.with_utc().unwrap(), Chronology::iso_utc());

    let noon = iso.get_date_time_millis_on(instant, 12, 0, 0, 0).unwrap();
    assert_eq!(noon - instant, 12 * MS_PER_HOUR);
}

#[test]
fn zoned_dates_in_a_gap_do_not_exist() {
    let iso = Chronology::iso(central_europe()).unwrap();
    let err = iso.get_date_time_millis_hms(2021, 3, 28, 2, 30, 0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInstant);

    let summer = iso.get_date_time_millis_hms(2021, 7, 1, 12, 0, 0, 0).unwrap();
    let utc = Chronology::iso_utc().get_date_time_millis_hms(2021, 7, 1, 10, 0, 0, 0).unwrap();
    assert_eq!(summer, utc);

    // A day added across the transition keeps the wall clock time.
    let before = iso.get_date_time_millis_hms(2021, 3, 27, 12, 0, 0, 0).unwrap();
    let after = iso.field(DateTimeFieldType::DayOfMonth).add(before, 1).unwrap();
    assert_eq!(after - before, 23 * MS_PER_HOUR);
    assert_eq!(iso.field(DateTimeFieldType::HourOfDay).get(after).unwrap(), 12);
}

#[test]
fn lenient_values_roll_over() {
    let lenient = Chronology::lenient(&Chronology::iso_utc()).unwrap();
    assert!(lenient.field(DateTimeFieldType::MonthOfYear).is_lenient());
    let rolled = lenient.get_date_time_millis(2023, 13, 1, 0).unwrap();
    assert_eq!(rolled, Chronology::iso_utc().get_date_time_millis(2024, 1, 1, 0).unwrap());

    let day = lenient.field(DateTimeFieldType::DayOfMonth);
    let feb1 = Chronology::iso_utc().get_date_time_millis(2023, 2, 1, 0).unwrap();
    let march2 = Chronology::iso_utc().get_date_time_millis(2023, 3, 2, 0).unwrap();
    assert_eq!(day.set(feb1, 30).unwrap(), march2);

    let zoned = lenient.with_zone(DateTimeZone::for_offset_hours_minutes(1, 0).unwrap()).unwrap();
    assert_eq!(zoned.kind(), ChronologyKind::Lenient);
    assert_eq!(zoned.with_utc().unwrap(), lenient);
}

#[test]
fn partials() {
    let iso = Chronology::iso_utc();
    let day_only = Partial::new().with(DateTimeFieldType::DayOfMonth, 31);
    assert!(iso.validate(&day_only).is_ok());

    let february = day_only.clone().with(DateTimeFieldType::MonthOfYear, 2);
    let err = iso.validate(&february).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalFieldValue);
    assert_eq!(err.field(), Some(DateTimeFieldType::DayOfMonth));

    let leap_day = Partial::new()
        .with(DateTimeFieldType::Year, 2024)
        .with(DateTimeFieldType::MonthOfYear, 2)
        .with(DateTimeFieldType::DayOfMonth, 29);
    assert!(iso.validate(&leap_day).is_ok());
    assert!(iso
        .validate(&leap_day.clone().with(DateTimeFieldType::Year, 2023))
        .is_err());

    let instant = iso.set_partial(&leap_day, 0).unwrap();
    assert_eq!(instant, iso.get_date_time_millis(2024, 2, 29, 0).unwrap());
}

#[test]
fn display() {
    assert_eq!(Chronology::iso_utc().write_to_string(), "ISOChronology[UTC]");

    let zone = DateTimeZone::for_offset_hours_minutes(1, 0).unwrap();
    let cutover = Chronology::iso_utc().get_date_time_millis(1600, 1, 1, 0).unwrap();
    let gj = Chronology::gj(zone, Some(cutover), 4).unwrap();
    assert_eq!(gj.to_string(), "GJChronology[+01:00,cutover=1600-01-01]");

    let julian = Chronology::julian(DateTimeZone::utc(), 1).unwrap();
    assert_eq!(julian.to_string(), "JulianChronology[UTC,mdfw=1]");

    let lenient = Chronology::lenient(&Chronology::iso_utc()).unwrap();
    assert_eq!(lenient.to_string(), "LenientChronology[ISOChronology[UTC]]");
}

#[test]
fn kinds_parse_by_name() {
    assert_eq!("gj".parse::<ChronologyKind>().unwrap(), ChronologyKind::GregorianJulian);
    assert_eq!("ISO".parse::<ChronologyKind>().unwrap(), ChronologyKind::Iso);
    assert!("Hebrew".parse::<ChronologyKind>().is_err());

    let lenient = Chronology::new(ChronologyKind::Lenient, ChronologyOptions::default()).unwrap();
    assert_eq!(lenient.kind(), ChronologyKind::Lenient);
}
