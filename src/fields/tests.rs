use crate::{
    error::ErrorKind,
    text::{CanonicalText, FieldTextProvider},
    zone::{OfYear, TransitionMode},
    Chronology, DateTimeFieldType, DateTimeZone, DurationFieldType, LeapYearPattern, Partial,
    ZoneBuilder, DEFAULT_CUTOVER_MILLIS, MS_PER_DAY, MS_PER_HOUR,
};

fn iso_millis(year: i32, month: i32, day: i32, hour: i32) -> i64 {
    Chronology::iso_utc()
        .get_date_time_millis_hms(year, month, day, hour, 0, 0, 0)
        .unwrap()
}

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

struct MonthNames;

impl FieldTextProvider for MonthNames {
    fn text(&self, field: DateTimeFieldType, value: i32) -> Option<String> {
        match (field, value) {
            (DateTimeFieldType::MonthOfYear, 6) => Some("June".into()),
            _ => None,
        }
    }
}

#[test]
fn rounding_modes() {
    let day = Chronology::iso_utc().field(DateTimeFieldType::DayOfMonth);

    let noon = iso_millis(2021, 6, 10, 12);
    assert_eq!(day.round_floor(noon).unwrap(), iso_millis(2021, 6, 10, 0));
    assert_eq!(day.round_ceiling(noon).unwrap(), iso_millis(2021, 6, 11, 0));
    assert_eq!(day.round_half_floor(noon).unwrap(), iso_millis(2021, 6, 10, 0));
    assert_eq!(day.round_half_ceiling(noon).unwrap(), iso_millis(2021, 6, 11, 0));
    // The eleventh is odd, so the tie goes down.
    assert_eq!(day.round_half_even(noon).unwrap(), iso_millis(2021, 6, 10, 0));
    let next_noon = noon + MS_PER_DAY;
    assert_eq!(day.round_half_even(next_noon).unwrap(), iso_millis(2021, 6, 12, 0));
    assert_eq!(day.remainder(noon).unwrap(), 12 * MS_PER_HOUR);

    let midnight = iso_millis(2021, 6, 10, 0);
    assert_eq!(day.round_ceiling(midnight).unwrap(), midnight);

    let month = Chronology::iso_utc().field(DateTimeFieldType::MonthOfYear);
    assert_eq!(month.round_floor(noon).unwrap(), iso_millis(2021, 6, 1, 0));
    assert_eq!(month.round_ceiling(noon).unwrap(), iso_millis(2021, 7, 1, 0));

    let year = Chronology::iso_utc().field(DateTimeFieldType::Year);
    let march = iso_millis(2021, 3, 1, 0);
    assert_eq!(year.round_half_even(march).unwrap(), iso_millis(2021, 1, 1, 0));
    assert_eq!(year.round_half_ceiling(march).unwrap(), iso_millis(2021, 1, 1, 0));
    assert_eq!(year.remainder(march).unwrap(), 59 * MS_PER_DAY);
}

#[test]
fn text_falls_back_to_canonical_then_decimal() {
    let iso = Chronology::iso_utc();
    let halfday = iso.field(DateTimeFieldType::HalfdayOfDay);
    assert_eq!(halfday.canonical_text(1), Some("PM"));
    assert_eq!(halfday.as_text(0, &CanonicalText), "AM");

    let era = iso.field(DateTimeFieldType::Era);
    assert_eq!(era.as_short_text(1, &MonthNames), "AD");

    let month = iso.field(DateTimeFieldType::MonthOfYear);
    assert_eq!(month.as_text(6, &MonthNames), "June");
    assert_eq!(month.as_short_text(6, &MonthNames), "June");
    assert_eq!(month.as_text(7, &MonthNames), "7");
    assert_eq!(month.canonical_text(6), None);
}

#[test]
fn leap_queries() {
    let iso = Chronology::iso_utc();
    let leap_day = iso_millis(2024, 2, 29, 0);
    let ordinary = iso_millis(2023, 2, 28, 0);

    let year = iso.field(DateTimeFieldType::Year);
    assert!(year.is_leap(leap_day).unwrap());
    assert_eq!(year.leap_amount(leap_day).unwrap(), 1);
    assert_eq!(year.leap_amount(ordinary).unwrap(), 0);
    assert_eq!(
        year.leap_duration_field().map(|field| field.duration_type()),
        Some(DurationFieldType::Days)
    );

    let month = iso.field(DateTimeFieldType::MonthOfYear);
    assert!(month.is_leap(leap_day).unwrap());
    assert!(!month.is_leap(iso_millis(2024, 3, 1, 0)).unwrap());

    assert!(iso.field(DateTimeFieldType::DayOfMonth).is_leap(leap_day).unwrap());
    assert!(!iso.field(DateTimeFieldType::DayOfMonth).is_leap(ordinary).unwrap());

    // 2020 is an ISO year of 53 weeks.
    let weekyear = iso.field(DateTimeFieldType::Weekyear);
    let mid_2020 = iso_millis(2020, 6, 1, 0);
    assert!(weekyear.is_leap(mid_2020).unwrap());
    assert_eq!(weekyear.leap_amount(mid_2020).unwrap(), 1);
    assert!(!weekyear.is_leap(ordinary).unwrap());

    assert!(!iso.field(DateTimeFieldType::HourOfDay).is_leap(leap_day).unwrap());
    assert!(iso.field(DateTimeFieldType::HourOfDay).leap_duration_field().is_none());
}

#[test]
fn bounds_for_partials() {
    let iso = Chronology::iso_utc();
    let day = iso.field(DateTimeFieldType::DayOfMonth);
    assert_eq!(day.minimum_value(), 1);
    assert_eq!(day.maximum_value(), 31);
    assert_eq!(day.maximum_value_for(&Partial::new()), 31);

    let february = Partial::new().with(DateTimeFieldType::MonthOfYear, 2);
    assert_eq!(day.maximum_value_for(&february), 29);
    let february_2023 = february.with(DateTimeFieldType::Year, 2023);
    assert_eq!(day.maximum_value_for(&february_2023), 28);
    assert_eq!(day.maximum_value_at(iso_millis(2023, 2, 10, 0)).unwrap(), 28);

    let day_of_year = iso.field(DateTimeFieldType::DayOfYear);
    let year_2023 = Partial::new().with(DateTimeFieldType::Year, 2023);
    assert_eq!(day_of_year.maximum_value_for(&year_2023), 365);
    assert_eq!(day_of_year.maximum_value(), 366);

    let week = iso.field(DateTimeFieldType::WeekOfWeekyear);
    let weekyear_2020 = Partial::new().with(DateTimeFieldType::Weekyear, 2020);
    assert_eq!(week.maximum_value_for(&weekyear_2020), 53);
}

#[test]
fn set_rejects_out_of_range_values() {
    let iso = Chronology::iso_utc();
    let day = iso.field(DateTimeFieldType::DayOfMonth);
    let err = day.set(iso_millis(2023, 2, 10, 0), 30).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalFieldValue);
    assert_eq!(err.field(), Some(DateTimeFieldType::DayOfMonth));

    let minute = iso.field(DateTimeFieldType::MinuteOfHour);
    assert!(minute.set(0, 60).is_err());
    let midnight = iso_millis(2021, 1, 1, 0);
    assert_eq!(
        minute.add_wrap_field(midnight, -1).unwrap(),
        midnight + 59 * 60_000
    );
}

#[test]
fn unsupported_eras() {
    let eras = Chronology::iso_utc().duration_field(DurationFieldType::Eras);
    assert!(!eras.is_supported());
    assert_eq!(eras.add(0, 1).unwrap_err().kind(), ErrorKind::Unsupported);
    assert_eq!(eras.difference(1, 0).unwrap_err().kind(), ErrorKind::Unsupported);

    let era = Chronology::iso_utc().field(DateTimeFieldType::Era);
    assert!(era.is_supported());
    assert!(!era.duration_field().is_supported());
}

#[test]
fn cutover_set_rejects_skipped_days() {
    let gj = Chronology::gj(DateTimeZone::utc(), None, 4).unwrap();
    let day = gj.field(DateTimeFieldType::DayOfMonth);
    let last_julian = DEFAULT_CUTOVER_MILLIS - MS_PER_DAY;

    let err = day.set(last_julian, 10).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalFieldValue);
    assert_eq!(day.set(last_julian, 15).unwrap(), DEFAULT_CUTOVER_MILLIS);
    assert_eq!(day.set(DEFAULT_CUTOVER_MILLIS, 4).unwrap(), last_julian);

    assert_eq!(day.difference(DEFAULT_CUTOVER_MILLIS, last_julian).unwrap(), 1);
    let year = gj.field(DateTimeFieldType::Year);
    assert_eq!(year.get(last_julian).unwrap(), 1582);
    // 1582 lost ten days.
    let day_of_year = gj.field(DateTimeFieldType::DayOfYear);
    assert_eq!(day_of_year.maximum_value_at(last_julian).unwrap(), 355);
}

#[test]
fn zoned_time_fields_add_elapsed_time() {
    let iso = Chronology::iso(central_europe()).unwrap();
    let hour = iso.field(DateTimeFieldType::HourOfDay);
    // 01:30 local, half an hour before clocks go forward.
    let before = iso_millis(2021, 3, 28, 0) + 30 * 60_000;
    assert_eq!(hour.get(before).unwrap(), 1);

    let after = hour.add(before, 1).unwrap();
    assert_eq!(after - before, MS_PER_HOUR);
    assert_eq!(hour.get(after).unwrap(), 3);
    assert_eq!(hour.difference(after, before).unwrap(), 1);

    let err = hour.set(before, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInstant);
    assert_eq!(err.field(), Some(DateTimeFieldType::HourOfDay));

    assert!(iso.duration_field(DurationFieldType::Hours).is_precise());
    assert!(!iso.duration_field(DurationFieldType::Days).is_precise());
}

#[test]
fn zoned_rounding_uses_local_midnight() {
    let iso = Chronology::iso(central_europe()).unwrap();
    let day = iso.field(DateTimeFieldType::DayOfMonth);
    let summer_noon = iso_millis(2021, 7, 1, 10);
    let midnight = day.round_floor(summer_noon).unwrap();
    assert_eq!(midnight, iso_millis(2021, 6, 30, 22));
    assert_eq!(day.remainder(summer_noon).unwrap(), 12 * MS_PER_HOUR);
}

#[test]
fn lenient_fields_roll_into_larger_units() {
    let lenient = Chronology::lenient(&Chronology::iso_utc()).unwrap();
    let hour = lenient.field(DateTimeFieldType::HourOfDay);
    assert!(hour.is_lenient());
    assert!(!Chronology::iso_utc().field(DateTimeFieldType::HourOfDay).is_lenient());

    let start = iso_millis(2021, 1, 31, 10);
    assert_eq!(hour.set(start, 25).unwrap(), iso_millis(2021, 2, 1, 1));
    assert_eq!(hour.set(start, -1).unwrap(), iso_millis(2021, 1, 30, 23));

    let month = lenient.field(DateTimeFieldType::MonthOfYear);
    assert_eq!(month.set(start, 0).unwrap(), iso_millis(2020, 12, 31, 10));
}

#[test]
fn extreme_instants_fail_without_panicking() {
    let utc = DateTimeZone::utc();
    let chronologies = [
        Chronology::iso_utc(),
        Chronology::iso(central_europe()).unwrap(),
        Chronology::gregorian(utc.clone(), 4).unwrap(),
        Chronology::julian(utc.clone(), 4).unwrap(),
        Chronology::gj(utc.clone(), None, 4).unwrap(),
        Chronology::buddhist(utc.clone()).unwrap(),
        Chronology::coptic(utc.clone(), 4).unwrap(),
        Chronology::ethiopic(utc.clone(), 4).unwrap(),
        Chronology::islamic(utc, LeapYearPattern::Base16).unwrap(),
    ];
    for chronology in &chronologies {
        for instant in [i64::MIN, i64::MAX] {
            for ty in DateTimeFieldType::ALL {
                let field = chronology.field(ty);
                let _ = field.get(instant);
                let _ = field.set(instant, 1);
                let _ = field.add(instant, 1);
                let _ = field.add_long(instant, -1);
                let _ = field.add_wrap_field(instant, 1);
                let _ = field.difference_long(instant, 0);
                let _ = field.difference_long(0, instant);
                let _ = field.is_leap(instant);
                let _ = field.leap_amount(instant);
                let _ = field.minimum_value_at(instant);
                let _ = field.maximum_value_at(instant);
                let _ = field.round_floor(instant);
                let _ = field.round_ceiling(instant);
                let _ = field.round_half_floor(instant);
                let _ = field.round_half_ceiling(instant);
                let _ = field.round_half_even(instant);
                let _ = field.remainder(instant);
            }

            let year = chronology.field(DateTimeFieldType::Year);
            let err = year.get(instant).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArithmeticOverflow, "{chronology}");
            assert!(year.round_floor(instant).is_err(), "{chronology}");
            assert!(year.add(instant, 1).is_err(), "{chronology}");
            assert!(chronology
                .field(DateTimeFieldType::DayOfMonth)
                .get(instant)
                .is_err());
            assert!(chronology
                .field(DateTimeFieldType::Weekyear)
                .difference_long(instant, 0)
                .is_err());
        }
    }
}

#[test]
fn instants_near_the_calendar_limits_still_resolve() {
    let iso = Chronology::iso_utc();
    let year = iso.field(DateTimeFieldType::Year);
    let last = iso.get_date_time_millis(292_278_991, 12, 31, 0).unwrap();
    assert_eq!(year.get(last).unwrap(), 292_278_991);
    assert_eq!(year.add(last, 1).unwrap_err().kind(), ErrorKind::IllegalFieldValue);
}
