use std::sync::Arc;

use writeable::Writeable;

use super::{
    parse_offset, DateTimeZone, FixedOffsetProvider, OfYear, OffsetId, TransitionMode,
    ZoneBuilder, ZoneCache, ZoneKind, ZoneProvider,
};
use crate::{
    error::{ErrorDetail, ErrorKind},
    CalendarResult, Chronology, MS_PER_HOUR, MS_PER_MINUTE,
};

const HOUR: i32 = MS_PER_HOUR as i32;

fn utc_millis(year: i32, month: i32, day: i32, hour: i32, minute: i32) -> i64 {
    Chronology::iso_utc()
        .get_date_time_millis_hms(year, month, day, hour, minute, 0, 0)
        .unwrap()
}

/// Central European time with the rules in force since 1981.
fn central_europe() -> DateTimeZone {
    let spring = OfYear::new(TransitionMode::Utc, 3, -1, 7, false, HOUR).unwrap();
    let autumn = OfYear::new(TransitionMode::Utc, 10, -1, 7, false, HOUR).unwrap();
    let mut builder = ZoneBuilder::new();
    builder.set_standard_offset(HOUR);
    builder
        .add_recurring_savings("CEST", HOUR, 1981, i32::MAX, spring)
        .unwrap();
    builder
        .add_recurring_savings("CET", 0, 1981, i32::MAX, autumn)
        .unwrap();
    builder.to_date_time_zone("Test/Central").unwrap()
}

/// US Eastern time with the 2007 rules, on the wall clock.
fn us_eastern() -> DateTimeZone {
    let spring = OfYear::new(TransitionMode::Wall, 3, 8, 7, true, 2 * HOUR).unwrap();
    let autumn = OfYear::new(TransitionMode::Wall, 11, 1, 7, true, 2 * HOUR).unwrap();
    let mut builder = ZoneBuilder::new();
    builder.set_standard_offset(-5 * HOUR);
    builder
        .add_recurring_savings("EDT", HOUR, 2007, i32::MAX, spring)
        .unwrap();
    builder
        .add_recurring_savings("EST", 0, 2007, i32::MAX, autumn)
        .unwrap();
    builder.to_date_time_zone("Test/Eastern").unwrap()
}

#[test]
fn offset_ids() {
    let id = |millis: i64| OffsetId(millis as i32).write_to_string().into_owned();
    assert_eq!(id(5 * MS_PER_HOUR + 30 * MS_PER_MINUTE), "+05:30");
    assert_eq!(id(-8 * MS_PER_HOUR), "-08:00");
    assert_eq!(id(0), "+00:00");
    assert_eq!(id(MS_PER_HOUR + 1_005), "+01:00:01.005");
    assert_eq!(id(MS_PER_HOUR + 1_000), "+01:00:01");

    assert_eq!(parse_offset("+05:30"), Some(19_800_000));
    assert_eq!(parse_offset("+0530"), Some(19_800_000));
    assert_eq!(parse_offset("-08"), Some(-28_800_000));
    assert_eq!(parse_offset("+01:00:01.005"), Some(3_601_005));
    assert_eq!(parse_offset("+24:00"), None);
    assert_eq!(parse_offset("05:00"), None);
    assert_eq!(parse_offset("+05:3"), None);
}

#[test]
fn fixed_offsets() {
    let zone = DateTimeZone::for_offset_hours_minutes(-5, 30).unwrap();
    assert_eq!(zone.id(), "-05:30");
    assert_eq!(zone.offset(0), -19_800_000);
    assert!(zone.is_fixed());
    assert_eq!(zone.next_transition(0), 0);

    let half_hour_west = DateTimeZone::for_offset_hours_minutes(0, -30).unwrap();
    assert_eq!(half_hour_west.id(), "-00:30");

    assert_eq!(DateTimeZone::for_offset_millis(0).unwrap(), DateTimeZone::utc());
    assert!(DateTimeZone::for_offset_hours_minutes(24, 0).is_err());
    assert!(DateTimeZone::for_offset_hours_minutes(1, -30).is_err());

    // Fixed offsets are cached like any other id.
    let a = DateTimeZone::for_id("+05:30").unwrap();
    let b = DateTimeZone::for_offset_hours_minutes(5, 30).unwrap();
    assert!(Arc::ptr_eq(&a.0, &b.0));

    let err = DateTimeZone::for_id("Nowhere/Unknown").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalArgument);
}

#[test]
fn builder_offsets_and_names() {
    let zone = central_europe();
    assert!(!zone.is_fixed());
    let winter = utc_millis(2021, 1, 15, 12, 0);
    let summer = utc_millis(2021, 7, 15, 12, 0);

    assert_eq!(zone.offset(winter), HOUR);
    assert_eq!(zone.offset(summer), 2 * HOUR);
    assert_eq!(zone.standard_offset(summer), HOUR);
    assert!(zone.is_standard_offset(winter));
    assert!(!zone.is_standard_offset(summer));
    assert_eq!(zone.name_key(winter).as_str(), "CET");
    assert_eq!(zone.name_key(summer).as_str(), "CEST");

    // Before the rules start only the standard offset applies.
    assert_eq!(zone.offset(utc_millis(1900, 7, 1, 0, 0)), HOUR);
    // The recurring rules carry on past the precalculated years.
    assert_eq!(zone.offset(utc_millis(2300, 7, 1, 0, 0)), 2 * HOUR);
}

#[test]
fn builder_transitions() {
    let zone = central_europe();
    let spring = utc_millis(2021, 3, 28, 1, 0);
    let autumn = utc_millis(2021, 10, 31, 1, 0);

    assert_eq!(zone.next_transition(utc_millis(2021, 1, 1, 0, 0)), spring);
    assert_eq!(zone.next_transition(spring), autumn);
    assert_eq!(zone.previous_transition(utc_millis(2021, 6, 1, 0, 0)), spring - 1);
    assert_eq!(zone.offset(spring - 1), HOUR);
    assert_eq!(zone.offset(spring), 2 * HOUR);
}

#[test]
fn wall_clock_rules() {
    let zone = us_eastern();
    // 2021-03-14 02:00 EST and 2021-11-07 02:00 EDT.
    assert_eq!(
        zone.next_transition(utc_millis(2021, 1, 1, 0, 0)),
        utc_millis(2021, 3, 14, 7, 0)
    );
    assert_eq!(
        zone.next_transition(utc_millis(2021, 6, 1, 0, 0)),
        utc_millis(2021, 11, 7, 6, 0)
    );
    assert_eq!(zone.offset(utc_millis(2021, 7, 4, 12, 0)), -4 * HOUR);
}

#[test]
fn local_times_in_a_gap() {
    let zone = central_europe();
    // 02:30 on 2021-03-28 does not exist.
    let local = utc_millis(2021, 3, 28, 2, 30);
    assert!(zone.is_local_date_time_gap(local));
    assert!(!zone.is_local_date_time_gap(utc_millis(2021, 3, 28, 3, 30)));

    let err = zone.convert_local_to_utc(local, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalInstant);
    assert_eq!(
        err.detail(),
        ErrorDetail::LocalInstant {
            field: None,
            local_millis: local
        }
    );

    // Leniently the offset from before the gap applies.
    assert_eq!(
        zone.convert_local_to_utc(local, false).unwrap(),
        local - i64::from(HOUR)
    );
}

#[test]
fn local_times_in_an_overlap() {
    let zone = central_europe();
    // 02:30 on 2021-10-31 happens twice.
    let local = utc_millis(2021, 10, 31, 2, 30);
    let earlier = utc_millis(2021, 10, 31, 0, 30);
    let later = utc_millis(2021, 10, 31, 1, 30);

    assert_eq!(zone.offset_from_local(local), 2 * HOUR);
    assert_eq!(zone.convert_local_to_utc(local, true).unwrap(), later);
    assert_eq!(zone.convert_utc_to_local(earlier).unwrap(), local);
    assert_eq!(zone.convert_utc_to_local(later).unwrap(), local);
    assert_eq!(zone.convert_local_to_utc_near(local, true, earlier).unwrap(), earlier);

    assert_eq!(zone.adjust_offset(earlier, true), later);
    assert_eq!(zone.adjust_offset(later, false), earlier);
    assert_eq!(zone.adjust_offset(later, true), later);
    let outside = utc_millis(2021, 7, 1, 0, 0);
    assert_eq!(zone.adjust_offset(outside, true), outside);
}

#[test]
fn builder_fixed_and_cached_results() {
    let mut builder = ZoneBuilder::new();
    builder.set_standard_offset(-5 * HOUR);
    builder.set_fixed_savings("EST", 0).unwrap();
    let fixed = builder.to_date_time_zone("Test/Fixed").unwrap();
    assert!(fixed.is_fixed());
    assert_eq!(fixed.name_key(0).as_str(), "EST");
    assert_eq!(fixed.offset(0), -5 * HOUR);

    let zone = central_europe();
    assert!(matches!(zone.0.kind, ZoneKind::Cached(_)));
    assert_eq!(zone, central_europe());
    assert!(builder.set_fixed_savings("AVERYLONGZONENAME", 0).is_err());
}

#[test]
fn builder_cutovers() {
    // Standard time only until 1980, then summer time from 1981.
    let spring = OfYear::new(TransitionMode::Utc, 3, -1, 7, false, HOUR).unwrap();
    let autumn = OfYear::new(TransitionMode::Utc, 10, -1, 7, false, HOUR).unwrap();
    let new_year = OfYear::new(TransitionMode::Wall, 1, 1, 0, false, 0).unwrap();

    let mut builder = ZoneBuilder::new();
    builder.set_standard_offset(0);
    builder.set_fixed_savings("GMT", 0).unwrap();
    builder.add_cutover(1981, new_year);
    builder.set_standard_offset(HOUR);
    builder
        .add_recurring_savings("CEST", HOUR, 1981, i32::MAX, spring)
        .unwrap();
    builder
        .add_recurring_savings("CET", 0, 1981, i32::MAX, autumn)
        .unwrap();
    let zone = builder.to_date_time_zone("Test/Cutover").unwrap();

    assert_eq!(zone.offset(utc_millis(1980, 7, 1, 0, 0)), 0);
    assert_eq!(zone.name_key(utc_millis(1980, 7, 1, 0, 0)).as_str(), "GMT");
    assert_eq!(zone.offset(utc_millis(1981, 2, 1, 0, 0)), HOUR);
    assert_eq!(zone.offset(utc_millis(1981, 7, 1, 0, 0)), 2 * HOUR);
    assert_eq!(
        zone.next_transition(utc_millis(1980, 7, 1, 0, 0)),
        utc_millis(1981, 1, 1, 0, 0)
    );
}

#[test]
fn recurrence_validation() {
    assert!(OfYear::new(TransitionMode::Utc, 13, 1, 0, false, 0).is_err());
    assert!(OfYear::new(TransitionMode::Utc, 3, 0, 0, false, 0).is_err());
    assert!(OfYear::new(TransitionMode::Utc, 3, 1, 8, false, 0).is_err());
    assert!(OfYear::new(TransitionMode::Utc, 3, -1, 7, false, 26 * HOUR).is_ok());

    assert_eq!(TransitionMode::try_from('g').unwrap(), TransitionMode::Utc);
    assert_eq!(TransitionMode::try_from('s').unwrap(), TransitionMode::Standard);
    assert!(TransitionMode::try_from('x').is_err());
}

#[derive(Debug)]
struct TestProvider;

impl ZoneProvider for TestProvider {
    fn zone(&self, id: &str) -> CalendarResult<Option<DateTimeZone>> {
        Ok((id == "Test/Central").then(central_europe))
    }

    fn available_ids(&self) -> Vec<String> {
        vec!["Test/Central".into()]
    }
}

#[test]
fn zone_cache_returns_one_instance() {
    let cache = ZoneCache::new(TestProvider);
    let a = cache.zone("Test/Central").unwrap().unwrap();
    let b = cache.zone("Test/Central").unwrap().unwrap();
    assert!(Arc::ptr_eq(&a.0, &b.0));

    let fixed = cache.zone("+02:00").unwrap().unwrap();
    assert_eq!(fixed.offset(0), 2 * HOUR);
    assert!(cache.zone("Test/Missing").unwrap().is_none());
    assert_eq!(cache.available_ids(), vec!["Test/Central", "UTC"]);

    assert_eq!(FixedOffsetProvider.zone("UTC").unwrap(), Some(DateTimeZone::utc()));
    assert_eq!(FixedOffsetProvider.zone("Europe/Paris").unwrap(), None);
}

#[cfg(feature = "tzdb")]
#[test]
fn tzdb_zones() {
    let zone = DateTimeZone::for_id("America/New_York").unwrap();
    assert_eq!(zone.offset(utc_millis(2021, 1, 15, 12, 0)), -5 * HOUR);
    assert_eq!(zone.offset(utc_millis(2021, 7, 15, 12, 0)), -4 * HOUR);
    assert_eq!(
        zone.next_transition(utc_millis(2021, 1, 1, 0, 0)),
        utc_millis(2021, 3, 14, 7, 0)
    );
    // Past the end of the table the footer rule applies.
    assert_eq!(zone.offset(utc_millis(2200, 7, 15, 12, 0)), -4 * HOUR);
    assert_eq!(zone.name_key(utc_millis(2021, 7, 15, 12, 0)).as_str(), "-04:00");

    let tokyo = DateTimeZone::for_id("Asia/Tokyo").unwrap();
    assert_eq!(tokyo.offset(utc_millis(2021, 7, 15, 12, 0)), 9 * HOUR);
    assert!(DateTimeZone::available_ids().iter().any(|id| id == "Europe/London"));
}
