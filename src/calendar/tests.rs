use super::*;

const JAN_1_2000: i64 = 946_684_800_000;
const DEC_31_2018: i64 = 1_546_214_400_000;
const FEB_29_2024: i64 = 1_709_164_800_000;

fn iso() -> BasicCalendar {
    BasicCalendar::gregorian(4).unwrap()
}

#[test]
fn gregorian_year_month_day() {
    let cal = iso();
    assert_eq!(cal.year(0), 1970);
    assert_eq!(cal.year(-1), 1969);
    assert_eq!(cal.year(JAN_1_2000), 2000);
    assert_eq!(cal.year(JAN_1_2000 - 1), 1999);
    assert_eq!(cal.month_of_year(FEB_29_2024), 2);
    assert_eq!(cal.day_of_month(FEB_29_2024), 29);
    assert_eq!(cal.day_of_year(FEB_29_2024), 60);
    assert_eq!(cal.year_month_day_millis(2024, 2, 29), FEB_29_2024);
    assert_eq!(cal.year_month_day_millis(1, 1, 1), -62_135_596_800_000);
}

#[test]
fn year_estimate_is_exact_at_boundaries() {
    let cal = iso();
    for year in [-4000, -1, 0, 1, 1582, 1900, 1969, 1970, 2000, 2100, 9999] {
        let start = cal.year_millis(year);
        assert_eq!(cal.year(start), year);
        assert_eq!(cal.year(start - 1), year - 1);
    }
}

#[test]
fn epoch_is_thursday() {
    let cal = iso();
    assert_eq!(cal.day_of_week(0), 4);
    assert_eq!(cal.day_of_week(-1), 3);
    assert_eq!(cal.day_of_week(DEC_31_2018), 1);
}

#[test]
fn iso_week_numbering() {
    let cal = iso();
    assert_eq!(cal.year(DEC_31_2018), 2018);
    assert_eq!(cal.weekyear(DEC_31_2018), 2019);
    assert_eq!(cal.week_of_weekyear(DEC_31_2018), 1);
    assert_eq!(cal.weeks_in_year(2020), 53);
    assert_eq!(cal.weeks_in_year(2021), 52);

    let jan_1_2021 = cal.year_millis(2021);
    assert_eq!(cal.weekyear(jan_1_2021), 2020);
    assert_eq!(cal.week_of_weekyear(jan_1_2021), 53);
}

#[test]
fn min_days_in_first_week_changes_week_one() {
    // 2021-01-01 is a Friday. With a one day minimum it starts week one.
    let cal = BasicCalendar::gregorian(1).unwrap();
    let jan_1_2021 = cal.year_millis(2021);
    assert_eq!(cal.week_of_weekyear(jan_1_2021), 1);
    assert_eq!(cal.weekyear(jan_1_2021), 2021);
    assert!(BasicCalendar::gregorian(0).is_err());
    assert!(BasicCalendar::gregorian(8).is_err());
}

#[test]
fn date_bounds_are_checked() {
    let cal = iso();
    assert!(cal.date_time_millis(2023, 2, 29, 0).is_err());
    assert!(cal.date_time_millis(2023, 13, 1, 0).is_err());
    assert!(cal.date_time_millis(2023, 1, 1, MS_PER_DAY as i32).is_err());
    assert_eq!(cal.date_time_millis(2024, 2, 29, 0), Ok(FEB_29_2024));
    assert_eq!(
        cal.date_time_millis_hms(2000, 1, 1, 1, 2, 3, 4),
        Ok(JAN_1_2000 + MS_PER_HOUR + 2 * MS_PER_MINUTE + 3 * MS_PER_SECOND + 4)
    );
    assert!(cal.date_time_millis_hms(2000, 1, 1, 24, 0, 0, 0).is_err());
}

#[test]
fn gregorian_set_year_preserves_month_and_day() {
    let cal = iso();
    // Feb 29 moves to Feb 28 in a common year.
    let moved = cal.set_year(FEB_29_2024, 2023);
    assert_eq!(moved, cal.year_month_day_millis(2023, 2, 28));
    // Mar 1 stays Mar 1 when entering a leap year.
    let mar_1_2023 = cal.year_month_day_millis(2023, 3, 1);
    assert_eq!(
        cal.set_year(mar_1_2023, 2024),
        cal.year_month_day_millis(2024, 3, 1)
    );
}

#[test]
fn gregorian_year_difference_balances_leap_day() {
    let cal = iso();
    let feb_28_2023 = cal.year_month_day_millis(2023, 2, 28);
    assert_eq!(cal.year_difference(feb_28_2023, FEB_29_2024 - 365 * MS_PER_DAY), 0);
    assert_eq!(cal.year_difference(FEB_29_2024, feb_28_2023), 1);
    assert_eq!(cal.year_difference(feb_28_2023, FEB_29_2024), -1);
}

#[test]
fn julian_epoch() {
    let cal = BasicCalendar::julian(4).unwrap();
    assert_eq!(cal.year(0), 1969);
    assert_eq!(cal.month_of_year(0), 12);
    assert_eq!(cal.day_of_month(0), 19);
    assert!(cal.is_leap_year(1900));
    assert_eq!(cal.date_time_millis(1969, 12, 19, 0), Ok(0));
    assert!(cal.date_time_millis(0, 1, 1, 0).is_err());
    // Year -1 is 1 BC, the proleptic year 0.
    assert_eq!(
        cal.date_time_millis(-1, 1, 1, 0),
        Ok(cal.year_month_day_millis(0, 1, 1))
    );
}

#[test]
fn coptic_and_ethiopic_epoch() {
    let coptic = BasicCalendar::coptic(4).unwrap();
    assert_eq!(coptic.year(0), 1686);
    assert_eq!(coptic.month_of_year(0), 4);
    assert_eq!(coptic.day_of_month(0), 23);

    let ethiopic = BasicCalendar::ethiopic(4).unwrap();
    assert_eq!(ethiopic.year(0), 1962);
    assert_eq!(ethiopic.month_of_year(0), 4);
    assert_eq!(ethiopic.day_of_month(0), 23);
}

#[test]
fn fixed_month_set_year_asymmetry() {
    // Leaving a leap year from its sixth epagomenal day drops a day, but
    // entering a leap year from day 365 does not add one.
    let coptic = BasicCalendar::coptic(4).unwrap();
    let leap_day = coptic.year_month_day_millis(1687, 13, 6);
    assert!(coptic.is_leap_day(leap_day));
    assert_eq!(
        coptic.set_year(leap_day, 1688),
        coptic.year_month_day_millis(1688, 13, 5)
    );

    let last_day = coptic.year_month_day_millis(1686, 13, 5);
    assert_eq!(
        coptic.set_year(last_day, 1687),
        coptic.year_month_day_millis(1687, 13, 5)
    );
}

#[test]
fn islamic_epoch() {
    let cal = BasicCalendar::islamic(LeapYearPattern::Base16, 4).unwrap();
    assert_eq!(cal.year(0), 1389);
    assert_eq!(cal.month_of_year(0), 10);
    assert_eq!(cal.day_of_month(0), 22);
    assert_eq!(cal.date_time_millis(1389, 10, 22, 0), Ok(0));
    assert_eq!(cal.days_in_year_month(2, 12), 30);
    assert_eq!(cal.days_in_year_month(1, 12), 29);
}

#[test]
fn instant_range_covers_each_calendar() {
    let calendars = [
        iso(),
        BasicCalendar::julian(4).unwrap(),
        BasicCalendar::coptic(4).unwrap(),
        BasicCalendar::ethiopic(4).unwrap(),
        BasicCalendar::islamic(LeapYearPattern::Base16, 4).unwrap(),
    ];
    for cal in &calendars {
        for instant in [i64::MIN, i64::MAX] {
            let year = cal.year(instant);
            assert!(year >= cal.min_year() - YEAR_MARGIN && year <= cal.max_year() + YEAR_MARGIN);
            assert!(cal.verify_instant(instant).is_err());
        }
        assert!(cal.min_instant() < cal.max_instant());
        assert_eq!(cal.verify_instant(0), Ok(0));
        assert_eq!(cal.year(cal.min_instant()), cal.min_year() - 1);
        assert_eq!(cal.year(cal.max_instant()), cal.max_year() + 1);
        assert!(cal.verify_instant(cal.max_instant() + 1).is_err());
    }
}
