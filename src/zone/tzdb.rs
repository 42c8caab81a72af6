//! Zones compiled from the IANA time zone database in TZif form.

use combine::Parser;
use tzif::data::{
    posix::{PosixTzString, TransitionDate, TransitionDay},
    tzif::{DataBlock, TzifData},
};
use writeable::Writeable;

use crate::{error::ErrorMessage, CalendarError, CalendarResult, CalendarUnwrap, MS_PER_SECOND};

use super::{
    CachedZone, DateTimeZone, DstZone, NameKey, OffsetId, OfYear, PrecalculatedZone, Recurrence,
    Transition, TransitionMode, ZoneKind, ZoneProvider,
};

/// Cumulative days before each month in a year without February 29th.
const MONTH_STARTS: [u16; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];

/// Provides zones from the TZif data bundled by `jiff-tzdb`.
///
/// Transitions come from the data block. The POSIX footer, when it
/// describes daylight saving time, becomes the recurring tail. Name keys
/// are the offsets in effect, such as "-05:00".
#[derive(Debug, Default, Clone, Copy)]
pub struct TzdbProvider;

impl ZoneProvider for TzdbProvider {
    fn zone(&self, id: &str) -> CalendarResult<Option<DateTimeZone>> {
        let Some((canonical, data)) = jiff_tzdb::get(id) else {
            return Ok(None);
        };
        let Ok((tzif, _)) = tzif::parse::tzif::tzif().parse(data) else {
            return Err(CalendarError::argument().with_message("Illformed TZif data."));
        };
        zone_from_tzif(canonical, &tzif).map(Some)
    }

    fn available_ids(&self) -> Vec<String> {
        jiff_tzdb::available().map(String::from).collect()
    }
}

fn seconds_to_millis(seconds: i64) -> CalendarResult<i32> {
    seconds
        .checked_mul(MS_PER_SECOND)
        .and_then(|millis| i32::try_from(millis).ok())
        .ok_or(CalendarError::argument().with_enum(ErrorMessage::OffsetOutOfRange))
}

fn offset_name(offset: i32) -> CalendarResult<NameKey> {
    NameKey::try_from_str(&OffsetId(offset).write_to_string())
        .map_err(|_| CalendarError::argument().with_enum(ErrorMessage::NameKeyInvalid))
}

fn zone_from_tzif(id: &str, tzif: &TzifData) -> CalendarResult<DateTimeZone> {
    let block = tzif.data_block2.as_ref().unwrap_or(&tzif.data_block1);
    let transitions = transitions(block)?;
    let tail = match &tzif.footer {
        Some(footer) => tail_zone(id, footer)?,
        None => None,
    };

    match (transitions.as_slice(), tail) {
        ([], Some(tail)) => Ok(DateTimeZone::new(id, ZoneKind::Dst(tail))),
        ([only], None) => Ok(DateTimeZone::fixed(id, only.name_key, only.wall, only.standard)),
        (_, tail) => {
            let zone = PrecalculatedZone::try_new(&transitions, tail)?;
            if zone.is_cachable() {
                return Ok(DateTimeZone::new(id, ZoneKind::Cached(CachedZone::new(zone))));
            }
            Ok(DateTimeZone::new(id, ZoneKind::Precalculated(zone)))
        }
    }
}

/// The transition table, starting with the initial local time type in
/// effect since the beginning of time.
fn transitions(block: &DataBlock) -> CalendarResult<Vec<Transition>> {
    let records = &block.local_time_type_records;
    let mut transitions: Vec<Transition> = Vec::with_capacity(block.transition_times.len() + 1);
    let mut standard = 0;

    let types = core::iter::once((i64::MIN, 0)).chain(
        block
            .transition_times
            .iter()
            .zip(&block.transition_types)
            .map(|(time, index)| (time.0.saturating_mul(MS_PER_SECOND), *index)),
    );
    for (millis, index) in types {
        let Some(record) = records.get(index) else {
            return Err(CalendarError::argument().with_message("Illformed TZif data."));
        };
        let wall = seconds_to_millis(record.utoff.0)?;
        if !record.is_dst {
            standard = wall;
        }
        let transition = Transition::new(millis, offset_name(wall)?, wall, standard);
        if transition.is_transition_from(transitions.last()) {
            transitions.push(transition);
        }
    }
    if records.is_empty() {
        transitions.clear();
    }
    Ok(transitions)
}

/// Translates a POSIX rule with daylight saving time into a pair of
/// recurrences on the wall clock.
fn tail_zone(id: &str, footer: &PosixTzString) -> CalendarResult<Option<DstZone>> {
    let Some(dst) = &footer.dst_info else {
        return Ok(None);
    };
    // POSIX offsets are positive west of Greenwich.
    let standard = seconds_to_millis(-footer.std_info.offset.0)?;
    let wall = seconds_to_millis(-dst.variant_info.offset.0)?;

    let (Some(start), Some(end)) = (of_year(&dst.start_date)?, of_year(&dst.end_date)?) else {
        #[cfg(feature = "log")]
        log::warn!("The POSIX rule of {id} cannot be expressed as a yearly recurrence");
        #[cfg(not(feature = "log"))]
        let _ = id;
        return Ok(None);
    };
    Ok(Some(DstZone {
        standard,
        start: Recurrence::new(start, offset_name(wall)?, wall - standard),
        end: Recurrence::new(end, offset_name(standard)?, 0),
    }))
}

fn of_year(date: &TransitionDate) -> CalendarResult<Option<OfYear>> {
    let millis = date
        .time
        .0
        .checked_mul(MS_PER_SECOND)
        .and_then(|millis| i32::try_from(millis).ok())
        .ok_or(CalendarError::argument().with_message("Transition time is out of range."))?;
    let of_year = match date.day {
        TransitionDay::Mwd(month, week, day) => {
            // Week 5 is the last such weekday of the month; POSIX counts
            // Sunday as 0.
            let day_of_week = if day == 0 { 7 } else { i32::from(day) };
            let (day_of_month, advance) = if week == 5 {
                (-1, false)
            } else {
                (1 + 7 * (i32::from(week) - 1), true)
            };
            OfYear::new(
                TransitionMode::Wall,
                i32::from(month),
                day_of_month,
                day_of_week,
                advance,
                millis,
            )?
        }
        TransitionDay::NoLeap(day) => {
            let month = MONTH_STARTS
                .iter()
                .position(|start| *start >= day)
                .unwrap_or(12)
                .max(1);
            let day_of_month = i32::from(day - *MONTH_STARTS.get(month - 1).calendar_unwrap()?);
            OfYear::new(
                TransitionMode::Wall,
                month as i32,
                day_of_month,
                0,
                false,
                millis,
            )?
        }
        // Zero-based days counting February 29th have no fixed month and day.
        TransitionDay::WithLeap(_) => return Ok(None),
    };
    Ok(Some(of_year))
}
