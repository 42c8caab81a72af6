//! Time zones: mappings from an instant to an offset from UTC.
//!
//! A [`DateTimeZone`] is either fixed, with one constant offset, or built
//! from a table of transitions with an optional pair of yearly recurring
//! rules for the open-ended future. Zones are immutable and shared; the
//! only interior state is the per-period memo of [cached zones][cached].
//!
//! Local instants are the millisecond counts a wall clock in the zone
//! would show, read as if they were UTC.

mod builder;
mod cached;
mod precalculated;
mod provider;
mod recurrence;

#[cfg(feature = "tzdb")]
mod tzdb;

use core::{fmt, hash};
use std::sync::{Arc, LazyLock};

use tinystr::{tinystr, TinyAsciiStr};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    error::ErrorMessage,
    fields::offset_to_add,
    utils::safe_subtract,
    CalendarError, CalendarResult, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND,
};

pub use builder::ZoneBuilder;
pub use provider::{FixedOffsetProvider, ZoneCache, ZoneProvider};
pub use recurrence::{OfYear, Recurrence, TransitionMode};

#[cfg(feature = "tzdb")]
pub use tzdb::TzdbProvider;

pub(crate) use cached::CachedZone;
pub(crate) use precalculated::{PrecalculatedZone, Transition};
pub(crate) use recurrence::DstZone;

/// A short name for the offset in effect, such as "EST" or "+05:30".
pub type NameKey = TinyAsciiStr<16>;

const UTC_NAME: NameKey = tinystr!(16, "UTC");

/// The largest magnitude of a fixed offset.
const MAX_OFFSET_MILLIS: i64 = MS_PER_DAY - 1;

/// The queries every kind of zone answers.
///
/// Transition queries return `instant` itself when there is no further
/// transition in that direction.
pub(crate) trait ZoneRules: fmt::Debug + Send + Sync {
    fn name_key(&self, instant: i64) -> NameKey;

    fn offset(&self, instant: i64) -> i32;

    fn standard_offset(&self, instant: i64) -> i32;

    fn next_transition(&self, instant: i64) -> i64;

    /// The last instant before the previous transition.
    fn previous_transition(&self, instant: i64) -> i64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FixedZone {
    name_key: NameKey,
    wall: i32,
    standard: i32,
}

impl ZoneRules for FixedZone {
    fn name_key(&self, _: i64) -> NameKey {
        self.name_key
    }

    fn offset(&self, _: i64) -> i32 {
        self.wall
    }

    fn standard_offset(&self, _: i64) -> i32 {
        self.standard
    }

    fn next_transition(&self, instant: i64) -> i64 {
        instant
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        instant
    }
}

impl ZoneRules for DstZone {
    fn name_key(&self, instant: i64) -> NameKey {
        DstZone::name_key(self, instant)
    }

    fn offset(&self, instant: i64) -> i32 {
        DstZone::offset(self, instant)
    }

    fn standard_offset(&self, _: i64) -> i32 {
        self.standard
    }

    fn next_transition(&self, instant: i64) -> i64 {
        DstZone::next_transition(self, instant)
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        DstZone::previous_transition(self, instant)
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum ZoneKind {
    Fixed(FixedZone),
    Precalculated(PrecalculatedZone),
    /// Recurring rules only, without a transition table.
    Dst(DstZone),
    Cached(CachedZone),
}

impl ZoneKind {
    fn rules(&self) -> &dyn ZoneRules {
        match self {
            Self::Fixed(zone) => zone,
            Self::Precalculated(zone) => zone,
            Self::Dst(zone) => zone,
            Self::Cached(zone) => zone,
        }
    }
}

#[derive(Debug, PartialEq)]
struct ZoneInner {
    id: String,
    kind: ZoneKind,
}

/// A time zone.
///
/// Zones compare equal when they have the same id and the same rules, and
/// hash by id.
#[derive(Clone)]
pub struct DateTimeZone(Arc<ZoneInner>);

static UTC: LazyLock<DateTimeZone> = LazyLock::new(|| {
    DateTimeZone::new(
        "UTC",
        ZoneKind::Fixed(FixedZone {
            name_key: UTC_NAME,
            wall: 0,
            standard: 0,
        }),
    )
});

impl DateTimeZone {
    pub(crate) fn new(id: &str, kind: ZoneKind) -> Self {
        Self(Arc::new(ZoneInner {
            id: id.into(),
            kind,
        }))
    }

    pub(crate) fn fixed(id: &str, name_key: NameKey, wall: i32, standard: i32) -> Self {
        Self::new(
            id,
            ZoneKind::Fixed(FixedZone {
                name_key,
                wall,
                standard,
            }),
        )
    }

    /// The zone with a zero offset.
    #[must_use]
    pub fn utc() -> Self {
        UTC.clone()
    }

    /// Returns the zone for an id: "UTC", an offset such as "+05:30", or an
    /// id known to the process-wide zone provider.
    pub fn for_id(id: &str) -> CalendarResult<Self> {
        if id == "UTC" {
            return Ok(Self::utc());
        }
        provider::ZONE_CACHE
            .zone(id)?
            .ok_or(CalendarError::argument().with_enum(ErrorMessage::ZoneIdInvalid))
    }

    /// Returns the fixed zone with the given offset, which must be less than
    /// a day in magnitude.
    pub fn for_offset_millis(offset: i32) -> CalendarResult<Self> {
        if i64::from(offset).abs() > MAX_OFFSET_MILLIS {
            return Err(CalendarError::argument().with_enum(ErrorMessage::OffsetOutOfRange));
        }
        if offset == 0 {
            return Ok(Self::utc());
        }
        Self::for_id(&OffsetId(offset).write_to_string())
    }

    /// Returns the fixed zone `hours` and `minutes` away from UTC. The
    /// minutes take the sign of the hours, so (-5, 30) is "-05:30".
    pub fn for_offset_hours_minutes(hours: i32, minutes: i32) -> CalendarResult<Self> {
        if !(-23..=23).contains(&hours) || !(-59..=59).contains(&minutes) {
            return Err(CalendarError::argument().with_enum(ErrorMessage::OffsetOutOfRange));
        }
        if hours > 0 && minutes < 0 {
            return Err(CalendarError::argument()
                .with_message("Positive hours must not have negative minutes."));
        }
        let minutes = if hours < 0 {
            hours * 60 - minutes.abs()
        } else {
            hours * 60 + minutes
        };
        Self::for_offset_millis(minutes * MS_PER_MINUTE as i32)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    fn rules(&self) -> &dyn ZoneRules {
        self.0.kind.rules()
    }

    /// Whether the offset never changes.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self.0.kind, ZoneKind::Fixed(_))
    }

    /// The name of the offset in effect at `instant`.
    #[must_use]
    pub fn name_key(&self, instant: i64) -> NameKey {
        self.rules().name_key(instant)
    }

    /// The offset in milliseconds to add to `instant` to get local time.
    #[must_use]
    pub fn offset(&self, instant: i64) -> i32 {
        self.rules().offset(instant)
    }

    /// The offset at `instant` excluding any savings.
    #[must_use]
    pub fn standard_offset(&self, instant: i64) -> i32 {
        self.rules().standard_offset(instant)
    }

    #[must_use]
    pub fn is_standard_offset(&self, instant: i64) -> bool {
        self.offset(instant) == self.standard_offset(instant)
    }

    /// The next instant at which the offset or name changes, or `instant`
    /// when there is none.
    #[must_use]
    pub fn next_transition(&self, instant: i64) -> i64 {
        self.rules().next_transition(instant)
    }

    /// The last instant before the previous change of offset or name, or
    /// `instant` when there is none.
    #[must_use]
    pub fn previous_transition(&self, instant: i64) -> i64 {
        self.rules().previous_transition(instant)
    }

    /// The next transition, or `i64::MAX` when there is none.
    fn next_transition_or_max(&self, instant: i64) -> i64 {
        let next = self.next_transition(instant);
        if next == instant {
            i64::MAX
        } else {
            next
        }
    }

    pub fn convert_utc_to_local(&self, instant: i64) -> CalendarResult<i64> {
        offset_to_add(self, instant).map(|(_, local)| local)
    }

    /// The offset to subtract from a local instant to get UTC.
    ///
    /// In an overlap the earlier offset is used. In a gap the offset from
    /// before the gap is used, so the result does not read back as
    /// `local`.
    #[must_use]
    pub fn offset_from_local(&self, local: i64) -> i32 {
        let offset_local = self.offset(local);
        let adjusted = local.saturating_sub(i64::from(offset_local));
        let offset_adjusted = self.offset(adjusted);
        if offset_local != offset_adjusted {
            // The offsets straddle a transition. Pick the earlier one when
            // the local time is in a gap.
            if offset_local < offset_adjusted {
                let next_local = self.next_transition_or_max(adjusted);
                let next_adjusted = self
                    .next_transition_or_max(local.saturating_sub(i64::from(offset_adjusted)));
                if next_local != next_adjusted {
                    return offset_local;
                }
            }
        } else if offset_local >= 0 {
            let prev = self.previous_transition(adjusted);
            if prev < adjusted {
                let offset_prev = self.offset(prev);
                let diff = i64::from(offset_prev) - i64::from(offset_local);
                if adjusted - prev <= diff {
                    return offset_prev;
                }
            }
        }
        offset_adjusted
    }

    /// Converts a local instant to UTC.
    ///
    /// When `strict` is set, a local instant that falls in a gap is an
    /// `IllegalInstant` error. Otherwise the offset from before the gap is
    /// used.
    pub fn convert_local_to_utc(&self, local: i64, strict: bool) -> CalendarResult<i64> {
        let offset_local = self.offset(local);
        let adjusted = safe_subtract(local, i64::from(offset_local))?;
        let mut offset = self.offset(adjusted);
        if offset_local != offset && (strict || offset_local < 0) {
            let next_local = self.next_transition_or_max(adjusted);
            let next_adjusted = self.next_transition_or_max(local.saturating_sub(i64::from(offset)));
            if next_local != next_adjusted {
                if strict {
                    return Err(CalendarError::gap(None, local));
                }
                offset = offset_local;
            }
        }
        subtract_offset(local, offset)
    }

    /// Converts a local instant to UTC, keeping the offset of
    /// `original_utc` when it still applies.
    ///
    /// This keeps ambiguous local times on the same side of an overlap as
    /// the instant they were derived from.
    pub fn convert_local_to_utc_near(
        &self,
        local: i64,
        strict: bool,
        original_utc: i64,
    ) -> CalendarResult<i64> {
        let offset_original = self.offset(original_utc);
        let utc = subtract_offset(local, offset_original)?;
        if self.offset(utc) == offset_original {
            return Ok(utc);
        }
        self.convert_local_to_utc(local, strict)
    }

    /// Whether `local` is skipped by a transition.
    #[must_use]
    pub fn is_local_date_time_gap(&self, local: i64) -> bool {
        if self.is_fixed() {
            return false;
        }
        let offset = self.offset_from_local(local);
        match local.checked_sub(i64::from(offset)) {
            Some(utc) => self.offset(utc) != offset,
            None => false,
        }
    }

    /// Moves an instant inside an overlap to the earlier or later of the two
    /// instants sharing its local time. Instants outside an overlap are
    /// returned unchanged.
    #[must_use]
    pub fn adjust_offset(&self, instant: i64, later: bool) -> i64 {
        let before = instant.saturating_sub(3 * MS_PER_HOUR);
        let after = instant.saturating_add(3 * MS_PER_HOUR);
        let offset_before = i64::from(self.offset(before));
        let offset_after = i64::from(self.offset(after));
        if offset_before <= offset_after {
            return instant;
        }
        let diff = offset_before - offset_after;
        let transition = self.next_transition(before);
        let overlap_start = transition.saturating_sub(diff);
        let overlap_end = transition.saturating_add(diff);
        if instant < overlap_start || instant >= overlap_end {
            return instant;
        }
        if instant - overlap_start >= diff {
            // In the later half.
            if later {
                instant
            } else {
                instant - diff
            }
        } else if later {
            instant + diff
        } else {
            instant
        }
    }
}

fn subtract_offset(local: i64, offset: i32) -> CalendarResult<i64> {
    local
        .checked_sub(i64::from(offset))
        .ok_or(CalendarError::overflow().with_enum(ErrorMessage::OffsetSubtractionOverflow))
}

impl fmt::Debug for DateTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DateTimeZone").field(&self.0.id).finish()
    }
}

impl fmt::Display for DateTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.id)
    }
}

impl PartialEq for DateTimeZone {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for DateTimeZone {}

impl hash::Hash for DateTimeZone {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

/// The id of a fixed offset zone: `±HH:mm`, with seconds and milliseconds
/// only when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OffsetId(pub(crate) i32);

impl OffsetId {
    fn parts(self) -> (char, i64, i64, i64, i64) {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let millis = i64::from(self.0).abs();
        (
            sign,
            millis / MS_PER_HOUR,
            millis % MS_PER_HOUR / MS_PER_MINUTE,
            millis % MS_PER_MINUTE / MS_PER_SECOND,
            millis % MS_PER_SECOND,
        )
    }
}

impl Writeable for OffsetId {
    fn write_to<W: fmt::Write + ?Sized>(&self, sink: &mut W) -> fmt::Result {
        let (sign, hours, minutes, seconds, millis) = self.parts();
        sink.write_char(sign)?;
        write_padded(hours, 2, sink)?;
        sink.write_char(':')?;
        write_padded(minutes, 2, sink)?;
        if seconds == 0 && millis == 0 {
            return Ok(());
        }
        sink.write_char(':')?;
        write_padded(seconds, 2, sink)?;
        if millis == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        write_padded(millis, 3, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let (_, _, _, seconds, millis) = self.parts();
        match (seconds, millis) {
            (0, 0) => LengthHint::exact(6),
            (_, 0) => LengthHint::exact(9),
            _ => LengthHint::exact(13),
        }
    }
}

impl_display_with_writeable!(OffsetId);

fn write_padded<W: fmt::Write + ?Sized>(value: i64, width: u32, sink: &mut W) -> fmt::Result {
    let mut divisor = 10_i64.pow(width - 1);
    while divisor > 0 {
        sink.write_char(char::from(b'0' + (value / divisor % 10) as u8))?;
        divisor /= 10;
    }
    Ok(())
}

/// Parses `±HH`, `±HHmm`, `±HH:mm`, `±HH:mm:ss` or `±HH:mm:ss.SSS`.
pub(crate) fn parse_offset(id: &str) -> Option<i32> {
    let bytes = id.as_bytes();
    let sign = match bytes.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = |range: core::ops::Range<usize>| -> Option<i64> {
        let part = bytes.get(range)?;
        part.iter().try_fold(0_i64, |acc, b| {
            b.is_ascii_digit().then(|| acc * 10 + i64::from(b - b'0'))
        })
    };
    let hours = digits(1..3)?;
    let (minutes, rest) = match bytes.len() {
        3 => (0, 3),
        5 => (digits(3..5)?, 5),
        _ if bytes.get(3) == Some(&b':') => (digits(4..6)?, 6),
        _ => return None,
    };
    let mut millis = hours * MS_PER_HOUR + minutes * MS_PER_MINUTE;
    let rest = &bytes[rest..];
    match rest {
        [] => {}
        [b':', ..] if rest.len() == 3 || (rest.len() == 7 && rest[3] == b'.') => {
            let offset = id.len() - rest.len();
            millis += digits(offset + 1..offset + 3)? * MS_PER_SECOND;
            if rest.len() == 7 {
                millis += digits(offset + 4..offset + 7)?;
            }
        }
        _ => return None,
    }
    if hours > 23 || minutes > 59 || millis > MAX_OFFSET_MILLIS {
        return None;
    }
    i32::try_from(sign * millis).ok()
}

#[cfg(test)]
mod tests;
