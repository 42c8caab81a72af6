//! A memo of zone lookups in periods of 2^32 milliseconds (about 49.7 days).

use core::fmt;
use std::sync::{Arc, RwLock};

use super::{NameKey, PrecalculatedZone, ZoneRules};

const CACHE_SLOTS: usize = 512;

const PERIOD_MASK: i64 = 0xFFFF_FFFF;

#[derive(Debug, Clone, Copy)]
struct Span {
    start: i64,
    name_key: NameKey,
    offset: i32,
    standard: i32,
}

/// Every transition in one period, with the offsets in effect from each.
#[derive(Debug)]
struct Period {
    key: i64,
    /// Never empty; the first span starts at the period start.
    spans: Vec<Span>,
}

impl Period {
    fn span(&self, instant: i64) -> &Span {
        let index = self.spans.partition_point(|span| span.start <= instant);
        &self.spans[index.saturating_sub(1)]
    }
}

/// Wraps a precalculated zone with a fixed-size table of periods, slotted
/// by the high bits of the instant. Transition queries are not cached.
pub(crate) struct CachedZone {
    zone: PrecalculatedZone,
    slots: Box<[RwLock<Option<Arc<Period>>>]>,
}

impl CachedZone {
    pub(crate) fn new(zone: PrecalculatedZone) -> Self {
        Self {
            zone,
            slots: (0..CACHE_SLOTS).map(|_| RwLock::new(None)).collect(),
        }
    }

    fn span(&self, instant: i64, span: impl FnOnce(&Span) -> i32) -> i32 {
        span(self.period(instant).span(instant))
    }

    fn period(&self, instant: i64) -> Arc<Period> {
        let key = instant >> 32;
        let slot = &self.slots[(key as usize) & (CACHE_SLOTS - 1)];
        if let Ok(cached) = slot.read() {
            if let Some(period) = cached.as_ref().filter(|period| period.key == key) {
                return period.clone();
            }
        }
        let period = Arc::new(self.create_period(instant));
        // A poisoned slot only loses the memo.
        if let Ok(mut cached) = slot.write() {
            *cached = Some(period.clone());
        }
        period
    }

    fn create_period(&self, instant: i64) -> Period {
        let mut start = instant & !PERIOD_MASK;
        let end = start | PERIOD_MASK;
        let mut spans = vec![self.span_at(start)];
        loop {
            let next = self.zone.next_transition(start);
            if next == start || next > end {
                break;
            }
            start = next;
            spans.push(self.span_at(start));
        }
        Period {
            key: instant >> 32,
            spans,
        }
    }

    fn span_at(&self, start: i64) -> Span {
        Span {
            start,
            name_key: self.zone.name_key(start),
            offset: self.zone.offset(start),
            standard: self.zone.standard_offset(start),
        }
    }
}

impl ZoneRules for CachedZone {
    fn name_key(&self, instant: i64) -> NameKey {
        self.period(instant).span(instant).name_key
    }

    fn offset(&self, instant: i64) -> i32 {
        self.span(instant, |span| span.offset)
    }

    fn standard_offset(&self, instant: i64) -> i32 {
        self.span(instant, |span| span.standard)
    }

    fn next_transition(&self, instant: i64) -> i64 {
        self.zone.next_transition(instant)
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        self.zone.previous_transition(instant)
    }
}

impl fmt::Debug for CachedZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedZone")
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CachedZone {
    fn eq(&self, other: &Self) -> bool {
        self.zone == other.zone
    }
}
