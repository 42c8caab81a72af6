//! Zones backed by a table of transitions.

use crate::{error::ErrorMessage, CalendarError, CalendarResult, MS_PER_DAY};

use super::{DstZone, NameKey, ZoneRules, UTC_NAME};

/// A change of offset or name at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) millis: i64,
    pub(crate) name_key: NameKey,
    pub(crate) wall: i32,
    pub(crate) standard: i32,
}

impl Transition {
    pub(crate) fn new(millis: i64, name_key: NameKey, wall: i32, standard: i32) -> Self {
        Self {
            millis,
            name_key,
            wall,
            standard,
        }
    }

    /// The same offsets and name at another instant.
    pub(crate) fn at(self, millis: i64) -> Self {
        Self { millis, ..self }
    }

    /// Whether this transition follows `other` and changes something.
    pub(crate) fn is_transition_from(&self, other: Option<&Transition>) -> bool {
        let Some(other) = other else {
            return true;
        };
        self.millis > other.millis
            && (self.wall != other.wall
                || self.standard != other.standard
                || self.name_key != other.name_key)
    }
}

/// Transitions in ascending order, followed by an optional recurring tail.
///
/// Before the first transition the zone reads as UTC. After the last one
/// the tail applies, or the last transition's offsets when there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrecalculatedZone {
    transitions: Vec<i64>,
    wall: Vec<i32>,
    standard: Vec<i32>,
    names: Vec<NameKey>,
    tail: Option<DstZone>,
}

impl PrecalculatedZone {
    pub(crate) fn try_new(transitions: &[Transition], tail: Option<DstZone>) -> CalendarResult<Self> {
        let mut last = None;
        for transition in transitions {
            if !transition.is_transition_from(last) {
                return Err(CalendarError::argument().with_enum(ErrorMessage::TransitionsUnordered));
            }
            last = Some(transition);
        }
        Ok(Self {
            transitions: transitions.iter().map(|t| t.millis).collect(),
            wall: transitions.iter().map(|t| t.wall).collect(),
            standard: transitions.iter().map(|t| t.standard).collect(),
            names: transitions.iter().map(|t| t.name_key).collect(),
            tail,
        })
    }

    /// Whether a period cache pays off: always with a tail, otherwise when
    /// transitions closer than two years apart are at least 25 days apart
    /// on average.
    pub(crate) fn is_cachable(&self) -> bool {
        if self.tail.is_some() {
            return true;
        }
        if self.transitions.len() <= 1 {
            return false;
        }
        const TWO_YEARS: i64 = (366 + 365) * MS_PER_DAY;
        let (total, count) = self
            .transitions
            .windows(2)
            .map(|pair| pair[1].saturating_sub(pair[0]))
            .filter(|diff| *diff < TWO_YEARS)
            .fold((0_i128, 0_i128), |(total, count), diff| {
                (total + i128::from(diff), count + 1)
            });
        count > 0 && total / count >= 25 * i128::from(MS_PER_DAY)
    }

    /// Looks up the table entry in effect at `instant`: `Ok(index)` within
    /// the table, `Err(true)` before it and `Err(false)` after it.
    fn lookup(&self, instant: i64) -> Result<usize, bool> {
        match self.transitions.binary_search(&instant) {
            Ok(index) => Ok(index),
            Err(0) => Err(true),
            Err(index) if index < self.transitions.len() => Ok(index - 1),
            Err(_) => Err(false),
        }
    }

    fn last(&self) -> usize {
        self.transitions.len().saturating_sub(1)
    }
}

impl ZoneRules for PrecalculatedZone {
    fn name_key(&self, instant: i64) -> NameKey {
        match (self.lookup(instant), &self.tail) {
            (Ok(index), _) => self.names[index],
            (Err(true), _) => UTC_NAME,
            (Err(false), Some(tail)) => tail.name_key(instant),
            (Err(false), None) => self.names[self.last()],
        }
    }

    fn offset(&self, instant: i64) -> i32 {
        match (self.lookup(instant), &self.tail) {
            (Ok(index), _) => self.wall[index],
            (Err(true), _) => 0,
            (Err(false), Some(tail)) => tail.offset(instant),
            (Err(false), None) => self.wall[self.last()],
        }
    }

    fn standard_offset(&self, instant: i64) -> i32 {
        match (self.lookup(instant), &self.tail) {
            (Ok(index), _) => self.standard[index],
            (Err(true), _) => 0,
            (Err(false), Some(tail)) => tail.standard,
            (Err(false), None) => self.standard[self.last()],
        }
    }

    fn next_transition(&self, instant: i64) -> i64 {
        let index = match self.transitions.binary_search(&instant) {
            Ok(index) => index + 1,
            Err(index) => index,
        };
        if let Some(next) = self.transitions.get(index) {
            return *next;
        }
        let Some(tail) = &self.tail else {
            return instant;
        };
        let end = self.transitions.last().copied().unwrap_or(instant);
        tail.next_transition(instant.max(end))
    }

    fn previous_transition(&self, instant: i64) -> i64 {
        let index = match self.transitions.binary_search(&instant) {
            Ok(_) => return instant.checked_sub(1).unwrap_or(instant),
            Err(index) => index,
        };
        if index < self.transitions.len() {
            if index > 0 {
                if let Some(prev) = self.transitions[index - 1].checked_sub(1) {
                    return prev;
                }
            }
            return instant;
        }
        if let Some(tail) = &self.tail {
            let prev = tail.previous_transition(instant);
            if prev < instant {
                return prev;
            }
        }
        match self.transitions.last().and_then(|last| last.checked_sub(1)) {
            Some(prev) => prev,
            None => instant,
        }
    }
}
