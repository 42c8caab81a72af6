//! Assembling zones from offset rules.

use crate::{
    chronology::Chronology,
    error::ErrorMessage,
    types::DateTimeFieldType,
    utils::{safe_add, safe_subtract},
    CalendarError, CalendarResult, DateTimeField,
};

use super::{
    CachedZone, DateTimeZone, DstZone, NameKey, OfYear, PrecalculatedZone, Recurrence,
    Transition, ZoneKind, UTC_NAME,
};

/// Transitions are precalculated up to this year unless a recurring tail
/// takes over first.
const DEFAULT_YEAR_LIMIT: i32 = 2100;

fn iso_year() -> DateTimeField {
    Chronology::iso_utc().field(DateTimeFieldType::Year)
}

fn name_key(name: &str) -> CalendarResult<NameKey> {
    NameKey::try_from_str(name)
        .map_err(|_| CalendarError::argument().with_enum(ErrorMessage::NameKeyInvalid))
}

/// A recurrence limited to a span of years.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    recurrence: Recurrence,
    from_year: i32,
    to_year: i32,
}

impl Rule {
    fn next(&self, year: &DateTimeField, instant: i64, standard: i32, savings: i32) -> CalendarResult<i64> {
        let wall = i64::from(standard) + i64::from(savings);
        let current = if instant == i64::MIN {
            i32::MIN
        } else {
            year.get(safe_add(instant, wall)?)?
        };
        let mut test = instant;
        if current < self.from_year {
            // Back off a millisecond in case the recurrence falls exactly
            // on the start of the year.
            test = safe_subtract(year.set(0, self.from_year)?, wall)? - 1;
        }
        let next = self
            .recurrence
            .of_year
            .next(test, standard, savings)?;
        if next > instant && year.get(safe_add(next, wall)?)? > self.to_year {
            return Ok(instant);
        }
        Ok(next)
    }
}

/// The rules in force between two cutovers.
#[derive(Debug, Clone)]
struct RuleSet {
    standard: i32,
    rules: Vec<Rule>,
    initial: Option<(NameKey, i32)>,
    upper: Option<(i32, OfYear)>,
}

impl RuleSet {
    fn new() -> Self {
        Self {
            standard: 0,
            rules: Vec::new(),
            initial: None,
            upper: None,
        }
    }

    fn add_rule(&mut self, rule: Rule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// The transition into this rule set at `first_millis`.
    fn first_transition(&self, first_millis: i64, year_limit: i32) -> CalendarResult<Option<Transition>> {
        if let Some((name_key, savings)) = self.initial {
            return Ok(Some(Transition::new(
                first_millis,
                name_key,
                self.standard + savings,
                self.standard,
            )));
        }

        // Walk the rules up to `first_millis` and take whatever is in effect.
        let mut scratch = self.clone();
        let mut millis = i64::MIN;
        let mut savings = 0;
        let mut first = None;
        while let Some(next) = scratch.next_transition(millis, savings, year_limit)? {
            millis = next.millis;
            if millis == first_millis {
                first = Some(next.at(first_millis));
                break;
            }
            if millis > first_millis {
                if first.is_none() {
                    // Prefer the name of a rule without savings.
                    first = self
                        .rules
                        .iter()
                        .find(|rule| rule.recurrence.savings == 0)
                        .map(|rule| {
                            Transition::new(
                                first_millis,
                                rule.recurrence.name_key,
                                self.standard,
                                self.standard,
                            )
                        })
                        .or(Some(Transition::new(
                            first_millis,
                            next.name_key,
                            self.standard,
                            self.standard,
                        )));
                }
                break;
            }
            first = Some(next.at(first_millis));
            savings = next.wall - next.standard;
        }
        Ok(first)
    }

    /// The next transition after `instant`, dropping rules that have run
    /// out.
    fn next_transition(
        &mut self,
        instant: i64,
        savings: i32,
        year_limit: i32,
    ) -> CalendarResult<Option<Transition>> {
        let year = iso_year();
        let mut next: Option<(usize, i64)> = None;
        let mut kept = Vec::with_capacity(self.rules.len());
        for rule in self.rules.drain(..) {
            let millis = rule.next(&year, instant, self.standard, savings)?;
            if millis <= instant {
                continue;
            }
            // Ties go to the rule added last.
            if next.is_none_or(|(_, best)| millis <= best) {
                next = Some((kept.len(), millis));
            }
            kept.push(rule);
        }
        self.rules = kept;

        let Some((index, millis)) = next else {
            return Ok(None);
        };
        if year.get(millis)? >= year_limit {
            return Ok(None);
        }
        if millis >= self.upper_limit(savings)? {
            return Ok(None);
        }
        let recurrence = &self.rules[index].recurrence;
        Ok(Some(Transition::new(
            millis,
            recurrence.name_key,
            self.standard + recurrence.savings,
            self.standard,
        )))
    }

    fn upper_limit(&self, savings: i32) -> CalendarResult<i64> {
        match self.upper {
            Some((year, of_year)) => of_year.in_year(year, self.standard, savings),
            None => Ok(i64::MAX),
        }
    }

    /// Two rules recurring forever become the tail of the zone.
    fn tail_zone(&self) -> Option<DstZone> {
        match self.rules.as_slice() {
            [start, end] if start.to_year == i32::MAX && end.to_year == i32::MAX => Some(DstZone {
                standard: self.standard,
                start: start.recurrence,
                end: end.recurrence,
            }),
            _ => None,
        }
    }
}

/// Appends `transition` unless it changes nothing. A transition at the
/// same local time as the last one replaces it.
fn add_transition(transitions: &mut Vec<Transition>, transition: Transition) -> bool {
    let Some(last) = transitions.last().copied() else {
        transitions.push(transition);
        return true;
    };
    if !transition.is_transition_from(Some(&last)) {
        return false;
    }
    let offset_for_last = transitions
        .len()
        .checked_sub(2)
        .map_or(0, |index| transitions[index].wall);
    let last_local = last.millis.saturating_add(i64::from(offset_for_last));
    let new_local = transition.millis.saturating_add(i64::from(last.wall));
    if new_local != last_local {
        transitions.push(transition);
        return true;
    }
    transitions.pop();
    add_transition(transitions, transition)
}

/// Builds a zone from a sequence of rule sets separated by cutovers.
///
/// ```rust
/// use chronology_rs::{
///     zone::{OfYear, TransitionMode},
///     ZoneBuilder, MS_PER_HOUR,
/// };
///
/// let hour = MS_PER_HOUR as i32;
/// // The last Sunday of March and of October at 01:00 UTC.
/// let spring = OfYear::new(TransitionMode::Utc, 3, -1, 7, false, hour).unwrap();
/// let autumn = OfYear::new(TransitionMode::Utc, 10, -1, 7, false, hour).unwrap();
///
/// let mut builder = ZoneBuilder::new();
/// builder.set_standard_offset(hour);
/// builder.add_recurring_savings("CEST", hour, 1981, i32::MAX, spring).unwrap();
/// builder.add_recurring_savings("CET", 0, 1981, i32::MAX, autumn).unwrap();
/// let zone = builder.to_date_time_zone("Europe/Example").unwrap();
/// assert!(!zone.is_fixed());
/// ```
#[derive(Debug, Clone)]
pub struct ZoneBuilder {
    rule_sets: Vec<RuleSet>,
    year_limit: i32,
}

impl Default for ZoneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rule_sets: Vec::new(),
            year_limit: DEFAULT_YEAR_LIMIT,
        }
    }

    /// Sets the year at which precalculation stops when the rules never
    /// settle into a recurring pair.
    pub fn with_year_limit(&mut self, year_limit: i32) -> &mut Self {
        self.year_limit = year_limit;
        self
    }

    /// Ends the current rule set at `of_year` in `year` and starts a new one.
    pub fn add_cutover(&mut self, year: i32, of_year: OfYear) -> &mut Self {
        if let Some(last) = self.rule_sets.last_mut() {
            last.upper = Some((year, of_year));
        }
        self.rule_sets.push(RuleSet::new());
        self
    }

    fn last_rule_set(&mut self) -> &mut RuleSet {
        if self.rule_sets.is_empty() {
            self.rule_sets.push(RuleSet::new());
        }
        let last = self.rule_sets.len() - 1;
        &mut self.rule_sets[last]
    }

    /// Sets the standard offset of the current rule set.
    pub fn set_standard_offset(&mut self, standard: i32) -> &mut Self {
        self.last_rule_set().standard = standard;
        self
    }

    /// Uses one name and savings amount for the whole current rule set.
    pub fn set_fixed_savings(&mut self, name: &str, savings: i32) -> CalendarResult<&mut Self> {
        self.last_rule_set().initial = Some((name_key(name)?, savings));
        Ok(self)
    }

    /// Adds savings that start each year from `from_year` to `to_year`
    /// inclusive on `of_year`. Use `i32::MAX` for rules still in force.
    pub fn add_recurring_savings(
        &mut self,
        name: &str,
        savings: i32,
        from_year: i32,
        to_year: i32,
        of_year: OfYear,
    ) -> CalendarResult<&mut Self> {
        if from_year <= to_year {
            let recurrence = Recurrence::new(of_year, name_key(name)?, savings);
            self.last_rule_set().add_rule(Rule {
                recurrence,
                from_year,
                to_year,
            });
        }
        Ok(self)
    }

    /// Compiles the rules into a zone.
    ///
    /// A single offset becomes a fixed zone. A transition table whose
    /// transitions are far enough apart is wrapped in a period cache.
    pub fn to_date_time_zone(&self, id: &str) -> CalendarResult<DateTimeZone> {
        let mut transitions: Vec<Transition> = Vec::new();
        let mut tail = None;
        let mut millis = i64::MIN;

        let count = self.rule_sets.len();
        for (index, rule_set) in self.rule_sets.iter().enumerate() {
            let Some(first) = rule_set.first_transition(millis, self.year_limit)? else {
                continue;
            };
            add_transition(&mut transitions, first);
            millis = first.millis;
            let mut savings = first.wall - first.standard;

            let mut rule_set = rule_set.clone();
            while let Some(next) = rule_set.next_transition(millis, savings, self.year_limit)? {
                if add_transition(&mut transitions, next) && tail.is_some() {
                    // One transition past the start of the tail makes a
                    // clean seam.
                    break;
                }
                millis = next.millis;
                savings = next.wall - next.standard;
                if tail.is_none() && index == count - 1 {
                    tail = rule_set.tail_zone();
                }
            }
            millis = rule_set.upper_limit(savings)?;
        }

        crate::calendar_assert!(
            transitions.windows(2).all(|pair| pair[0].millis < pair[1].millis),
            "Transitions of {id} are out of order"
        );

        #[cfg(feature = "log")]
        log::debug!(
            "Compiled zone {id}: {} transitions, recurring tail: {}",
            transitions.len(),
            tail.is_some()
        );

        match (transitions.as_slice(), tail) {
            ([], Some(tail)) => Ok(DateTimeZone::new(id, ZoneKind::Dst(tail))),
            ([], None) => Ok(DateTimeZone::fixed(id, UTC_NAME, 0, 0)),
            ([only], None) => Ok(DateTimeZone::fixed(
                id,
                only.name_key,
                only.wall,
                only.standard,
            )),
            (_, tail) => {
                let zone = PrecalculatedZone::try_new(&transitions, tail)?;
                if zone.is_cachable() {
                    return Ok(DateTimeZone::new(id, ZoneKind::Cached(CachedZone::new(zone))));
                }
                Ok(DateTimeZone::new(id, ZoneKind::Precalculated(zone)))
            }
        }
    }
}
