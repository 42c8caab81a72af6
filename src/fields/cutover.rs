//! Fields blending a Julian and a Gregorian field at a cutover instant.

use std::sync::Arc;

use crate::{
    chronology::CutoverContext,
    partial::Partial,
    types::DateTimeFieldType,
    CalendarError, CalendarResult,
};

use super::{DateTimeField, DurationField, FieldStrategy, Unit};

/// Reads the Julian field before the cutover and the Gregorian field from
/// it onwards.
///
/// Values set across the cutover are converted to the other calendar when
/// the result lands beyond the gap, and rejected if they do not read back.
/// Precise cutover fields add through the Gregorian field; imprecise ones
/// (years, months, weekyears) add on the side of the starting instant and
/// convert afterwards.
#[derive(Debug)]
pub(crate) struct CutoverField {
    julian: DateTimeField,
    gregorian: DateTimeField,
    context: Arc<CutoverContext>,
    cutover: i64,
    by_weekyear: bool,
    range: Option<DurationField>,
    imprecise: bool,
    duration: Option<DurationField>,
}

impl CutoverField {
    pub(crate) fn new(
        julian: DateTimeField,
        gregorian: DateTimeField,
        context: Arc<CutoverContext>,
        cutover: i64,
    ) -> Self {
        let range = gregorian
            .range_duration_field()
            .or_else(|| julian.range_duration_field());
        Self {
            julian,
            gregorian,
            context,
            cutover,
            by_weekyear: false,
            range,
            imprecise: false,
            duration: None,
        }
    }

    /// An imprecise cutover field, counting in `duration` when given or in
    /// its own linked unit otherwise.
    pub(crate) fn imprecise(
        julian: DateTimeField,
        gregorian: DateTimeField,
        context: Arc<CutoverContext>,
        duration: Option<DurationField>,
    ) -> Self {
        let cutover = context.cutover();
        Self {
            imprecise: true,
            duration,
            ..Self::new(julian, gregorian, context, cutover)
        }
    }

    /// Converts by weekyear, week and day of week rather than by date.
    pub(crate) fn by_weekyear(mut self) -> Self {
        self.by_weekyear = true;
        self
    }

    pub(crate) fn with_range(mut self, range: DurationField) -> Self {
        self.range = Some(range);
        self
    }

    fn julian_to_gregorian(&self, instant: i64) -> CalendarResult<i64> {
        self.context.julian_to_gregorian(instant, self.by_weekyear)
    }

    fn gregorian_to_julian(&self, instant: i64) -> CalendarResult<i64> {
        self.context.gregorian_to_julian(instant, self.by_weekyear)
    }

    fn side(&self, instant: i64) -> &DateTimeField {
        if instant >= self.cutover {
            &self.gregorian
        } else {
            &self.julian
        }
    }

    fn imprecise_add(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        let gap = self.context.gap();
        if instant >= self.cutover {
            let mut instant = self.gregorian.add_long(instant, value)?;
            if instant < self.cutover && instant + gap < self.cutover {
                // The Julian year numbering skips zero.
                let year_type = if self.by_weekyear {
                    DateTimeFieldType::Weekyear
                } else {
                    DateTimeFieldType::Year
                };
                let year = self.context.gregorian_field(year_type);
                if year.get(instant)? <= 0 {
                    instant = year.add(instant, -1)?;
                }
                instant = self.gregorian_to_julian(instant)?;
            }
            Ok(instant)
        } else {
            let instant = self.julian.add_long(instant, value)?;
            if instant >= self.cutover && instant - gap >= self.cutover {
                return self.julian_to_gregorian(instant);
            }
            Ok(instant)
        }
    }
}

impl FieldStrategy for CutoverField {
    fn field_type(&self) -> DateTimeFieldType {
        self.gregorian.field_type()
    }

    fn get(&self, instant: i64) -> CalendarResult<i32> {
        self.side(instant).get(instant)
    }

    fn set(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        let gap = self.context.gap();
        let (instant, ty) = if instant >= self.cutover {
            let mut instant = self.gregorian.set(instant, value)?;
            if instant >= self.cutover {
                return Ok(instant);
            }
            // Only convert if the gap was fully crossed.
            if instant + gap < self.cutover {
                instant = self.gregorian_to_julian(instant)?;
            }
            (instant, self.gregorian.field_type())
        } else {
            let mut instant = self.julian.set(instant, value)?;
            if instant < self.cutover {
                return Ok(instant);
            }
            if instant - gap >= self.cutover {
                instant = self.julian_to_gregorian(instant)?;
            }
            (instant, self.julian.field_type())
        };
        if self.get(instant)? != value {
            return Err(CalendarError::rejected(ty, i64::from(value)));
        }
        Ok(instant)
    }

    fn add(&self, instant: i64, value: i32) -> CalendarResult<i64> {
        self.add_long(instant, i64::from(value))
    }

    fn add_long(&self, instant: i64, value: i64) -> CalendarResult<i64> {
        if self.imprecise {
            return self.imprecise_add(instant, value);
        }
        self.gregorian.add_long(instant, value)
    }

    fn difference_long(&self, minuend: i64, subtrahend: i64) -> CalendarResult<i64> {
        if !self.imprecise {
            return self.gregorian.difference_long(minuend, subtrahend);
        }
        match (minuend >= self.cutover, subtrahend >= self.cutover) {
            (true, true) => self.gregorian.difference_long(minuend, subtrahend),
            (true, false) => self
                .julian
                .difference_long(self.gregorian_to_julian(minuend)?, subtrahend),
            (false, false) => self.julian.difference_long(minuend, subtrahend),
            (false, true) => self
                .gregorian
                .difference_long(self.julian_to_gregorian(minuend)?, subtrahend),
        }
    }

    fn is_leap(&self, instant: i64) -> CalendarResult<bool> {
        self.side(instant).is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> CalendarResult<i32> {
        self.side(instant).leap_amount(instant)
    }

    fn leap_duration(&self) -> Option<DurationField> {
        self.gregorian.leap_duration_field()
    }

    fn duration(&self) -> Unit {
        let gregorian = self.gregorian.duration_field();
        match (&self.duration, self.imprecise) {
            (Some(duration), _) => Unit::Duration(duration.clone()),
            (None, true) => Unit::Linked(gregorian.duration_type(), gregorian.unit_millis()),
            (None, false) => Unit::Duration(gregorian),
        }
    }

    fn range_duration(&self) -> Option<DurationField> {
        self.range.clone()
    }

    fn minimum(&self) -> i32 {
        self.julian.minimum_value()
    }

    fn maximum(&self) -> i32 {
        self.gregorian.maximum_value()
    }

    fn minimum_at(&self, instant: i64) -> CalendarResult<i32> {
        if instant < self.cutover {
            return self.julian.minimum_value_at(instant);
        }
        let min = self.gregorian.minimum_value_at(instant)?;
        if self.imprecise {
            return Ok(min);
        }
        // The cutover may shorten this field, so verify the minimum by setting it.
        if self.gregorian.set(instant, min)? < self.cutover {
            return self.gregorian.get(self.cutover);
        }
        Ok(min)
    }

    fn maximum_at(&self, instant: i64) -> CalendarResult<i32> {
        if instant >= self.cutover {
            return self.gregorian.maximum_value_at(instant);
        }
        let max = self.julian.maximum_value_at(instant)?;
        if self.imprecise {
            return Ok(max);
        }
        if self.julian.set(instant, max)? >= self.cutover {
            return self.julian.get(self.julian.add(self.cutover, -1)?);
        }
        Ok(max)
    }

    fn minimum_for(&self, partial: &Partial) -> i32 {
        self.julian.minimum_value_for(partial)
    }

    fn maximum_for(&self, partial: &Partial) -> i32 {
        self.gregorian.maximum_value_for(partial)
    }

    fn round_floor(&self, instant: i64) -> CalendarResult<i64> {
        if instant < self.cutover {
            return self.julian.round_floor(instant);
        }
        let floor = self.gregorian.round_floor(instant)?;
        if floor < self.cutover && floor + self.context.gap() < self.cutover {
            return self.gregorian_to_julian(floor);
        }
        Ok(floor)
    }

    fn round_ceiling(&self, instant: i64) -> CalendarResult<i64> {
        if instant >= self.cutover {
            return self.gregorian.round_ceiling(instant);
        }
        let ceiling = self.julian.round_ceiling(instant)?;
        if ceiling >= self.cutover && ceiling - self.context.gap() >= self.cutover {
            return self.julian_to_gregorian(ceiling);
        }
        Ok(ceiling)
    }

    fn canonical_text(&self, value: i32) -> Option<&'static str> {
        self.gregorian.canonical_text(value)
    }
}
