//! Partial date-time values.
//!
//! A [`Partial`] holds a subset of date-time field values without an
//! instant. It is used to ask fields for bounds that depend on the other
//! supplied values, and to resolve values onto an instant with
//! [`Chronology::set_partial`][crate::Chronology::set_partial].

use core::cmp::Ordering;

use crate::types::DateTimeFieldType;

/// An ordered set of `(field, value)` pairs, largest field first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partial {
    values: Vec<(DateTimeFieldType, i32)>,
}

impl Partial {
    /// Creates an empty partial.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Returns a copy of this partial with `field` set to `value`,
    /// replacing any existing value for the field.
    #[must_use]
    pub fn with(mut self, field: DateTimeFieldType, value: i32) -> Self {
        match self
            .values
            .binary_search_by(|(existing, _)| compare_fields(*existing, field))
        {
            Ok(index) => self.values[index].1 = value,
            Err(index) => self.values.insert(index, (field, value)),
        }
        self
    }

    /// Returns a copy of this partial without `field`.
    #[must_use]
    pub fn without(mut self, field: DateTimeFieldType) -> Self {
        self.values.retain(|(existing, _)| *existing != field);
        self
    }

    /// Returns the value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: DateTimeFieldType) -> Option<i32> {
        self.values
            .iter()
            .find(|(existing, _)| *existing == field)
            .map(|(_, value)| *value)
    }

    /// Returns whether `field` is present.
    #[must_use]
    pub fn supports(&self, field: DateTimeFieldType) -> bool {
        self.get(field).is_some()
    }

    /// Iterates over the fields, largest first.
    pub fn iter(&self) -> impl Iterator<Item = (DateTimeFieldType, i32)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(DateTimeFieldType, i32)> for Partial {
    fn from_iter<T: IntoIterator<Item = (DateTimeFieldType, i32)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |partial, (field, value)| partial.with(field, value))
    }
}

// Larger duration first, then larger range, with unbounded ranges leading.
fn compare_fields(a: DateTimeFieldType, b: DateTimeFieldType) -> Ordering {
    a.duration_type()
        .cmp(&b.duration_type())
        .then_with(|| a.range_type().cmp(&b.range_type()))
        .then_with(|| a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_ordered_largest_first() {
        let partial = Partial::new()
            .with(DateTimeFieldType::DayOfMonth, 5)
            .with(DateTimeFieldType::Year, 2020)
            .with(DateTimeFieldType::HourOfDay, 3)
            .with(DateTimeFieldType::MonthOfYear, 2);
        let order: Vec<_> = partial.iter().map(|(ty, _)| ty).collect();
        assert_eq!(
            order,
            [
                DateTimeFieldType::Year,
                DateTimeFieldType::MonthOfYear,
                DateTimeFieldType::DayOfMonth,
                DateTimeFieldType::HourOfDay,
            ]
        );
    }

    #[test]
    fn with_replaces_existing_value() {
        let partial = Partial::new()
            .with(DateTimeFieldType::Year, 2020)
            .with(DateTimeFieldType::Year, 2021);
        assert_eq!(partial.len(), 1);
        assert_eq!(partial.get(DateTimeFieldType::Year), Some(2021));
        assert!(partial.without(DateTimeFieldType::Year).is_empty());
    }
}
