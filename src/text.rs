//! The boundary to an external text layer.
//!
//! The engine never formats or parses locale text itself. A locale layer
//! implements [`FieldTextProvider`] and is consulted by
//! [`DateTimeField::as_text`][crate::DateTimeField::as_text]; without a
//! provider, fields render their canonical form.

use crate::types::DateTimeFieldType;

/// Maps a field value to display text.
pub trait FieldTextProvider {
    /// Returns the full text for `value` of `field`, or `None` to fall back
    /// to the canonical form.
    fn text(&self, field: DateTimeFieldType, value: i32) -> Option<String>;

    /// Returns the short text for `value` of `field`.
    fn short_text(&self, field: DateTimeFieldType, value: i32) -> Option<String> {
        self.text(field, value)
    }
}

/// A provider that always falls back to canonical values.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalText;

impl FieldTextProvider for CanonicalText {
    fn text(&self, _field: DateTimeFieldType, _value: i32) -> Option<String> {
        None
    }
}
