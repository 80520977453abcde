//! Form payloads and validation.
//!
//! Each entity page posts a plain HTML form. The raw fields deserialize
//! into a `*Form` struct here, and `validate()` either produces the typed
//! payload the platform client sends or a set of field-scoped messages for
//! re-rendering the form. Nothing reaches the platform until every field
//! passes.

pub mod billboard;
pub mod color;
pub mod size;
pub mod store;

pub use billboard::BillboardForm;
pub use color::ColorForm;
pub use size::SizeForm;
pub use store::StoreForm;

use std::collections::BTreeMap;

/// Validation messages keyed by input name.
///
/// `BTreeMap` keeps iteration order stable so re-rendered forms show
/// errors in a predictable order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Message for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Message for one field, flattened for templates.
    #[must_use]
    pub fn display(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Trim a text field and require it non-empty.
///
/// Records "`{label}` is required" against `field` when the trimmed value
/// is empty.
pub(crate) fn required_text(
    value: &str,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, format!("{label} is required"));
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        let mut errors = FieldErrors::new();
        let value = required_text("  Summer Sale  ", "label", "Label", &mut errors);

        assert_eq!(value.as_deref(), Some("Summer Sale"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_text_rejects_whitespace_only() {
        let mut errors = FieldErrors::new();
        let value = required_text("   ", "label", "Label", &mut errors);

        assert!(value.is_none());
        assert_eq!(errors.get("label"), Some("Label is required"));
    }

    #[test]
    fn test_display_flattens_missing_field_to_empty() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Name is required");

        assert_eq!(errors.display("name"), "Name is required");
        assert_eq!(errors.display("value"), "");
    }
}
