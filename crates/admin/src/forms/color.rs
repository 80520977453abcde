//! Color create/edit form.

use serde::Deserialize;

use storeroom_core::{ColorPayload, HexColor, HexColorError};

use super::{FieldErrors, required_text};

/// Raw color form fields as posted.
#[derive(Debug, Clone, Deserialize)]
pub struct ColorForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl ColorForm {
    /// Validate every field, collecting all failures.
    ///
    /// The value must be a `#`-prefixed hex code of at least four
    /// characters; the swatch rendered next to the input depends on it.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each field that failed.
    pub fn validate(&self) -> Result<ColorPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(&self.name, "name", "Name", &mut errors);

        let value = match HexColor::parse(self.value.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                errors.insert("value", hex_error_message(&e));
                None
            }
        };

        match (name, value) {
            (Some(name), Some(value)) => Ok(ColorPayload { name, value }),
            _ => Err(errors),
        }
    }
}

fn hex_error_message(error: &HexColorError) -> String {
    match error {
        HexColorError::Empty => "Value is required".to_string(),
        HexColorError::MissingHashPrefix => "String must be a valid hex code".to_string(),
        HexColorError::TooShort { min } => {
            format!("Value must be at least {min} characters")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_color_form() {
        let form = ColorForm {
            name: " Crimson ".to_string(),
            value: " #DC143C ".to_string(),
        };

        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Crimson");
        assert_eq!(payload.value.as_str(), "#DC143C");
    }

    #[test]
    fn test_hex_without_hash_is_rejected() {
        let form = ColorForm {
            name: "Crimson".to_string(),
            value: "DC143C".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("value"), Some("String must be a valid hex code"));
    }

    #[test]
    fn test_short_hex_is_rejected() {
        let form = ColorForm {
            name: "Red".to_string(),
            value: "#f".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("value"), Some("Value must be at least 4 characters"));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let form = ColorForm {
            name: String::new(),
            value: String::new(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("value"), Some("Value is required"));
    }

    #[test]
    fn test_shorthand_hex_is_accepted() {
        let form = ColorForm {
            name: "White".to_string(),
            value: "#fff".to_string(),
        };

        assert!(form.validate().is_ok());
    }
}
