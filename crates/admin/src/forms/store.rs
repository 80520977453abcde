//! Store create/rename form.
//!
//! Used by both the dashboard's new-store modal and the settings page.

use serde::Deserialize;

use storeroom_core::StorePayload;

use super::{FieldErrors, required_text};

/// Raw store form fields as posted.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreForm {
    #[serde(default)]
    pub name: String,
}

impl StoreForm {
    /// Validate the store name.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` when the name is empty.
    pub fn validate(&self) -> Result<StorePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        required_text(&self.name, "name", "Name", &mut errors)
            .map(|name| StorePayload { name })
            .ok_or(errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_store_form() {
        let form = StoreForm {
            name: " Outlet ".to_string(),
        };

        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Outlet");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let form = StoreForm {
            name: "\t".to_string(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
    }
}
