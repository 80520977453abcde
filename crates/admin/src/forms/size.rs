//! Size create/edit form.

use serde::Deserialize;

use storeroom_core::SizePayload;

use super::{FieldErrors, required_text};

/// Raw size form fields as posted.
#[derive(Debug, Clone, Deserialize)]
pub struct SizeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl SizeForm {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each field that failed.
    pub fn validate(&self) -> Result<SizePayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = required_text(&self.name, "name", "Name", &mut errors);
        let value = required_text(&self.value, "value", "Value", &mut errors);

        match (name, value) {
            (Some(name), Some(value)) => Ok(SizePayload { name, value }),
            _ => Err(errors),
        }
    }
}
