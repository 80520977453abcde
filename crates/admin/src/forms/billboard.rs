//! Billboard create/edit form.

use serde::Deserialize;

use storeroom_core::BillboardPayload;

use super::{FieldErrors, required_text};

/// Raw billboard form fields as posted.
#[derive(Debug, Clone, Deserialize)]
pub struct BillboardForm {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub image_url: String,
}

impl BillboardForm {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each field that failed.
    pub fn validate(&self) -> Result<BillboardPayload, FieldErrors> {
        let mut errors = FieldErrors::new();

        let label = required_text(&self.label, "label", "Label", &mut errors);
        let image_url = required_text(&self.image_url, "image_url", "Background image", &mut errors);

        match (label, image_url) {
            (Some(label), Some(image_url)) => Ok(BillboardPayload { label, image_url }),
            _ => Err(errors),
        }
    }
}
