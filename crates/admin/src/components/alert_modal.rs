//! Confirmation modal component types.
//!
//! Destructive actions never fire directly; the delete buttons open a
//! confirmation modal and only the modal's confirm button submits. The
//! modal markup ships hidden on first paint and is revealed by script,
//! so a slow script load can never flash it open.

/// Configuration for a confirmation modal.
#[derive(Debug, Clone)]
pub struct AlertModalConfig {
    /// Unique modal identifier.
    pub modal_id: String,
    /// Heading shown in the modal.
    pub title: String,
    /// Supporting copy under the heading.
    pub description: String,
    /// Label on the confirming (destructive) button.
    pub confirm_label: String,
    /// Label on the dismissing button.
    pub cancel_label: String,
}

impl AlertModalConfig {
    /// Standard delete confirmation copy.
    #[must_use]
    pub fn delete_confirmation(modal_id: &str) -> Self {
        Self {
            modal_id: modal_id.to_string(),
            title: "Are you sure?".to_string(),
            description: "This action cannot be undone.".to_string(),
            confirm_label: "Continue".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}
