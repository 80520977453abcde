//! Session-stored identity types.
//!
//! The dashboard performs no authentication of its own. A fronting
//! identity proxy asserts who the operator is via request headers, and
//! the verified result is cached in the session between requests.

use serde::{Deserialize, Serialize};

use storeroom_core::Email;

/// The operator asserted by the identity proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentOperator {
    /// Operator's email address, as asserted by the proxy.
    pub email: Email,
    /// Display name, when the proxy forwards one.
    pub name: Option<String>,
}

impl CurrentOperator {
    /// Name to show in the chrome: display name when present, otherwise
    /// the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.email.as_str())
    }
}

/// Session keys for identity data.
pub mod keys {
    /// Key for the operator identity cached from proxy headers.
    pub const CURRENT_OPERATOR: &str = "current_operator";
}
