//! HTTP route handlers for the admin dashboard.
//!
//! # Route Structure
//!
//! ```text
//! # Dashboard (store directory)
//! GET  /                                    - Store overview, newest first
//! POST /stores                              - Create a store
//! GET  /{store_id}                          - Redirect to the store's billboards
//!
//! # Billboards
//! GET  /{store_id}/billboards               - Billboard listing
//! POST /{store_id}/billboards               - Create billboard
//! GET  /{store_id}/billboards/new           - Blank billboard form
//! GET  /{store_id}/billboards/{id}          - Pre-populated billboard form
//! POST /{store_id}/billboards/{id}          - Update billboard
//! POST /{store_id}/billboards/{id}/delete   - Delete billboard (confirmed)
//!
//! # Colors (same shape)
//! GET|POST /{store_id}/colors[...]
//!
//! # Sizes (same shape)
//! GET|POST /{store_id}/sizes[...]
//!
//! # Orders (read-only)
//! GET  /{store_id}/orders                   - Order listing
//!
//! # Settings
//! GET  /{store_id}/settings                 - Store settings form
//! POST /{store_id}/settings                 - Rename store
//! POST /{store_id}/settings/delete          - Delete store (confirmed)
//! ```
//!
//! Health probes (`/health`, `/health/ready`) are registered during
//! router assembly in `crate::app`, outside the operator-facing pages.

pub mod billboards;
pub mod colors;
pub mod dashboard;
pub mod orders;
pub mod settings;
pub mod sizes;

use axum::Router;

use storeroom_core::Store;

use crate::{models::CurrentOperator, state::AppState};

/// Build the full dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .merge(billboards::router())
        .merge(colors::router())
        .merge(sizes::router())
        .merge(orders::router())
        .merge(settings::router())
}

/// Chrome context shared by every store-scoped page: the sidebar, the
/// store name in the header, and the signed-in operator.
#[derive(Debug, Clone)]
pub struct StoreContext {
    pub store_id: String,
    pub store_name: String,
    /// Sidebar section to highlight: "billboards", "colors", "sizes",
    /// "orders", or "settings".
    pub section: String,
    pub operator_name: String,
}

impl StoreContext {
    #[must_use]
    pub fn new(store: &Store, operator: &CurrentOperator, section: &str) -> Self {
        Self {
            store_id: store.id.to_string(),
            store_name: store.name.clone(),
            section: section.to_string(),
            operator_name: operator.display_name().to_string(),
        }
    }
}
