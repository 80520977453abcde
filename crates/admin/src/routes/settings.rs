//! Store settings routes.
//!
//! Settings edit the store record itself: a rename form plus the
//! store-level delete. Deleting a store redirects back to the store
//! picker rather than a list inside the store that no longer exists.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use storeroom_core::Store;

use crate::{
    components::AlertModalConfig,
    filters,
    forms::{FieldErrors, StoreForm},
    middleware::{ActiveStore, RequireOperator},
    models::CurrentOperator,
    notifications::{self, Notification, ToastView, toast_views},
    state::AppState,
};

use super::StoreContext;

/// Shown when a store delete is refused because records still belong to
/// it.
const DELETE_CONFLICT_MESSAGE: &str = "Make sure you removed all products and categories first.";

// =============================================================================
// Templates
// =============================================================================

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings/index.html")]
pub struct SettingsTemplate {
    pub store: StoreContext,
    pub name: String,
    pub name_error: String,
    pub action: String,
    pub delete_action: String,
    pub delete_modal: AlertModalConfig,
    pub toasts: Vec<ToastView>,
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/settings", get(index).post(update))
        .route("/{store_id}/settings/delete", post(remove))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the settings form with the store's current name.
///
/// GET /{`store_id`}/settings
#[instrument(skip(session))]
async fn index(
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
) -> SettingsTemplate {
    let toasts = toast_views(&notifications::take(&session).await);
    let name = store.name.clone();

    settings_page(&store, &operator, name, &FieldErrors::new(), toasts)
}

/// Rename the store.
///
/// POST /{`store_id`}/settings
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Form(form): Form<StoreForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return settings_page(&store, &operator, form.name, &errors, Vec::new())
                .into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/settings", store.id))
    else {
        return Redirect::to(&format!("/{}/settings", store.id)).into_response();
    };

    match state.platform().update_store(store.id, &payload).await {
        Ok(_) => {
            notifications::push(&session, Notification::success("Store updated.")).await;
            Redirect::to(&format!("/{}/settings", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update store");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            settings_page(&store, &operator, form.name, &FieldErrors::new(), toasts)
                .into_response()
        }
    }
}

/// Delete the store after modal confirmation.
///
/// POST /{`store_id`}/settings/delete
#[instrument(skip(state, session))]
async fn remove(
    State(state): State<AppState>,
    RequireOperator(_): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
) -> Response {
    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/settings", store.id))
    else {
        return Redirect::to(&format!("/{}/settings", store.id)).into_response();
    };

    match state.platform().delete_store(store.id).await {
        Ok(()) => {
            notifications::push(&session, Notification::success("Store deleted.")).await;
            Redirect::to("/").into_response()
        }
        Err(e) if e.is_conflict() => {
            notifications::push(&session, Notification::error(DELETE_CONFLICT_MESSAGE)).await;
            Redirect::to(&format!("/{}/settings", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete store");
            notifications::push(&session, Notification::error("Something went wrong.")).await;
            Redirect::to(&format!("/{}/settings", store.id)).into_response()
        }
    }
}

/// Assemble the settings template.
fn settings_page(
    store: &Store,
    operator: &CurrentOperator,
    name: String,
    errors: &FieldErrors,
    toasts: Vec<ToastView>,
) -> SettingsTemplate {
    SettingsTemplate {
        store: StoreContext::new(store, operator, "settings"),
        name,
        name_error: errors.display("name"),
        action: format!("/{}/settings", store.id),
        delete_action: format!("/{}/settings/delete", store.id),
        delete_modal: AlertModalConfig::delete_confirmation("delete-store"),
        toasts,
    }
}
