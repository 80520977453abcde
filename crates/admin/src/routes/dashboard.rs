//! Store directory routes.
//!
//! The landing page lists every store the platform knows about and owns
//! the create-store modal. Visiting a store from here lands on its
//! billboards page.

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
    filters,
    forms::{FieldErrors, StoreForm},
    middleware::{ActiveStore, RequireOperator},
    notifications::{self, Notification, ToastView, toast_views},
    state::AppState,
};

/// Store card for template rendering.
#[derive(Debug, Clone)]
pub struct StoreCardView {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl From<&Store> for StoreCardView {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.to_string(),
            name: store.name.clone(),
            created_at: filters::long_date(&store.created_at),
        }
    }
}

/// Store directory template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub operator_name: String,
    pub stores: Vec<StoreCardView>,
    /// Retained name field for re-rendering after a failed submit.
    pub name: String,
    pub name_error: String,
    /// Re-open the create-store modal when a submit bounced.
    pub open_create_modal: bool,
    pub toasts: Vec<ToastView>,
}

/// Build the store directory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/stores", post(create_store))
        .route("/{store_id}", get(store_home))
}

/// Render the store directory.
///
/// GET /
#[instrument(skip(state, session))]
async fn index(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    session: Session,
) -> DashboardTemplate {
    let mut toasts = toast_views(&notifications::take(&session).await);

    let stores = match state.platform().list_stores().await {
        Ok(stores) => stores,
        Err(e) => {
            tracing::error!(error = %e, "Failed to list stores");
            toasts.push(ToastView::from(&Notification::error(
                "Something went wrong.",
            )));
            Vec::new()
        }
    };

    DashboardTemplate {
        operator_name: operator.display_name().to_string(),
        stores: stores.iter().map(StoreCardView::from).collect(),
        name: String::new(),
        name_error: String::new(),
        open_create_modal: false,
        toasts,
    }
}

/// Create a store.
///
/// POST /stores
#[instrument(skip(state, session, form))]
async fn create_store(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    session: Session,
    Form(form): Form<StoreForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return rerender(&state, &operator, &form.name, &errors, Vec::new())
                .await
                .into_response();
        }
    };

    // A repeat submit while the first is still running is dropped.
    let Some(_guard) = state.submissions().try_begin("stores/new") else {
        return Redirect::to("/").into_response();
    };

    match state.platform().create_store(&payload).await {
        Ok(store) => {
            notifications::push(&session, Notification::success("Store created.")).await;
            Redirect::to(&format!("/{}", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create store");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            rerender(&state, &operator, &form.name, &FieldErrors::new(), toasts)
                .await
                .into_response()
        }
    }
}

/// Redirect a bare store URL to its billboards page.
///
/// GET /{store_id}
#[instrument(skip_all)]
async fn store_home(RequireOperator(_): RequireOperator, ActiveStore(store): ActiveStore) -> Redirect {
    Redirect::to(&format!("/{}/billboards", store.id))
}

/// Rebuild the directory page around a failed create-store submit, with
/// the entered name intact and the modal re-opened.
async fn rerender(
    state: &AppState,
    operator: &crate::models::CurrentOperator,
    name: &str,
    errors: &FieldErrors,
    toasts: Vec<ToastView>,
) -> DashboardTemplate {
    let stores = state.platform().list_stores().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to list stores");
        Vec::new()
    });

    DashboardTemplate {
        operator_name: operator.display_name().to_string(),
        stores: stores.iter().map(StoreCardView::from).collect(),
        name: name.to_string(),
        name_error: errors.display("name"),
        open_create_modal: true,
        toasts,
    }
}
