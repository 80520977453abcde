//! Size catalog routes.
//!
//! Sizes pair a display name ("Large") with the short value product
//! pages print ("L"). Free-form on purpose: shoe sizing, volumes, and
//! one-size goods all pass through the same form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use storeroom_core::{Size, SizeId, Store};

use crate::{
    components::{AlertModalConfig, DataTableConfig, data_table::sizes_table_config},
    error::AppError,
    filters,
    forms::{FieldErrors, SizeForm},
    middleware::{ActiveStore, RequireOperator},
    models::CurrentOperator,
    notifications::{self, Notification, ToastView, toast_views},
    state::AppState,
};

use super::StoreContext;

/// Shown when a delete is refused because products still use the size.
const DELETE_CONFLICT_MESSAGE: &str =
    "Make sure you removed all products using this size first.";

// =============================================================================
// Templates
// =============================================================================

/// Size row for template rendering.
#[derive(Debug, Clone)]
pub struct SizeView {
    pub id: String,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl From<&Size> for SizeView {
    fn from(size: &Size) -> Self {
        Self {
            id: size.id.to_string(),
            name: size.name.clone(),
            value: size.value.clone(),
            created_at: filters::long_date(&size.created_at),
        }
    }
}

/// Size listing template.
#[derive(Template, WebTemplate)]
#[template(path = "sizes/index.html")]
pub struct SizesIndexTemplate {
    pub store: StoreContext,
    pub sizes: Vec<SizeView>,
    pub table: DataTableConfig,
    pub search_query: String,
    pub delete_modal: AlertModalConfig,
    pub toasts: Vec<ToastView>,
}

/// Size create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "sizes/form.html")]
pub struct SizeFormTemplate {
    pub store: StoreContext,
    pub heading: String,
    pub description: String,
    pub submit_label: String,
    pub action: String,
    pub is_edit: bool,
    pub delete_action: String,
    pub name: String,
    pub value: String,
    pub name_error: String,
    pub value_error: String,
    pub delete_modal: AlertModalConfig,
    pub toasts: Vec<ToastView>,
}

#[derive(Debug, Deserialize)]
struct SizePathParams {
    size_id: SizeId,
}

/// List search parameters.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Build the sizes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/sizes", get(index).post(create))
        .route("/{store_id}/sizes/new", get(new_form))
        .route("/{store_id}/sizes/{size_id}", get(edit_form).post(update))
        .route("/{store_id}/sizes/{size_id}/delete", post(remove))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the size listing.
///
/// GET /{`store_id`}/sizes
#[instrument(skip(state, session))]
async fn index(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<SizesIndexTemplate, AppError> {
    let mut sizes = state.platform().list_sizes(store.id).await?;
    let search_query = query.q.map(|q| q.trim().to_string()).unwrap_or_default();
    if !search_query.is_empty() {
        let needle = search_query.to_lowercase();
        sizes.retain(|s| s.name.to_lowercase().contains(&needle));
    }
    let toasts = toast_views(&notifications::take(&session).await);

    Ok(SizesIndexTemplate {
        store: StoreContext::new(&store, &operator, "sizes"),
        sizes: sizes.iter().map(SizeView::from).collect(),
        table: sizes_table_config(),
        search_query,
        delete_modal: AlertModalConfig::delete_confirmation("delete-size"),
        toasts,
    })
}

/// Render a blank size form.
///
/// GET /{`store_id`}/sizes/new
#[instrument(skip(session))]
async fn new_form(
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
) -> SizeFormTemplate {
    let toasts = toast_views(&notifications::take(&session).await);
    let form = SizeForm {
        name: String::new(),
        value: String::new(),
    };

    form_page(&store, &operator, None, &form, &FieldErrors::new(), toasts)
}

/// Render the form pre-populated with an existing size.
///
/// GET /{`store_id`}/sizes/{`size_id`}
#[instrument(skip(state, session))]
async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<SizePathParams>,
) -> Result<SizeFormTemplate, AppError> {
    let size = state.platform().get_size(store.id, params.size_id).await?;
    let toasts = toast_views(&notifications::take(&session).await);
    let form = SizeForm {
        name: size.name,
        value: size.value,
    };

    Ok(form_page(
        &store,
        &operator,
        Some(size.id),
        &form,
        &FieldErrors::new(),
        toasts,
    ))
}

/// Create a size.
///
/// POST /{`store_id`}/sizes
#[instrument(skip(state, session, form))]
async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Form(form): Form<SizeForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return form_page(&store, &operator, None, &form, &errors, Vec::new()).into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/sizes/new", store.id))
    else {
        return Redirect::to(&format!("/{}/sizes/new", store.id)).into_response();
    };

    match state.platform().create_size(store.id, &payload).await {
        Ok(_) => {
            notifications::push(&session, Notification::success("Size created.")).await;
            Redirect::to(&format!("/{}/sizes", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create size");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            form_page(&store, &operator, None, &form, &FieldErrors::new(), toasts).into_response()
        }
    }
}

/// Update a size.
///
/// POST /{`store_id`}/sizes/{`size_id`}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<SizePathParams>,
    Form(form): Form<SizeForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return form_page(
                &store,
                &operator,
                Some(params.size_id),
                &form,
                &errors,
                Vec::new(),
            )
            .into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/sizes/{}", store.id, params.size_id))
    else {
        return Redirect::to(&format!("/{}/sizes/{}", store.id, params.size_id)).into_response();
    };

    match state
        .platform()
        .update_size(store.id, params.size_id, &payload)
        .await
    {
        Ok(_) => {
            notifications::push(&session, Notification::success("Size updated.")).await;
            Redirect::to(&format!("/{}/sizes", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update size");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            form_page(
                &store,
                &operator,
                Some(params.size_id),
                &form,
                &FieldErrors::new(),
                toasts,
            )
            .into_response()
        }
    }
}

/// Delete a size after modal confirmation.
///
/// POST /{`store_id`}/sizes/{`size_id`}/delete
#[instrument(skip(state, session))]
async fn remove(
    State(state): State<AppState>,
    RequireOperator(_): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<SizePathParams>,
) -> Response {
    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/sizes/{}", store.id, params.size_id))
    else {
        return Redirect::to(&format!("/{}/sizes", store.id)).into_response();
    };

    match state.platform().delete_size(store.id, params.size_id).await {
        Ok(()) => {
            notifications::push(&session, Notification::success("Size deleted.")).await;
        }
        Err(e) if e.is_conflict() => {
            notifications::push(&session, Notification::error(DELETE_CONFLICT_MESSAGE)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete size");
            notifications::push(&session, Notification::error("Something went wrong.")).await;
        }
    }

    Redirect::to(&format!("/{}/sizes", store.id)).into_response()
}

/// Assemble the form template for both create and edit renders.
fn form_page(
    store: &Store,
    operator: &CurrentOperator,
    size_id: Option<SizeId>,
    form: &SizeForm,
    errors: &FieldErrors,
    toasts: Vec<ToastView>,
) -> SizeFormTemplate {
    let is_edit = size_id.is_some();
    let action = size_id.map_or_else(
        || format!("/{}/sizes", store.id),
        |id| format!("/{}/sizes/{id}", store.id),
    );
    let delete_action =
        size_id.map_or_else(String::new, |id| format!("/{}/sizes/{id}/delete", store.id));

    SizeFormTemplate {
        store: StoreContext::new(store, operator, "sizes"),
        heading: if is_edit { "Edit size" } else { "Create size" }.to_string(),
        description: if is_edit { "Edit a size" } else { "Add a new size" }.to_string(),
        submit_label: if is_edit { "Save changes" } else { "Create" }.to_string(),
        action,
        is_edit,
        delete_action,
        name: form.name.clone(),
        value: form.value.clone(),
        name_error: errors.display("name"),
        value_error: errors.display("value"),
        delete_modal: AlertModalConfig::delete_confirmation("delete-size"),
        toasts,
    }
}
