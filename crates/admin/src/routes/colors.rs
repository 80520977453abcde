//! Color catalog routes.
//!
//! Colors pair a display name with a `#`-prefixed hex value; list rows
//! and the form preview render a swatch from the value.

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

use storeroom_core::{Color, ColorId, Store};

use crate::{
    components::{AlertModalConfig, DataTableConfig, data_table::colors_table_config},
    error::AppError,
    filters,
    forms::{ColorForm, FieldErrors},
    middleware::{ActiveStore, RequireOperator},
    models::CurrentOperator,
    notifications::{self, Notification, ToastView, toast_views},
    state::AppState,
};

use super::StoreContext;

/// Shown when a delete is refused because products still use the color.
const DELETE_CONFLICT_MESSAGE: &str =
    "Make sure you removed all products using this color first.";

// =============================================================================
// Templates
// =============================================================================

/// Color row for template rendering.
#[derive(Debug, Clone)]
pub struct ColorView {
    pub id: String,
    pub name: String,
    pub value: String,
    pub created_at: String,
}

impl From<&Color> for ColorView {
    fn from(color: &Color) -> Self {
        Self {
            id: color.id.to_string(),
            name: color.name.clone(),
            value: color.value.as_str().to_string(),
            created_at: filters::long_date(&color.created_at),
        }
    }
}

/// Color listing template.
#[derive(Template, WebTemplate)]
#[template(path = "colors/index.html")]
pub struct ColorsIndexTemplate {
    pub store: StoreContext,
    pub colors: Vec<ColorView>,
    pub table: DataTableConfig,
    pub search_query: String,
    pub delete_modal: AlertModalConfig,
    pub toasts: Vec<ToastView>,
}

/// Color create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "colors/form.html")]
pub struct ColorFormTemplate {
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
struct ColorPathParams {
    color_id: ColorId,
}

/// List search parameters.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Build the colors router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/colors", get(index).post(create))
        .route("/{store_id}/colors/new", get(new_form))
        .route("/{store_id}/colors/{color_id}", get(edit_form).post(update))
        .route("/{store_id}/colors/{color_id}/delete", post(remove))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the color listing.
///
/// GET /{`store_id`}/colors
#[instrument(skip(state, session))]
async fn index(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<ColorsIndexTemplate, AppError> {
    let mut colors = state.platform().list_colors(store.id).await?;
    let search_query = query.q.map(|q| q.trim().to_string()).unwrap_or_default();
    if !search_query.is_empty() {
        let needle = search_query.to_lowercase();
        colors.retain(|c| c.name.to_lowercase().contains(&needle));
    }
    let toasts = toast_views(&notifications::take(&session).await);

    Ok(ColorsIndexTemplate {
        store: StoreContext::new(&store, &operator, "colors"),
        colors: colors.iter().map(ColorView::from).collect(),
        table: colors_table_config(),
        search_query,
        delete_modal: AlertModalConfig::delete_confirmation("delete-color"),
        toasts,
    })
}

/// Render a blank color form.
///
/// GET /{`store_id`}/colors/new
#[instrument(skip(session))]
async fn new_form(
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
) -> ColorFormTemplate {
    let toasts = toast_views(&notifications::take(&session).await);
    let form = ColorForm {
        name: String::new(),
        value: String::new(),
    };

    form_page(&store, &operator, None, &form, &FieldErrors::new(), toasts)
}

/// Render the form pre-populated with an existing color.
///
/// GET /{`store_id`}/colors/{`color_id`}
#[instrument(skip(state, session))]
async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<ColorPathParams>,
) -> Result<ColorFormTemplate, AppError> {
    let color = state.platform().get_color(store.id, params.color_id).await?;
    let toasts = toast_views(&notifications::take(&session).await);
    let form = ColorForm {
        name: color.name,
        value: color.value.into_inner(),
    };

    Ok(form_page(
        &store,
        &operator,
        Some(color.id),
        &form,
        &FieldErrors::new(),
        toasts,
    ))
}

/// Create a color.
///
/// POST /{`store_id`}/colors
#[instrument(skip(state, session, form))]
async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Form(form): Form<ColorForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return form_page(&store, &operator, None, &form, &errors, Vec::new()).into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/colors/new", store.id))
    else {
        return Redirect::to(&format!("/{}/colors/new", store.id)).into_response();
    };

    match state.platform().create_color(store.id, &payload).await {
        Ok(_) => {
            notifications::push(&session, Notification::success("Color created.")).await;
            Redirect::to(&format!("/{}/colors", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create color");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            form_page(&store, &operator, None, &form, &FieldErrors::new(), toasts).into_response()
        }
    }
}

/// Update a color.
///
/// POST /{`store_id`}/colors/{`color_id`}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<ColorPathParams>,
    Form(form): Form<ColorForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return form_page(
                &store,
                &operator,
                Some(params.color_id),
                &form,
                &errors,
                Vec::new(),
            )
            .into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/colors/{}", store.id, params.color_id))
    else {
        return Redirect::to(&format!("/{}/colors/{}", store.id, params.color_id))
            .into_response();
    };

    match state
        .platform()
        .update_color(store.id, params.color_id, &payload)
        .await
    {
        Ok(_) => {
            notifications::push(&session, Notification::success("Color updated.")).await;
            Redirect::to(&format!("/{}/colors", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update color");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            form_page(
                &store,
                &operator,
                Some(params.color_id),
                &form,
                &FieldErrors::new(),
                toasts,
            )
            .into_response()
        }
    }
}

/// Delete a color after modal confirmation.
///
/// POST /{`store_id`}/colors/{`color_id`}/delete
#[instrument(skip(state, session))]
async fn remove(
    State(state): State<AppState>,
    RequireOperator(_): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<ColorPathParams>,
) -> Response {
    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/colors/{}", store.id, params.color_id))
    else {
        return Redirect::to(&format!("/{}/colors", store.id)).into_response();
    };

    match state
        .platform()
        .delete_color(store.id, params.color_id)
        .await
    {
        Ok(()) => {
            notifications::push(&session, Notification::success("Color deleted.")).await;
        }
        Err(e) if e.is_conflict() => {
            notifications::push(&session, Notification::error(DELETE_CONFLICT_MESSAGE)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete color");
            notifications::push(&session, Notification::error("Something went wrong.")).await;
        }
    }

    Redirect::to(&format!("/{}/colors", store.id)).into_response()
}

/// Assemble the form template for both create and edit renders.
fn form_page(
    store: &Store,
    operator: &CurrentOperator,
    color_id: Option<ColorId>,
    form: &ColorForm,
    errors: &FieldErrors,
    toasts: Vec<ToastView>,
) -> ColorFormTemplate {
    let is_edit = color_id.is_some();
    let action = color_id.map_or_else(
        || format!("/{}/colors", store.id),
        |id| format!("/{}/colors/{id}", store.id),
    );
    let delete_action =
        color_id.map_or_else(String::new, |id| format!("/{}/colors/{id}/delete", store.id));

    ColorFormTemplate {
        store: StoreContext::new(store, operator, "colors"),
        heading: if is_edit { "Edit color" } else { "Create color" }.to_string(),
        description: if is_edit { "Edit a color" } else { "Add a new color" }.to_string(),
        submit_label: if is_edit { "Save changes" } else { "Create" }.to_string(),
        action,
        is_edit,
        delete_action,
        name: form.name.clone(),
        value: form.value.clone(),
        name_error: errors.display("name"),
        value_error: errors.display("value"),
        delete_modal: AlertModalConfig::delete_confirmation("delete-color"),
        toasts,
    }
}
