//! Billboard management routes.
//!
//! Billboards are the hero images a storefront rotates through. The
//! listing, form, and delete flows here are the model the color and size
//! routes follow.

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

use storeroom_core::{Billboard, BillboardId, Store};

use crate::{
    components::{AlertModalConfig, DataTableConfig, data_table::billboards_table_config},
    error::AppError,
    filters,
    forms::{BillboardForm, FieldErrors},
    middleware::{ActiveStore, RequireOperator},
    models::CurrentOperator,
    notifications::{self, Notification, ToastView, toast_views},
    state::AppState,
};

use super::StoreContext;

/// Shown when a delete is refused because categories still use the
/// billboard.
const DELETE_CONFLICT_MESSAGE: &str =
    "Make sure you removed all categories using this billboard first.";

// =============================================================================
// Templates
// =============================================================================

/// Billboard row for template rendering.
#[derive(Debug, Clone)]
pub struct BillboardView {
    pub id: String,
    pub label: String,
    pub created_at: String,
}

impl From<&Billboard> for BillboardView {
    fn from(billboard: &Billboard) -> Self {
        Self {
            id: billboard.id.to_string(),
            label: billboard.label.clone(),
            created_at: filters::long_date(&billboard.created_at),
        }
    }
}

/// Billboard listing template.
#[derive(Template, WebTemplate)]
#[template(path = "billboards/index.html")]
pub struct BillboardsIndexTemplate {
    pub store: StoreContext,
    pub billboards: Vec<BillboardView>,
    pub table: DataTableConfig,
    pub search_query: String,
    pub delete_modal: AlertModalConfig,
    pub toasts: Vec<ToastView>,
}

/// Billboard create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "billboards/form.html")]
pub struct BillboardFormTemplate {
    pub store: StoreContext,
    pub heading: String,
    pub description: String,
    pub submit_label: String,
    pub action: String,
    pub is_edit: bool,
    pub delete_action: String,
    pub label: String,
    pub image_url: String,
    pub label_error: String,
    pub image_url_error: String,
    pub delete_modal: AlertModalConfig,
    pub toasts: Vec<ToastView>,
}

#[derive(Debug, Deserialize)]
struct BillboardPathParams {
    billboard_id: BillboardId,
}

/// List search parameters.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Build the billboards router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{store_id}/billboards", get(index).post(create))
        .route("/{store_id}/billboards/new", get(new_form))
        .route(
            "/{store_id}/billboards/{billboard_id}",
            get(edit_form).post(update),
        )
        .route("/{store_id}/billboards/{billboard_id}/delete", post(remove))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the billboard listing.
///
/// GET /{`store_id`}/billboards
#[instrument(skip(state, session))]
async fn index(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<BillboardsIndexTemplate, AppError> {
    let mut billboards = state.platform().list_billboards(store.id).await?;
    let search_query = query.q.map(|q| q.trim().to_string()).unwrap_or_default();
    if !search_query.is_empty() {
        let needle = search_query.to_lowercase();
        billboards.retain(|b| b.label.to_lowercase().contains(&needle));
    }
    let toasts = toast_views(&notifications::take(&session).await);

    Ok(BillboardsIndexTemplate {
        store: StoreContext::new(&store, &operator, "billboards"),
        billboards: billboards.iter().map(BillboardView::from).collect(),
        table: billboards_table_config(),
        search_query,
        delete_modal: AlertModalConfig::delete_confirmation("delete-billboard"),
        toasts,
    })
}

/// Render a blank billboard form.
///
/// GET /{`store_id`}/billboards/new
#[instrument(skip(session))]
async fn new_form(
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
) -> BillboardFormTemplate {
    let toasts = toast_views(&notifications::take(&session).await);
    let form = BillboardForm {
        label: String::new(),
        image_url: String::new(),
    };

    form_page(&store, &operator, None, &form, &FieldErrors::new(), toasts)
}

/// Render the form pre-populated with an existing billboard.
///
/// GET /{`store_id`}/billboards/{`billboard_id`}
#[instrument(skip(state, session))]
async fn edit_form(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<BillboardPathParams>,
) -> Result<BillboardFormTemplate, AppError> {
    let billboard = state
        .platform()
        .get_billboard(store.id, params.billboard_id)
        .await?;
    let toasts = toast_views(&notifications::take(&session).await);
    let form = BillboardForm {
        label: billboard.label,
        image_url: billboard.image_url,
    };

    Ok(form_page(
        &store,
        &operator,
        Some(billboard.id),
        &form,
        &FieldErrors::new(),
        toasts,
    ))
}

/// Create a billboard.
///
/// POST /{`store_id`}/billboards
#[instrument(skip(state, session, form))]
async fn create(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Form(form): Form<BillboardForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return form_page(&store, &operator, None, &form, &errors, Vec::new()).into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/billboards/new", store.id))
    else {
        return Redirect::to(&format!("/{}/billboards/new", store.id)).into_response();
    };

    match state.platform().create_billboard(store.id, &payload).await {
        Ok(_) => {
            notifications::push(&session, Notification::success("Billboard created.")).await;
            Redirect::to(&format!("/{}/billboards", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create billboard");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            form_page(&store, &operator, None, &form, &FieldErrors::new(), toasts).into_response()
        }
    }
}

/// Update a billboard.
///
/// POST /{`store_id`}/billboards/{`billboard_id`}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<BillboardPathParams>,
    Form(form): Form<BillboardForm>,
) -> Response {
    let payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return form_page(
                &store,
                &operator,
                Some(params.billboard_id),
                &form,
                &errors,
                Vec::new(),
            )
            .into_response();
        }
    };

    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/billboards/{}", store.id, params.billboard_id))
    else {
        return Redirect::to(&format!("/{}/billboards/{}", store.id, params.billboard_id))
            .into_response();
    };

    match state
        .platform()
        .update_billboard(store.id, params.billboard_id, &payload)
        .await
    {
        Ok(_) => {
            notifications::push(&session, Notification::success("Billboard updated.")).await;
            Redirect::to(&format!("/{}/billboards", store.id)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update billboard");
            let toasts = vec![ToastView::from(&Notification::error(
                "Something went wrong.",
            ))];
            form_page(
                &store,
                &operator,
                Some(params.billboard_id),
                &form,
                &FieldErrors::new(),
                toasts,
            )
            .into_response()
        }
    }
}

/// Delete a billboard after modal confirmation.
///
/// POST /{`store_id`}/billboards/{`billboard_id`}/delete
#[instrument(skip(state, session))]
async fn remove(
    State(state): State<AppState>,
    RequireOperator(_): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Path(params): Path<BillboardPathParams>,
) -> Response {
    let Some(_guard) = state
        .submissions()
        .try_begin(format!("{}/billboards/{}", store.id, params.billboard_id))
    else {
        return Redirect::to(&format!("/{}/billboards", store.id)).into_response();
    };

    match state
        .platform()
        .delete_billboard(store.id, params.billboard_id)
        .await
    {
        Ok(()) => {
            notifications::push(&session, Notification::success("Billboard deleted.")).await;
        }
        Err(e) if e.is_conflict() => {
            notifications::push(&session, Notification::error(DELETE_CONFLICT_MESSAGE)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete billboard");
            notifications::push(&session, Notification::error("Something went wrong.")).await;
        }
    }

    Redirect::to(&format!("/{}/billboards", store.id)).into_response()
}

/// Assemble the form template for both create and edit renders.
fn form_page(
    store: &Store,
    operator: &CurrentOperator,
    billboard_id: Option<BillboardId>,
    form: &BillboardForm,
    errors: &FieldErrors,
    toasts: Vec<ToastView>,
) -> BillboardFormTemplate {
    let is_edit = billboard_id.is_some();
    let action = billboard_id.map_or_else(
        || format!("/{}/billboards", store.id),
        |id| format!("/{}/billboards/{id}", store.id),
    );
    let delete_action = billboard_id.map_or_else(String::new, |id| {
        format!("/{}/billboards/{id}/delete", store.id)
    });

    BillboardFormTemplate {
        store: StoreContext::new(store, operator, "billboards"),
        heading: if is_edit { "Edit billboard" } else { "Create billboard" }.to_string(),
        description: if is_edit { "Edit a billboard" } else { "Add a new billboard" }.to_string(),
        submit_label: if is_edit { "Save changes" } else { "Create" }.to_string(),
        action,
        is_edit,
        delete_action,
        label: form.label.clone(),
        image_url: form.image_url.clone(),
        label_error: errors.display("label"),
        image_url_error: errors.display("image_url"),
        delete_modal: AlertModalConfig::delete_confirmation("delete-billboard"),
        toasts,
    }
}
