//! In-process harness for the Storeroom admin end-to-end tests.
//!
//! [`TestContext::start`] boots two servers on ephemeral loopback ports:
//! a stub of the platform API (in-memory records, per-operation request
//! counters) and the real admin app wired against it with an in-memory
//! session store. Tests drive the dashboard through a cookie-holding
//! `reqwest` client and assert on both the rendered HTML and the stub's
//! counters.
//!
//! ```rust,ignore
//! let ctx = TestContext::start().await;
//! let store = ctx.platform.seed_store("Gamma Goods");
//!
//! let body = ctx.get_html(&format!("/{}/colors", store.id)).await;
//! assert!(body.contains("Colors (0)"));
//! assert_eq!(ctx.platform.hits("colors.list"), 1);
//! ```

#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::{Value, json};
use uuid::Uuid;

use storeroom_admin::{
    app,
    config::{AdminConfig, IdentityConfig, PlatformApiConfig},
    middleware::{
        auth::{IDENTITY_EMAIL_HEADER, IDENTITY_NAME_HEADER},
        session::create_memory_session_layer,
    },
    platform::PlatformClient,
    state::AppState,
};
use storeroom_core::{
    Billboard, BillboardId, Color, ColorId, CurrencyCode, HexColor, Order, OrderId, Price, Size,
    SizeId, Store, StoreId,
};

/// Bearer token the admin must present to the stub platform.
pub const SERVICE_TOKEN: &str = "stub-platform-token";

/// Where unidentified visitors get sent.
pub const SIGN_IN_URL: &str = "https://auth.storeroom.test/sign-in";

/// Identity the default test client asserts via proxy headers.
pub const OPERATOR_EMAIL: &str = "morgan@storeroom.test";
pub const OPERATOR_NAME: &str = "Morgan";

const SESSION_SECRET: &str = "integration-test-session-secret-0123456789abcdef";

// =============================================================================
// Stub platform state
// =============================================================================

type SharedStubState = Arc<Mutex<StubState>>;

/// Records and bookkeeping behind the stub platform endpoints.
///
/// Records are stored as JSON objects in per-collection vectors, which
/// keeps the create and update handlers shape-agnostic: whatever payload
/// the admin sends comes back in reads, plus the fields the platform
/// would add (`id`, `store_id`, timestamps).
#[derive(Default)]
struct StubState {
    collections: HashMap<String, Vec<Value>>,
    hits: HashMap<String, usize>,
    payloads: HashMap<String, Value>,
    conflict_ids: HashSet<String>,
    delay: Option<Duration>,
}

impl StubState {
    fn count(&mut self, op: &str) {
        *self.hits.entry(op.to_string()).or_insert(0) += 1;
    }

    fn capture(&mut self, op: &str, payload: &Value) {
        self.payloads.insert(op.to_string(), payload.clone());
    }

    fn collection(&mut self, name: &str) -> &mut Vec<Value> {
        self.collections.entry(name.to_string()).or_default()
    }
}

fn lock(stub: &SharedStubState) -> MutexGuard<'_, StubState> {
    stub.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sleep for the configured artificial latency, outside the state lock.
async fn pause(stub: &SharedStubState) {
    let delay = lock(stub).delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

fn in_store(record: &Value, store_id: &str) -> bool {
    record.get("store_id").and_then(Value::as_str) == Some(store_id)
}

// =============================================================================
// Stub platform record operations
// =============================================================================

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn insert_record(
    state: &mut StubState,
    collection: &str,
    store_id: Option<&str>,
    payload: Value,
) -> Response {
    let mut record = payload;
    {
        let Some(fields) = record.as_object_mut() else {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, "body must be an object");
        };
        let now = json!(Utc::now());
        fields.insert("id".to_string(), json!(Uuid::new_v4()));
        if let Some(store_id) = store_id {
            fields.insert("store_id".to_string(), json!(store_id));
        }
        fields.insert("created_at".to_string(), now.clone());
        fields.insert("updated_at".to_string(), now);
    }
    state.collection(collection).push(record.clone());
    Json(record).into_response()
}

fn find_record(state: &mut StubState, collection: &str, id: &str) -> Response {
    state
        .collection(collection)
        .iter()
        .find(|r| has_id(r, id))
        .map_or_else(
            || error_response(StatusCode::NOT_FOUND, "record not found"),
            |record| Json(record.clone()).into_response(),
        )
}

fn merge_record(state: &mut StubState, collection: &str, id: &str, payload: &Value) -> Response {
    let Some(fields) = payload.as_object() else {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, "body must be an object");
    };
    let Some(record) = state
        .collection(collection)
        .iter_mut()
        .find(|r| has_id(r, id))
    else {
        return error_response(StatusCode::NOT_FOUND, "record not found");
    };
    if let Some(existing) = record.as_object_mut() {
        for (key, value) in fields {
            existing.insert(key.clone(), value.clone());
        }
        existing.insert("updated_at".to_string(), json!(Utc::now()));
    }
    Json(record.clone()).into_response()
}

fn remove_record(state: &mut StubState, collection: &str, id: &str) -> Response {
    if state.conflict_ids.contains(id) {
        return error_response(
            StatusCode::CONFLICT,
            "record is referenced by other resources",
        );
    }
    let records = state.collection(collection);
    let before = records.len();
    records.retain(|r| !has_id(r, id));
    if records.len() == before {
        return error_response(StatusCode::NOT_FOUND, "record not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

// =============================================================================
// Stub platform handlers
// =============================================================================

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {SERVICE_TOKEN}"))
}

fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "invalid service token")
}

async fn list_stores(State(stub): State<SharedStubState>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count("stores.list");
    let records = state.collection("stores").clone();
    Json(records).into_response()
}

async fn create_store(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count("stores.create");
    state.capture("stores.create", &payload);
    insert_record(&mut state, "stores", None, payload)
}

async fn get_store(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path(store_id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count("stores.get");
    find_record(&mut state, "stores", &store_id)
}

async fn update_store(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path(store_id): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count("stores.update");
    state.capture("stores.update", &payload);
    merge_record(&mut state, "stores", &store_id, &payload)
}

async fn delete_store(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path(store_id): Path<String>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count("stores.delete");
    remove_record(&mut state, "stores", &store_id)
}

async fn list_records(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path((store_id, collection)): Path<(String, String)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count(&format!("{collection}.list"));
    let records: Vec<Value> = state
        .collection(&collection)
        .iter()
        .filter(|r| in_store(r, &store_id))
        .cloned()
        .collect();
    Json(records).into_response()
}

async fn create_record(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path((store_id, collection)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count(&format!("{collection}.create"));
    state.capture(&format!("{collection}.create"), &payload);
    insert_record(&mut state, &collection, Some(&store_id), payload)
}

async fn get_record(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path((_store_id, collection, record_id)): Path<(String, String, String)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count(&format!("{collection}.get"));
    find_record(&mut state, &collection, &record_id)
}

async fn update_record(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path((_store_id, collection, record_id)): Path<(String, String, String)>,
    Json(payload): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count(&format!("{collection}.update"));
    state.capture(&format!("{collection}.update"), &payload);
    merge_record(&mut state, &collection, &record_id, &payload)
}

async fn delete_record(
    State(stub): State<SharedStubState>,
    headers: HeaderMap,
    Path((_store_id, collection, record_id)): Path<(String, String, String)>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    pause(&stub).await;
    let mut state = lock(&stub);
    state.count(&format!("{collection}.delete"));
    remove_record(&mut state, &collection, &record_id)
}

fn stub_router(state: SharedStubState) -> Router {
    Router::new()
        .route("/stores", get(list_stores).post(create_store))
        .route(
            "/stores/{store_id}",
            get(get_store).patch(update_store).delete(delete_store),
        )
        .route(
            "/{store_id}/{collection}",
            get(list_records).post(create_record),
        )
        .route(
            "/{store_id}/{collection}/{record_id}",
            get(get_record).patch(update_record).delete(delete_record),
        )
        .with_state(state)
}

// =============================================================================
// Stub platform handle
// =============================================================================

/// Handle to a running stub platform server.
#[derive(Clone)]
pub struct StubPlatform {
    state: SharedStubState,
    base_url: String,
}

impl StubPlatform {
    /// Start the stub on an ephemeral loopback port.
    pub async fn spawn() -> Self {
        let state = SharedStubState::default();
        let router = stub_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub platform listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read stub platform address");
        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Stub platform server error");
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// How many times the admin called `op`, e.g. `"colors.create"` or
    /// `"stores.delete"`.
    pub fn hits(&self, op: &str) -> usize {
        lock(&self.state).hits.get(op).copied().unwrap_or(0)
    }

    /// The most recent request body received for `op`.
    pub fn last_payload(&self, op: &str) -> Option<Value> {
        lock(&self.state).payloads.get(op).cloned()
    }

    /// Current records in `collection` (`"stores"`, `"colors"`, ...).
    pub fn records(&self, collection: &str) -> Vec<Value> {
        lock(&self.state)
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Hold every subsequent stub response for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        lock(&self.state).delay = Some(delay);
    }

    pub fn clear_delay(&self) {
        lock(&self.state).delay = None;
    }

    /// Make deletes of the record with this id fail with 409.
    pub fn mark_delete_conflict(&self, id: impl ToString) {
        lock(&self.state).conflict_ids.insert(id.to_string());
    }

    fn push(&self, collection: &str, record: Value) {
        lock(&self.state).collection(collection).push(record);
    }

    // =========================================================================
    // Seeds
    // =========================================================================

    pub fn seed_store(&self, name: &str) -> Store {
        let now = Utc::now();
        let store = Store {
            id: StoreId::new(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.push(
            "stores",
            serde_json::to_value(&store).expect("store serializes"),
        );
        store
    }

    pub fn seed_billboard(&self, store_id: StoreId, label: &str, image_url: &str) -> Billboard {
        let now = Utc::now();
        let billboard = Billboard {
            id: BillboardId::new(),
            store_id,
            label: label.to_string(),
            image_url: image_url.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.push(
            "billboards",
            serde_json::to_value(&billboard).expect("billboard serializes"),
        );
        billboard
    }

    pub fn seed_color(&self, store_id: StoreId, name: &str, value: &str) -> Color {
        let now = Utc::now();
        let color = Color {
            id: ColorId::new(),
            store_id,
            name: name.to_string(),
            value: HexColor::parse(value).expect("seed hex code must be valid"),
            created_at: now,
            updated_at: now,
        };
        self.push(
            "colors",
            serde_json::to_value(&color).expect("color serializes"),
        );
        color
    }

    pub fn seed_size(&self, store_id: StoreId, name: &str, value: &str) -> Size {
        let now = Utc::now();
        let size = Size {
            id: SizeId::new(),
            store_id,
            name: name.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.push(
            "sizes",
            serde_json::to_value(&size).expect("size serializes"),
        );
        size
    }

    pub fn seed_order(
        &self,
        store_id: StoreId,
        product_names: &[&str],
        phone: &str,
        address: &str,
        total_cents: i64,
        is_paid: bool,
    ) -> Order {
        let order = Order {
            id: OrderId::new(),
            store_id,
            product_names: product_names.iter().map(ToString::to_string).collect(),
            phone: phone.to_string(),
            address: address.to_string(),
            total: Price::from_cents(total_cents, CurrencyCode::USD),
            is_paid,
            created_at: Utc::now(),
        };
        self.push(
            "orders",
            serde_json::to_value(&order).expect("order serializes"),
        );
        order
    }
}

// =============================================================================
// Test context
// =============================================================================

/// A running admin app wired to a stub platform.
pub struct TestContext {
    pub platform: StubPlatform,
    /// Cookie-holding client that sends the identity proxy headers and
    /// never follows redirects.
    pub client: reqwest::Client,
    base_url: String,
}

impl TestContext {
    /// Boot the stub platform and the admin app on ephemeral ports.
    pub async fn start() -> Self {
        let platform = StubPlatform::spawn().await;
        let config = test_config(platform.base_url());
        let state = AppState::new(
            config.clone(),
            PlatformClient::new(config.platform()),
            None,
        );
        let admin = app::build(state, create_memory_session_layer(&config));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind admin listener");
        let addr = listener
            .local_addr()
            .expect("Failed to read admin address");
        tokio::spawn(async move {
            axum::serve(listener, admin).await.expect("Admin server error");
        });

        Self {
            platform,
            client: operator_client(),
            base_url: format!("http://{addr}"),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    /// GET a page, asserting it renders.
    pub async fn get_html(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK, "GET {path}");
        response.text().await.expect("response body")
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }
}

/// A cookie-holding client with no identity headers, for exercising the
/// sign-in redirect and session-cached identity paths.
pub fn bare_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

fn test_config(platform_url: &str) -> AdminConfig {
    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        session_secret: SecretString::from(SESSION_SECRET),
        database_url: None,
        platform: PlatformApiConfig {
            base_url: platform_url.to_string(),
            api_token: SecretString::from(SERVICE_TOKEN),
        },
        identity: IdentityConfig {
            sign_in_url: SIGN_IN_URL.to_string(),
        },
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../admin/static").to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
        tls: None,
    }
}

fn operator_client() -> reqwest::Client {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        IDENTITY_EMAIL_HEADER,
        reqwest::header::HeaderValue::from_static(OPERATOR_EMAIL),
    );
    headers.insert(
        IDENTITY_NAME_HEADER,
        reqwest::header::HeaderValue::from_static(OPERATOR_NAME),
    );
    reqwest::Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Assert a 303 redirect to exactly `location`.
pub fn assert_redirect(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some(location),
        "redirect location"
    );
}
