//! Router assembly.
//!
//! Builds the full axum application from state plus a session layer.
//! Lives in the library so the integration tests can boot the exact
//! router the binary serves, pointed at a stub platform API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::service::SignedCookie;
use tower_sessions::{SessionManagerLayer, SessionStore};
use tracing::Span;

use crate::routes;
use crate::state::AppState;

/// Assemble the application router.
///
/// Generic over the session store so production (Postgres) and dev/test
/// (in-memory) share one assembly path.
pub fn build<Store>(
    state: AppState,
    session_layer: SessionManagerLayer<Store, SignedCookie>,
) -> Router
where
    Store: SessionStore + Clone,
{
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies session-store connectivity when sessions are Postgres-backed.
/// With the in-memory store there is nothing to probe, so readiness
/// equals liveness.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.pool() {
        Some(pool) => match sqlx::query("SELECT 1").fetch_one(pool).await {
            Ok(_) => StatusCode::OK,
            Err(_) => StatusCode::SERVICE_UNAVAILABLE,
        },
        None => StatusCode::OK,
    }
}
