//! Session middleware configuration.
//!
//! Sessions carry the cached operator identity and the queued toast
//! notifications. With a database configured they persist in
//! `PostgreSQL` via tower-sessions; without one they fall back to an
//! in-memory store, which is fine for local development against a stub
//! platform. Session cookies are signed with a key derived from
//! `ADMIN_SESSION_SECRET`, so a forged or tampered cookie is rejected
//! before any store lookup.

use cookie::Key;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "storeroom_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer backed by `PostgreSQL`.
///
/// Runs the store's own migration, which creates the `admin` schema and
/// `session` table if they do not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the migration fails.
///
/// # Panics
///
/// Panics if the schema name or table name is invalid (should never happen
/// with hardcoded "admin" and "session" values).
pub async fn create_postgres_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, sqlx::Error> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("admin")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");
    store.migrate().await?;

    Ok(configure(store, config))
}

/// Create the session layer backed by an in-memory store.
#[must_use]
pub fn create_memory_session_layer(
    config: &AdminConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    configure(MemoryStore::default(), config)
}

/// Cookie signing key derived from the configured session secret.
///
/// # Panics
///
/// Panics if the secret is shorter than the key derivation minimum of
/// 32 bytes; config validation rejects such secrets before this runs.
fn signing_key(config: &AdminConfig) -> Key {
    Key::derive_from(config.session_secret.expose_secret().as_bytes())
}

/// Cookie settings shared by both stores.
fn configure<Store: SessionStore>(
    store: Store,
    config: &AdminConfig,
) -> SessionManagerLayer<Store, SignedCookie> {
    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        // SameSite=Strict: nothing legitimate links into the back office
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config))
}
