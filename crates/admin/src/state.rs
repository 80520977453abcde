//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{config::AdminConfig, guard::SubmissionRegistry, platform::PlatformClient};

/// Application state shared across all handlers.
///
/// Cheap to clone; the inner state is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    platform: PlatformClient,
    /// Session-store pool. `None` when no database is configured and
    /// sessions live in memory.
    pool: Option<PgPool>,
    submissions: SubmissionRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, platform: PlatformClient, pool: Option<PgPool>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                platform,
                pool,
                submissions: SubmissionRegistry::new(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn platform(&self) -> &PlatformClient {
        &self.inner.platform
    }

    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    #[must_use]
    pub fn submissions(&self) -> &SubmissionRegistry {
        &self.inner.submissions
    }
}
