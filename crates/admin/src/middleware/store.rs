//! Store scope resolution.
//!
//! Every store-scoped URL starts with a `{store_id}` segment, and every
//! page under it shows the store's name in the chrome. The extractor
//! resolves the segment against the platform once, so handlers receive a
//! store that is known to exist and requests for unknown stores stop at
//! a 404 before any entity call.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;

use storeroom_core::{Store, StoreId};

use crate::{error::AppError, platform::PlatformError, state::AppState};

/// Extractor that resolves the `{store_id}` path segment to a live store.
pub struct ActiveStore(pub Store);

#[derive(Debug, Deserialize)]
struct StorePathParams {
    store_id: StoreId,
}

impl FromRequestParts<AppState> for ActiveStore {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<StorePathParams>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("missing or malformed store id".to_string()))?;

        let store = state
            .platform()
            .get_store(params.store_id)
            .await
            .map_err(|e| match e {
                PlatformError::NotFound => {
                    AppError::NotFound(format!("store {}", params.store_id))
                }
                other => AppError::from(other),
            })?;

        Ok(Self(store))
    }
}
