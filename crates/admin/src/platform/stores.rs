//! Store directory operations.

use tracing::instrument;

use storeroom_core::{Store, StoreId, StorePayload};

use super::{PlatformClient, PlatformError};

impl PlatformClient {
    /// List every store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on transport failures or non-success
    /// responses.
    #[instrument(skip(self))]
    pub async fn list_stores(&self) -> Result<Vec<Store>, PlatformError> {
        let mut stores: Vec<Store> = self.get("/stores").await?;
        stores.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stores)
    }

    /// Fetch a single store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the store does not exist.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn get_store(&self, store_id: StoreId) -> Result<Store, PlatformError> {
        self.get(&format!("/stores/{store_id}")).await
    }

    /// Create a store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the platform rejects the payload.
    #[instrument(skip(self, payload))]
    pub async fn create_store(&self, payload: &StorePayload) -> Result<Store, PlatformError> {
        self.post("/stores", payload).await
    }

    /// Rename a store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the store does not exist.
    #[instrument(skip(self, payload), fields(store_id = %store_id))]
    pub async fn update_store(
        &self,
        store_id: StoreId,
        payload: &StorePayload,
    ) -> Result<Store, PlatformError> {
        self.patch(&format!("/stores/{store_id}"), payload).await
    }

    /// Delete a store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Conflict` while products or categories still
    /// reference the store.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn delete_store(&self, store_id: StoreId) -> Result<(), PlatformError> {
        self.delete(&format!("/stores/{store_id}")).await
    }
}
