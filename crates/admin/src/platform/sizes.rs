//! Size catalog operations, scoped to one store.

use tracing::instrument;

use storeroom_core::{Size, SizeId, SizePayload, StoreId};

use super::{PlatformClient, PlatformError};

impl PlatformClient {
    /// List a store's sizes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on transport failures or non-success
    /// responses.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, PlatformError> {
        let mut sizes: Vec<Size> = self.get(&format!("/{store_id}/sizes")).await?;
        sizes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sizes)
    }

    /// Fetch a single size.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the size does not exist in this
    /// store.
    #[instrument(skip(self), fields(store_id = %store_id, size_id = %size_id))]
    pub async fn get_size(
        &self,
        store_id: StoreId,
        size_id: SizeId,
    ) -> Result<Size, PlatformError> {
        self.get(&format!("/{store_id}/sizes/{size_id}")).await
    }

    /// Create a size in a store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the platform rejects the payload.
    #[instrument(skip(self, payload), fields(store_id = %store_id))]
    pub async fn create_size(
        &self,
        store_id: StoreId,
        payload: &SizePayload,
    ) -> Result<Size, PlatformError> {
        self.post(&format!("/{store_id}/sizes"), payload).await
    }

    /// Update a size.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the size does not exist in this
    /// store.
    #[instrument(skip(self, payload), fields(store_id = %store_id, size_id = %size_id))]
    pub async fn update_size(
        &self,
        store_id: StoreId,
        size_id: SizeId,
        payload: &SizePayload,
    ) -> Result<Size, PlatformError> {
        self.patch(&format!("/{store_id}/sizes/{size_id}"), payload)
            .await
    }

    /// Delete a size.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Conflict` while products still reference the
    /// size.
    #[instrument(skip(self), fields(store_id = %store_id, size_id = %size_id))]
    pub async fn delete_size(
        &self,
        store_id: StoreId,
        size_id: SizeId,
    ) -> Result<(), PlatformError> {
        self.delete(&format!("/{store_id}/sizes/{size_id}")).await
    }
}
