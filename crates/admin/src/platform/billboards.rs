//! Billboard operations, scoped to one store.

use tracing::instrument;

use storeroom_core::{Billboard, BillboardId, BillboardPayload, StoreId};

use super::{PlatformClient, PlatformError};

impl PlatformClient {
    /// List a store's billboards, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on transport failures or non-success
    /// responses.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, PlatformError> {
        let mut billboards: Vec<Billboard> = self.get(&format!("/{store_id}/billboards")).await?;
        billboards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(billboards)
    }

    /// Fetch a single billboard.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the billboard does not exist in
    /// this store.
    #[instrument(skip(self), fields(store_id = %store_id, billboard_id = %billboard_id))]
    pub async fn get_billboard(
        &self,
        store_id: StoreId,
        billboard_id: BillboardId,
    ) -> Result<Billboard, PlatformError> {
        self.get(&format!("/{store_id}/billboards/{billboard_id}"))
            .await
    }

    /// Create a billboard in a store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the platform rejects the payload.
    #[instrument(skip(self, payload), fields(store_id = %store_id))]
    pub async fn create_billboard(
        &self,
        store_id: StoreId,
        payload: &BillboardPayload,
    ) -> Result<Billboard, PlatformError> {
        self.post(&format!("/{store_id}/billboards"), payload).await
    }

    /// Update a billboard.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the billboard does not exist in
    /// this store.
    #[instrument(skip(self, payload), fields(store_id = %store_id, billboard_id = %billboard_id))]
    pub async fn update_billboard(
        &self,
        store_id: StoreId,
        billboard_id: BillboardId,
        payload: &BillboardPayload,
    ) -> Result<Billboard, PlatformError> {
        self.patch(&format!("/{store_id}/billboards/{billboard_id}"), payload)
            .await
    }

    /// Delete a billboard.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Conflict` while categories still reference
    /// the billboard.
    #[instrument(skip(self), fields(store_id = %store_id, billboard_id = %billboard_id))]
    pub async fn delete_billboard(
        &self,
        store_id: StoreId,
        billboard_id: BillboardId,
    ) -> Result<(), PlatformError> {
        self.delete(&format!("/{store_id}/billboards/{billboard_id}"))
            .await
    }
}
