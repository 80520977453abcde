//! Color catalog operations, scoped to one store.

use tracing::instrument;

use storeroom_core::{Color, ColorId, ColorPayload, StoreId};

use super::{PlatformClient, PlatformError};

impl PlatformClient {
    /// List a store's colors, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on transport failures or non-success
    /// responses.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, PlatformError> {
        let mut colors: Vec<Color> = self.get(&format!("/{store_id}/colors")).await?;
        colors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(colors)
    }

    /// Fetch a single color.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the color does not exist in
    /// this store.
    #[instrument(skip(self), fields(store_id = %store_id, color_id = %color_id))]
    pub async fn get_color(
        &self,
        store_id: StoreId,
        color_id: ColorId,
    ) -> Result<Color, PlatformError> {
        self.get(&format!("/{store_id}/colors/{color_id}")).await
    }

    /// Create a color in a store.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` if the platform rejects the payload.
    #[instrument(skip(self, payload), fields(store_id = %store_id))]
    pub async fn create_color(
        &self,
        store_id: StoreId,
        payload: &ColorPayload,
    ) -> Result<Color, PlatformError> {
        self.post(&format!("/{store_id}/colors"), payload).await
    }

    /// Update a color.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::NotFound` if the color does not exist in
    /// this store.
    #[instrument(skip(self, payload), fields(store_id = %store_id, color_id = %color_id))]
    pub async fn update_color(
        &self,
        store_id: StoreId,
        color_id: ColorId,
        payload: &ColorPayload,
    ) -> Result<Color, PlatformError> {
        self.patch(&format!("/{store_id}/colors/{color_id}"), payload)
            .await
    }

    /// Delete a color.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Conflict` while products still reference the
    /// color.
    #[instrument(skip(self), fields(store_id = %store_id, color_id = %color_id))]
    pub async fn delete_color(
        &self,
        store_id: StoreId,
        color_id: ColorId,
    ) -> Result<(), PlatformError> {
        self.delete(&format!("/{store_id}/colors/{color_id}")).await
    }
}
