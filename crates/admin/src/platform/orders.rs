//! Order operations, scoped to one store.
//!
//! Orders are created by checkout flows elsewhere in the platform; the
//! dashboard only reads them.

use tracing::instrument;

use storeroom_core::{Order, StoreId};

use super::{PlatformClient, PlatformError};

impl PlatformClient {
    /// List a store's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on transport failures or non-success
    /// responses.
    #[instrument(skip(self), fields(store_id = %store_id))]
    pub async fn list_orders(&self, store_id: StoreId) -> Result<Vec<Order>, PlatformError> {
        let mut orders: Vec<Order> = self.get(&format!("/{store_id}/orders")).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
