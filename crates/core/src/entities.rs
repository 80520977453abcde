//! Wire-format records and mutation payloads for the platform API.
//!
//! The platform API is the single owner of entity data; the dashboard
//! reads and mutates it over HTTP. These structs are the JSON bodies of
//! that exchange. Record structs mirror what the platform returns;
//! payload structs carry the descriptive (mutable) fields of a create or
//! update request. Identity fields never appear in payloads because they
//! are immutable after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BillboardId, ColorId, HexColor, OrderId, Price, SizeId, StoreId};

// =============================================================================
// Records
// =============================================================================

/// A tenant store. Billboards, colors, sizes, and orders are partitioned
/// beneath exactly one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Store ID.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A promotional billboard displayed on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Billboard {
    /// Billboard ID.
    pub id: BillboardId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display label.
    pub label: String,
    /// URL of the billboard image. The image itself lives elsewhere;
    /// only the reference is stored.
    pub image_url: String,
    /// When the billboard was created.
    pub created_at: DateTime<Utc>,
    /// When the billboard was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A product color option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Color {
    /// Color ID.
    pub id: ColorId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display name, e.g. "Red".
    pub name: String,
    /// Hex value, e.g. `#FF0000`.
    pub value: HexColor,
    /// When the color was created.
    pub created_at: DateTime<Utc>,
    /// When the color was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A product size option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Size {
    /// Size ID.
    pub id: SizeId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display name, e.g. "Large".
    pub name: String,
    /// Value, e.g. "L".
    pub value: String,
    /// When the size was created.
    pub created_at: DateTime<Utc>,
    /// When the size was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A customer order. Read-only in the dashboard: the platform records
/// orders, the dashboard only lists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Owning store.
    pub store_id: StoreId,
    /// Names of the products in the order.
    pub product_names: Vec<String>,
    /// Customer phone number.
    pub phone: String,
    /// Shipping address.
    pub address: String,
    /// Order total.
    pub total: Price,
    /// Whether payment has completed.
    pub is_paid: bool,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Mutation payloads
// =============================================================================

/// Body of a store create or rename request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePayload {
    /// Display name.
    pub name: String,
}

/// Body of a billboard create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillboardPayload {
    /// Display label.
    pub label: String,
    /// URL of the billboard image.
    pub image_url: String,
}

/// Body of a color create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPayload {
    /// Display name.
    pub name: String,
    /// Hex value.
    pub value: HexColor,
}

/// Body of a size create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePayload {
    /// Display name.
    pub name: String,
    /// Value.
    pub value: String,
}
