//! Suit-builder catalog domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use regalia_core::CatalogItemId;

/// An entry in the suit-builder catalog: a purchasable piece (jacket,
/// shirt, tie, ...) a look can be assembled from.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    /// Unique catalog item ID.
    pub id: CatalogItemId,
    /// Display name.
    pub name: String,
    /// Category slug, e.g. "jacket", "shirt", "accessory".
    pub category: String,
    /// Shopify product id.
    pub shopify_product_id: Option<String>,
    /// Shopify variant id.
    pub shopify_variant_id: Option<String>,
    /// SKU of the variant.
    pub variant_sku: String,
    /// Sort position within the category.
    pub display_order: i32,
    /// Whether the piece is offered in the builder.
    pub is_active: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}
