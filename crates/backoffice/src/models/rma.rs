//! RMA domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use regalia_core::{OrderId, RmaId, RmaItemDisposition, RmaItemId, RmaStatus, RmaType};

/// A return merchandise authorization against an order.
///
/// `status` is an open, append-only value set; transitions are not
/// constrained here (warehouse tooling writes them in whatever order its
/// workflow produces). `rma_types` is multi-valued and insertion-order
/// preserving. The item totals are stored redundantly and maintained by
/// whoever mutates the items; the core never recomputes them.
#[derive(Debug, Clone, Serialize)]
pub struct Rma {
    /// Unique RMA ID.
    pub id: RmaId,
    /// The order being returned against.
    pub order_id: OrderId,
    /// Human-facing RMA number. Unique.
    pub rma_number: String,
    /// Current workflow status.
    pub status: RmaStatus,
    /// Why the RMA exists; an RMA can be several things at once.
    pub rma_types: Vec<RmaType>,
    /// How many items the warehouse expects back.
    pub total_items_expected: i32,
    /// How many items the warehouse has received so far.
    pub total_items_received: i32,
    /// When the RMA was created.
    pub created_at: DateTime<Utc>,
    /// When the RMA was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A single item within an RMA.
///
/// The disposition is per item and does not have to match the parent
/// RMA's type set.
#[derive(Debug, Clone, Serialize)]
pub struct RmaItem {
    /// Unique RMA item ID.
    pub id: RmaItemId,
    /// The RMA this item belongs to. Exactly one.
    pub rma_id: RmaId,
    /// Shopify product id.
    pub shopify_product_id: Option<String>,
    /// Shopify variant id.
    pub shopify_variant_id: Option<String>,
    /// SKU of the returned variant.
    pub variant_sku: String,
    /// What the customer paid for the item.
    pub purchased_price: Decimal,
    /// Number of units coming back.
    pub quantity: i32,
    /// Why this particular item is coming back.
    pub disposition: RmaItemDisposition,
    /// Free-form note from customer service.
    pub reason: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}
