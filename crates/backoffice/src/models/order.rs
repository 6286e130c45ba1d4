//! Order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use regalia_core::{AccountId, EventId, ItemStatus, OrderId, OrderItemId, OrderType};

/// A commerce record linking an account (and optionally an event) to
/// purchased items.
///
/// `order_types` captures why the order exists and is multi-valued; values
/// are additive forever so historical reporting keeps working. Timestamps
/// are set by the store at creation and `created_at` is never rewritten.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Purchasing account.
    pub account_id: AccountId,
    /// The event the order was placed for, when there is one.
    pub event_id: Option<EventId>,
    /// Shopify order id. Unique when present.
    pub shopify_order_id: Option<String>,
    /// Human-facing Shopify order number.
    pub shopify_order_number: Option<String>,
    /// Why this order exists (new order, resize, ...). Insertion-ordered.
    pub order_types: Vec<OrderType>,
    /// Free-form metadata map.
    pub meta: serde_json::Value,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A single line item within an order.
///
/// Only the current `status` is stored; updates overwrite it in place.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Unique order item ID.
    pub id: OrderItemId,
    /// The order this item belongs to. Exactly one.
    pub order_id: OrderId,
    /// Shopify product id.
    pub shopify_product_id: Option<String>,
    /// Shopify variant id.
    pub shopify_variant_id: Option<String>,
    /// SKU of the purchased variant.
    pub variant_sku: String,
    /// Number of units.
    pub quantity: i32,
    /// Current fulfillment state.
    pub status: ItemStatus,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}
