//! Discount domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use regalia_core::{AttendeeId, DiscountId, DiscountType, EventId};

/// A single-use credit tied to an attendee within an event.
///
/// `used` flips exactly once from false to true and is never reset; no
/// operation in the public contract writes it back. Deactivating the
/// matching Shopify discount once `used` is observed true is the
/// deactivation job's responsibility, not the core's.
#[derive(Debug, Clone, Serialize)]
pub struct Discount {
    /// Unique discount ID.
    pub id: DiscountId,
    /// The event this discount is scoped to.
    pub event_id: EventId,
    /// The attendee this discount is scoped to.
    pub attendee_id: AttendeeId,
    /// Monetary amount. Zero for `PARTY_OF_FOUR` by convention.
    pub amount: Decimal,
    /// Type-specific semantics of the credit.
    pub discount_type: DiscountType,
    /// Whether the discount has been redeemed. One-way.
    pub used: bool,
    /// Customer-facing code (`GRP-`/`IND-` prefixed).
    pub code: String,
    /// Shopify discount id backing this code, when one exists.
    pub shopify_discount_id: Option<String>,
    /// Shopify product id the credit applies to, when restricted.
    pub shopify_product_id: Option<String>,
    /// Shopify variant id the credit applies to, when restricted.
    pub shopify_variant_id: Option<String>,
    /// When the discount was created.
    pub created_at: DateTime<Utc>,
    /// When the discount was last updated.
    pub updated_at: DateTime<Utc>,
}
