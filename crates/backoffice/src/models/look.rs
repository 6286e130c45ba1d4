//! Look domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use regalia_core::{AccountId, LookId};

/// A named, versioned outfit specification.
///
/// `product_specs` is opaque beyond its envelope (`bundle.product_id`,
/// `items[].variant_sku`); `product_specs_legacy` keeps a snapshot of the
/// document as it was before its first rewrite.
///
/// Deactivation (`is_active = false`) is a one-way soft delete and never
/// removes attendee references. `fixed` records that external cleanup
/// (archiving the Shopify bundle product) has already run; once true,
/// cleanup jobs skip the look permanently.
#[derive(Debug, Clone, Serialize)]
pub struct Look {
    /// Unique look ID.
    pub id: LookId,
    /// Owning account.
    pub account_id: AccountId,
    /// Display name, e.g. "Charcoal Shawl".
    pub name: String,
    /// Bundle specification document (JSON).
    pub product_specs: serde_json::Value,
    /// Snapshot of the specs before their first rewrite, if any.
    pub product_specs_legacy: Option<serde_json::Value>,
    /// Path to the look's rendered image, when one exists.
    pub image_path: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Whether external cleanup has already processed this look.
    pub fixed: bool,
    /// When the look was created.
    pub created_at: DateTime<Utc>,
    /// When the look was last updated.
    pub updated_at: DateTime<Utc>,
}
