//! Account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use regalia_core::{AccountId, AccountStatus, Email};

/// An account holder: the root of ownership for events, looks and orders.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Email address. Unique across accounts, compared case-insensitively.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Shopify customer id, once the account is linked to the store.
    pub shopify_customer_id: Option<String>,
    /// Lifecycle status; accounts start disabled until activation.
    pub status: AccountStatus,
    /// Free-form metadata map.
    pub metadata: serde_json::Value,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
