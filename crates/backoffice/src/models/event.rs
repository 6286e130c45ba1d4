//! Event domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use regalia_core::{AccountId, EventId, EventType};

/// An occasion (wedding, prom, ...) owned by an account.
///
/// `is_active` gates visibility in every listing query; events are
/// deactivated rather than deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Unique event ID.
    pub id: EventId,
    /// Owning account. Must exist.
    pub account_id: AccountId,
    /// Display name, e.g. "Walker / Boone wedding".
    pub name: String,
    /// When the occasion takes place.
    pub event_at: DateTime<Utc>,
    /// The kind of occasion.
    pub event_type: EventType,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Free-form metadata map.
    pub metadata: serde_json::Value,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last updated.
    pub updated_at: DateTime<Utc>,
}
