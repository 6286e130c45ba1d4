//! Attendee and role domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use regalia_core::{AccountId, AttendeeId, EventId, LookId, RoleId};

/// A participant in an event.
///
/// Attendees need not hold an account (`account_id` is nullable) and may
/// exist before a look is assigned to them. They reference, not own, their
/// look and role; deactivating a look leaves the reference in place.
#[derive(Debug, Clone, Serialize)]
pub struct Attendee {
    /// Unique attendee ID.
    pub id: AttendeeId,
    /// The event this attendee belongs to.
    pub event_id: EventId,
    /// Linked account, when the attendee has one.
    pub account_id: Option<AccountId>,
    /// Assigned look, once chosen.
    pub look_id: Option<LookId>,
    /// Party role (groomsman, bridesmaid, ...).
    pub role_id: Option<RoleId>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Whether the attendee has been invited to the event.
    pub invited: bool,
    /// When the attendee was created.
    pub created_at: DateTime<Utc>,
    /// When the attendee was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A party role an attendee can hold within an event.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    /// Unique role ID.
    pub id: RoleId,
    /// Display name, e.g. "Best Man".
    pub name: String,
    /// Whether the role is offered for new assignments.
    pub is_active: bool,
}
