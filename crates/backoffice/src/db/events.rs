//! Event repository for database operations.
//!
//! `is_active` gates every listing query; events are deactivated, never
//! deleted. The group-customer query here feeds the customer-tagging job.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{AccountId, EventId, EventType};

use super::RepositoryError;
use crate::models::Event;

/// Internal row type for `PostgreSQL` event queries.
#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    account_id: Uuid,
    name: String,
    event_at: DateTime<Utc>,
    event_type: String,
    is_active: bool,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = RepositoryError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let event_type = row.event_type.parse::<EventType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid event type in database: {e}"))
        })?;

        Ok(Self {
            id: EventId::new(row.id),
            account_id: AccountId::new(row.account_id),
            name: row.name,
            event_at: row.event_at,
            event_type,
            is_active: row.is_active,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_EVENT: &str = "SELECT id, account_id, name, event_at, event_type, is_active, \
     metadata, created_at, updated_at FROM backoffice.event";

/// Fields for creating an event.
#[derive(Debug)]
pub struct NewEvent {
    pub account_id: AccountId,
    pub name: String,
    pub event_at: DateTime<Utc>,
    pub event_type: EventType,
    pub metadata: serde_json::Value,
}

/// Partial update for an event. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct EventPatch {
    pub name: Option<String>,
    pub event_at: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

/// Repository for event database operations.
pub struct EventRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepository<'a> {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ReferentialIntegrity` if the owner
    /// doesn't exist.
    /// Returns `RepositoryError::Validation` if the name is empty.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewEvent) -> Result<Event, RepositoryError> {
        if new.name.trim().is_empty() {
            return Err(RepositoryError::Validation("name is required".to_owned()));
        }

        let row = sqlx::query_as::<_, EventRow>(
            "INSERT INTO backoffice.event (account_id, name, event_at, event_type, metadata) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, account_id, name, event_at, event_type, is_active, \
                       metadata, created_at, updated_at",
        )
        .bind(new.account_id.as_uuid())
        .bind(&new.name)
        .bind(new.event_at)
        .bind(new.event_type.as_str())
        .bind(&new.metadata)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "event", "account"))?;

        row.try_into()
    }

    /// Get an event by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List active events, newest first, optionally scoped to an owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_active(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<Event>, RepositoryError> {
        let rows = match account_id {
            Some(owner) => {
                sqlx::query_as::<_, EventRow>(&format!(
                    "{SELECT_EVENT} WHERE is_active AND account_id = $1 ORDER BY created_at DESC"
                ))
                .bind(owner.as_uuid())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EventRow>(&format!(
                    "{SELECT_EVENT} WHERE is_active ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Active events created after `after` with at least `min_invited`
    /// active, invited attendees. Each qualifying event appears exactly
    /// once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_with_min_invited(
        &self,
        min_invited: i64,
        after: DateTime<Utc>,
    ) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "{SELECT_EVENT} e \
             WHERE e.is_active AND e.created_at > $2 \
               AND (SELECT COUNT(*) FROM backoffice.attendee a \
                    WHERE a.event_id = e.id AND a.is_active AND a.invited) >= $1 \
             ORDER BY e.created_at DESC"
        ))
        .bind(min_invited)
        .bind(after)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Distinct Shopify customer ids of owners of qualifying group events
    /// (active, created after `after`, with at least `min_invited` active
    /// invited attendees). Owners without a linked Shopify customer are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn group_customer_ids(
        &self,
        min_invited: i64,
        after: DateTime<Utc>,
    ) -> Result<Vec<String>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT acct.shopify_customer_id \
             FROM backoffice.event e \
             JOIN backoffice.account acct ON acct.id = e.account_id \
             WHERE e.is_active AND e.created_at > $2 \
               AND acct.shopify_customer_id IS NOT NULL \
               AND (SELECT COUNT(*) FROM backoffice.attendee a \
                    WHERE a.event_id = e.id AND a.is_active AND a.invited) >= $1 \
             ORDER BY acct.shopify_customer_id",
        )
        .bind(min_invited)
        .bind(after)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Apply a partial update to an event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the event doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: EventId, patch: &EventPatch) -> Result<Event, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            "UPDATE backoffice.event SET \
                 name = COALESCE($2, name), \
                 event_at = COALESCE($3, event_at), \
                 event_type = COALESCE($4, event_type), \
                 is_active = COALESCE($5, is_active), \
                 metadata = COALESCE($6, metadata), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, account_id, name, event_at, event_type, is_active, \
                       metadata, created_at, updated_at",
        )
        .bind(id.as_uuid())
        .bind(patch.name.as_deref())
        .bind(patch.event_at)
        .bind(patch.event_type.map(EventType::as_str))
        .bind(patch.is_active)
        .bind(patch.metadata.as_ref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
