//! Attendee and role repositories for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{AccountId, AttendeeId, EventId, LookId, RoleId};

use super::RepositoryError;
use crate::models::{Attendee, Role};

/// Internal row type for `PostgreSQL` attendee queries.
#[derive(Debug, sqlx::FromRow)]
struct AttendeeRow {
    id: Uuid,
    event_id: Uuid,
    account_id: Option<Uuid>,
    look_id: Option<Uuid>,
    role_id: Option<Uuid>,
    first_name: String,
    last_name: String,
    is_active: bool,
    invited: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AttendeeRow> for Attendee {
    fn from(row: AttendeeRow) -> Self {
        Self {
            id: AttendeeId::new(row.id),
            event_id: EventId::new(row.event_id),
            account_id: row.account_id.map(AccountId::new),
            look_id: row.look_id.map(LookId::new),
            role_id: row.role_id.map(RoleId::new),
            first_name: row.first_name,
            last_name: row.last_name,
            is_active: row.is_active,
            invited: row.invited,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for `PostgreSQL` role queries.
#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    is_active: bool,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: RoleId::new(row.id),
            name: row.name,
            is_active: row.is_active,
        }
    }
}

const SELECT_ATTENDEE: &str = "SELECT id, event_id, account_id, look_id, role_id, first_name, \
     last_name, is_active, invited, created_at, updated_at FROM backoffice.attendee";

/// Fields for creating an attendee.
#[derive(Debug)]
pub struct NewAttendee {
    pub event_id: EventId,
    pub account_id: Option<AccountId>,
    pub look_id: Option<LookId>,
    pub role_id: Option<RoleId>,
    pub first_name: String,
    pub last_name: String,
    pub invited: bool,
}

/// Partial update for an attendee. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct AttendeePatch {
    pub account_id: Option<AccountId>,
    pub look_id: Option<LookId>,
    pub role_id: Option<RoleId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub invited: Option<bool>,
}

/// Repository for attendee database operations.
pub struct AttendeeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttendeeRepository<'a> {
    /// Create a new attendee repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new attendee in an event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ReferentialIntegrity` if the event (or a
    /// referenced account, look or role) doesn't exist.
    /// Returns `RepositoryError::Validation` if a name field is empty.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewAttendee) -> Result<Attendee, RepositoryError> {
        if new.first_name.trim().is_empty() || new.last_name.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "first_name and last_name are required".to_owned(),
            ));
        }

        let row = sqlx::query_as::<_, AttendeeRow>(
            "INSERT INTO backoffice.attendee \
                 (event_id, account_id, look_id, role_id, first_name, last_name, invited) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, event_id, account_id, look_id, role_id, first_name, last_name, \
                       is_active, invited, created_at, updated_at",
        )
        .bind(new.event_id.as_uuid())
        .bind(new.account_id.map(|id| id.as_uuid()))
        .bind(new.look_id.map(|id| id.as_uuid()))
        .bind(new.role_id.map(|id| id.as_uuid()))
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.invited)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "attendee", "referenced row"))?;

        Ok(row.into())
    }

    /// Get an attendee by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AttendeeId) -> Result<Option<Attendee>, RepositoryError> {
        let row = sqlx::query_as::<_, AttendeeRow>(&format!("{SELECT_ATTENDEE} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List attendees of an event, in creation order. Deactivated attendees
    /// are included; callers that only care about the active party filter
    /// on `is_active`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Attendee>, RepositoryError> {
        let rows = sqlx::query_as::<_, AttendeeRow>(&format!(
            "{SELECT_ATTENDEE} WHERE event_id = $1 ORDER BY created_at ASC"
        ))
        .bind(event_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update to an attendee.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the attendee doesn't exist.
    /// Returns `RepositoryError::ReferentialIntegrity` if a newly
    /// referenced account, look or role doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AttendeeId,
        patch: &AttendeePatch,
    ) -> Result<Attendee, RepositoryError> {
        let row = sqlx::query_as::<_, AttendeeRow>(
            "UPDATE backoffice.attendee SET \
                 account_id = COALESCE($2, account_id), \
                 look_id = COALESCE($3, look_id), \
                 role_id = COALESCE($4, role_id), \
                 first_name = COALESCE($5, first_name), \
                 last_name = COALESCE($6, last_name), \
                 is_active = COALESCE($7, is_active), \
                 invited = COALESCE($8, invited), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, event_id, account_id, look_id, role_id, first_name, last_name, \
                       is_active, invited, created_at, updated_at",
        )
        .bind(id.as_uuid())
        .bind(patch.account_id.map(|id| id.as_uuid()))
        .bind(patch.look_id.map(|id| id.as_uuid()))
        .bind(patch.role_id.map(|id| id.as_uuid()))
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.is_active)
        .bind(patch.invited)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "attendee", "referenced row"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}

/// Repository for party-role lookups. Roles are seeded by migration and
/// only read at runtime.
pub struct RoleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RoleRepository<'a> {
    /// Create a new role repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List active roles by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Role>, RepositoryError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, is_active FROM backoffice.role \
             WHERE is_active ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a role by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: RoleId) -> Result<Option<Role>, RepositoryError> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, is_active FROM backoffice.role WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
