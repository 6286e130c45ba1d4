//! Look repository for database operations.
//!
//! Looks carry two one-way flags: `is_active` (soft delete, never
//! auto-reversed) and `fixed` (external cleanup already ran). The archive
//! job drives off `list_unfixed_inactive` and flips `fixed` via
//! `mark_fixed`, which makes re-runs skip the look permanently.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{AccountId, LookId, ProductSpecs};

use super::RepositoryError;
use crate::models::Look;

/// Internal row type for `PostgreSQL` look queries.
#[derive(Debug, sqlx::FromRow)]
struct LookRow {
    id: Uuid,
    account_id: Uuid,
    name: String,
    product_specs: serde_json::Value,
    product_specs_legacy: Option<serde_json::Value>,
    image_path: Option<String>,
    is_active: bool,
    fixed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LookRow> for Look {
    fn from(row: LookRow) -> Self {
        Self {
            id: LookId::new(row.id),
            account_id: AccountId::new(row.account_id),
            name: row.name,
            product_specs: row.product_specs,
            product_specs_legacy: row.product_specs_legacy,
            image_path: row.image_path,
            is_active: row.is_active,
            fixed: row.fixed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_LOOK: &str = "SELECT id, account_id, name, product_specs, product_specs_legacy, \
     image_path, is_active, fixed, created_at, updated_at FROM backoffice.look";

const RETURNING_LOOK: &str = "RETURNING id, account_id, name, product_specs, \
     product_specs_legacy, image_path, is_active, fixed, created_at, updated_at";

/// Fields for creating a look.
#[derive(Debug)]
pub struct NewLook {
    pub account_id: AccountId,
    pub name: String,
    pub product_specs: serde_json::Value,
    pub image_path: Option<String>,
}

/// Partial update for a look. `None` fields are left unchanged.
///
/// The activity and cleanup flags are deliberately absent: deactivation
/// and `fixed` are one-way operations with their own methods.
#[derive(Debug, Default)]
pub struct LookPatch {
    pub name: Option<String>,
    pub product_specs: Option<serde_json::Value>,
    pub image_path: Option<String>,
}

/// Repository for look database operations.
pub struct LookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LookRepository<'a> {
    /// Create a new look repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new look.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if the specs document does not
    /// match the required envelope.
    /// Returns `RepositoryError::ReferentialIntegrity` if the owner doesn't
    /// exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewLook) -> Result<Look, RepositoryError> {
        ProductSpecs::from_value(&new.product_specs)
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;

        let row = sqlx::query_as::<_, LookRow>(&format!(
            "INSERT INTO backoffice.look (account_id, name, product_specs, image_path) \
             VALUES ($1, $2, $3, $4) {RETURNING_LOOK}"
        ))
        .bind(new.account_id.as_uuid())
        .bind(&new.name)
        .bind(&new.product_specs)
        .bind(new.image_path.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "look", "account"))?;

        Ok(row.into())
    }

    /// Get a look by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: LookId) -> Result<Option<Look>, RepositoryError> {
        let row = sqlx::query_as::<_, LookRow>(&format!("{SELECT_LOOK} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List active looks, newest first, optionally scoped to an owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(
        &self,
        account_id: Option<AccountId>,
    ) -> Result<Vec<Look>, RepositoryError> {
        let rows = match account_id {
            Some(owner) => {
                sqlx::query_as::<_, LookRow>(&format!(
                    "{SELECT_LOOK} WHERE is_active AND account_id = $1 ORDER BY created_at DESC"
                ))
                .bind(owner.as_uuid())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, LookRow>(&format!(
                    "{SELECT_LOOK} WHERE is_active ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Deactivated looks that external cleanup has not yet processed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_unfixed_inactive(&self) -> Result<Vec<Look>, RepositoryError> {
        let rows = sqlx::query_as::<_, LookRow>(&format!(
            "{SELECT_LOOK} WHERE NOT is_active AND NOT fixed ORDER BY updated_at ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update to a look.
    ///
    /// When `product_specs` is rewritten for the first time, the previous
    /// document is snapshotted into `product_specs_legacy`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if new specs don't match the
    /// envelope.
    /// Returns `RepositoryError::NotFound` if the look doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: LookId, patch: &LookPatch) -> Result<Look, RepositoryError> {
        if let Some(specs) = &patch.product_specs {
            ProductSpecs::from_value(specs)
                .map_err(|e| RepositoryError::Validation(e.to_string()))?;
        }

        let row = sqlx::query_as::<_, LookRow>(&format!(
            "UPDATE backoffice.look SET \
                 name = COALESCE($2, name), \
                 product_specs_legacy = CASE \
                     WHEN $3::jsonb IS NOT NULL AND product_specs_legacy IS NULL \
                     THEN product_specs ELSE product_specs_legacy END, \
                 product_specs = COALESCE($3, product_specs), \
                 image_path = COALESCE($4, image_path), \
                 updated_at = now() \
             WHERE id = $1 {RETURNING_LOOK}"
        ))
        .bind(id.as_uuid())
        .bind(patch.name.as_deref())
        .bind(patch.product_specs.as_ref())
        .bind(patch.image_path.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Soft-delete a look. One-way; attendee references stay in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the look doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn deactivate(&self, id: LookId) -> Result<Look, RepositoryError> {
        let row = sqlx::query_as::<_, LookRow>(&format!(
            "UPDATE backoffice.look SET is_active = FALSE, updated_at = now() \
             WHERE id = $1 {RETURNING_LOOK}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Record that external cleanup has processed this look. One-way; once
    /// set, cleanup jobs skip the look permanently.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the look doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_fixed(&self, id: LookId) -> Result<Look, RepositoryError> {
        let row = sqlx::query_as::<_, LookRow>(&format!(
            "UPDATE backoffice.look SET fixed = TRUE, updated_at = now() \
             WHERE id = $1 {RETURNING_LOOK}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
