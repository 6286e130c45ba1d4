//! Account repository for database operations.
//!
//! Email uniqueness is case-insensitive: the table carries a unique index
//! on `lower(email)` and every lookup compares through `lower()`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{AccountId, AccountStatus, Email};

use super::RepositoryError;
use crate::models::Account;

/// Internal row type for `PostgreSQL` account queries.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    shopify_customer_id: Option<String>,
    account_status: String,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = RepositoryError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let status = row.account_status.parse::<AccountStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid account status in database: {e}"))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            email,
            first_name: row.first_name,
            last_name: row.last_name,
            shopify_customer_id: row.shopify_customer_id,
            status,
            metadata: row.metadata,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_ACCOUNT: &str = "SELECT id, email, first_name, last_name, shopify_customer_id, \
     account_status, metadata, created_at, updated_at FROM backoffice.account";

/// Fields for creating an account.
#[derive(Debug)]
pub struct NewAccount {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub shopify_customer_id: Option<String>,
    pub metadata: serde_json::Value,
}

/// Partial update for an account. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct AccountPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub shopify_customer_id: Option<String>,
    pub status: Option<AccountStatus>,
    pub metadata: Option<serde_json::Value>,
}

/// Repository for account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new account. New accounts start disabled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists
    /// (compared case-insensitively).
    /// Returns `RepositoryError::Validation` if a name field is empty.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewAccount) -> Result<Account, RepositoryError> {
        if new.first_name.trim().is_empty() || new.last_name.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "first_name and last_name are required".to_owned(),
            ));
        }

        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO backoffice.account \
                 (email, first_name, last_name, shopify_customer_id, metadata) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, email, first_name, last_name, shopify_customer_id, \
                       account_status, metadata, created_at, updated_at",
        )
        .bind(new.email.as_str())
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(new.shopify_customer_id.as_deref())
        .bind(&new.metadata)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "email", "account"))?;

        row.try_into()
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an account by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{SELECT_ACCOUNT} WHERE lower(email) = lower($1)"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} ORDER BY created_at DESC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Apply a partial update to an account.
    ///
    /// The email itself is immutable through this path; a mistyped address
    /// is handled by support as a dedupe/merge, not an edit.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AccountId,
        patch: &AccountPatch,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "UPDATE backoffice.account SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 shopify_customer_id = COALESCE($4, shopify_customer_id), \
                 account_status = COALESCE($5, account_status), \
                 metadata = COALESCE($6, metadata), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, email, first_name, last_name, shopify_customer_id, \
                       account_status, metadata, created_at, updated_at",
        )
        .bind(id.as_uuid())
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.shopify_customer_id.as_deref())
        .bind(patch.status.map(AccountStatus::as_str))
        .bind(patch.metadata.as_ref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Normalized email addresses held by more than one account.
    ///
    /// The dedupe job drives off this list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn duplicate_emails(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query_scalar::<_, String>(
            "SELECT lower(email) FROM backoffice.account \
             GROUP BY lower(email) HAVING COUNT(*) > 1 \
             ORDER BY lower(email)",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// All accounts holding the given address, ignoring case, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list_by_email_ci(&self, email: &str) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "{SELECT_ACCOUNT} WHERE lower(email) = lower($1) ORDER BY created_at ASC"
        ))
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Merge `duplicate` into `keeper`: repoint every owned or referencing
    /// row, then delete the duplicate account. Runs in one transaction so a
    /// failure leaves both accounts untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the duplicate doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn merge_duplicate(
        &self,
        keeper: AccountId,
        duplicate: AccountId,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for table in ["event", "look", "customer_order"] {
            sqlx::query(&format!(
                "UPDATE backoffice.{table} SET account_id = $1 WHERE account_id = $2"
            ))
            .bind(keeper.as_uuid())
            .bind(duplicate.as_uuid())
            .execute(&mut *tx)
            .await?;
        }

        // attendee.account_id is nullable but repoints the same way
        sqlx::query("UPDATE backoffice.attendee SET account_id = $1 WHERE account_id = $2")
            .bind(keeper.as_uuid())
            .bind(duplicate.as_uuid())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM backoffice.account WHERE id = $1")
            .bind(duplicate.as_uuid())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
