//! Database operations for the backoffice `PostgreSQL` schema.
//!
//! # Schema: `backoffice`
//!
//! ## Tables
//!
//! - `account` - Account holders (unique email, case-insensitive)
//! - `event` - Occasions owned by an account
//! - `attendee` / `role` - Event participants and their party roles
//! - `look` - Named outfit specifications (JSONB `product_specs`)
//! - `customer_order` / `order_item` - Commerce records
//! - `discount` - Single-use credits scoped to an attendee within an event
//! - `rma` / `rma_item` - Return merchandise authorizations
//! - `catalog_item` - Suit-builder catalog entries
//!
//! # Migrations
//!
//! Migrations are stored in `crates/backoffice/migrations/` and run via:
//! ```bash
//! cargo run -p regalia-cli -- migrate
//! ```

pub mod accounts;
pub mod attendees;
pub mod catalog;
pub mod discounts;
pub mod events;
pub mod looks;
pub mod orders;
pub mod rmas;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::AccountRepository;
pub use attendees::{AttendeeRepository, RoleRepository};
pub use catalog::CatalogRepository;
pub use discounts::DiscountRepository;
pub use events::EventRepository;
pub use looks::LookRepository;
pub use orders::OrderRepository;
pub use rmas::RmaRepository;

/// Errors that can occur during repository operations.
///
/// This is the error taxonomy the whole core surfaces: typed failures,
/// no automatic retry anywhere.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness violation (e.g. duplicate email or Shopify order id).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced row does not exist (foreign key target missing).
    #[error("referential integrity: {0}")]
    ReferentialIntegrity(String),

    /// A required field is missing or carries an invalid value.
    #[error("validation: {0}")]
    Validation(String),
}

impl RepositoryError {
    /// Map a sqlx error from an INSERT/UPDATE into the taxonomy.
    ///
    /// Unique violations become [`RepositoryError::Conflict`] and foreign
    /// key violations become [`RepositoryError::ReferentialIntegrity`];
    /// anything else stays a raw database error.
    pub(crate) fn from_write(e: sqlx::Error, unique: &str, referenced: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return Self::Conflict(format!("{unique} already exists"));
            }
            if db_err.is_foreign_key_violation() {
                return Self::ReferentialIntegrity(format!("{referenced} does not exist"));
            }
        }
        Self::Database(e)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Conflict("email already exists".to_owned());
        assert_eq!(err.to_string(), "constraint violation: email already exists");

        let err = RepositoryError::ReferentialIntegrity("attendee does not exist".to_owned());
        assert_eq!(
            err.to_string(),
            "referential integrity: attendee does not exist"
        );

        let err = RepositoryError::Validation("amount must be non-negative".to_owned());
        assert_eq!(err.to_string(), "validation: amount must be non-negative");
    }

    #[test]
    fn test_from_write_passes_through_non_db_errors() {
        let err = RepositoryError::from_write(sqlx::Error::RowNotFound, "email", "account");
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
