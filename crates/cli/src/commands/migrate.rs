//! Database migration command.
//!
//! Migrations live in `crates/backoffice/migrations/` and are embedded at
//! compile time, so the binary can migrate any environment it can reach.

use regalia_backoffice::config::BackofficeConfig;
use regalia_backoffice::db;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] regalia_backoffice::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run backoffice database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the configuration is incomplete, the
/// database is unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = BackofficeConfig::from_env()?;

    tracing::info!("Connecting to backoffice database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running backoffice migrations...");
    sqlx::migrate!("../backoffice/migrations").run(&pool).await?;

    tracing::info!("Backoffice migrations complete!");
    Ok(())
}
