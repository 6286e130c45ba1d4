//! Reconciliation job commands.
//!
//! Each command builds the pool (and, where needed, the Shopify client)
//! from the environment and hands off to the job in
//! `regalia_backoffice::jobs`. Jobs print their summary through tracing;
//! a per-item failure does not fail the command.

use chrono::{DateTime, Utc};
use thiserror::Error;

use regalia_backoffice::config::BackofficeConfig;
use regalia_backoffice::jobs::{self, JobError};
use regalia_backoffice::shopify::ShopifyClient;
use regalia_backoffice::db;

/// Errors that can occur while driving a job.
#[derive(Debug, Error)]
pub enum JobCommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] regalia_backoffice::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Job error: {0}")]
    Job(#[from] JobError),
}

async fn pool_and_shopify() -> Result<(sqlx::PgPool, ShopifyClient), JobCommandError> {
    let config = BackofficeConfig::from_env()?;
    let shopify = ShopifyClient::new(config.require_shopify()?);
    let pool = db::create_pool(&config.database_url).await?;
    Ok((pool, shopify))
}

/// Run the group-customer tagging job.
///
/// # Errors
///
/// Returns `JobCommandError` if configuration, the database, or the batch
/// itself fails.
pub async fn tag_group_customers(
    min_invited: i64,
    after: DateTime<Utc>,
) -> Result<(), JobCommandError> {
    let (pool, shopify) = pool_and_shopify().await?;
    jobs::tag_group_customers(&pool, &shopify, min_invited, after).await?;
    Ok(())
}

/// Run the look-archival job.
///
/// # Errors
///
/// Returns `JobCommandError` if configuration, the database, or the batch
/// itself fails.
pub async fn archive_looks() -> Result<(), JobCommandError> {
    let (pool, shopify) = pool_and_shopify().await?;
    jobs::archive_looks(&pool, &shopify).await?;
    Ok(())
}

/// Run the account dedupe job. Database-only; Shopify is not required.
///
/// # Errors
///
/// Returns `JobCommandError` if configuration or the database fails, or
/// if the batch hits its exactly-two invariant.
pub async fn dedupe_users() -> Result<(), JobCommandError> {
    let config = BackofficeConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    jobs::dedupe_users(&pool).await?;
    Ok(())
}

/// Run the discount-deactivation job.
///
/// # Errors
///
/// Returns `JobCommandError` if configuration, the database, or the batch
/// itself fails.
pub async fn deactivate_discounts(code_prefix: Option<&str>) -> Result<(), JobCommandError> {
    let (pool, shopify) = pool_and_shopify().await?;
    jobs::deactivate_discounts(&pool, &shopify, code_prefix).await?;
    Ok(())
}
