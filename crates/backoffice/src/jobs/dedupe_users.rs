//! Merge accounts that share an email address.

use sqlx::PgPool;
use tracing::instrument;

use crate::db::AccountRepository;

use super::{JobError, JobSummary};

/// Merge duplicate accounts: for every email held by more than one
/// account (compared case-insensitively), keep the older account, repoint
/// events, looks, orders and attendees to it, and delete the newer one.
///
/// The job expects exactly two accounts per duplicated email. Any other
/// count means the data is in a state this script was not written for, and
/// the whole batch aborts rather than guessing.
///
/// # Errors
///
/// Returns [`JobError::InvariantViolation`] if a duplicated email has a
/// count other than two; nothing after that email is touched.
/// Returns [`JobError::Repository`] if a query or merge fails.
#[instrument(skip(pool))]
pub async fn dedupe_users(pool: &PgPool) -> Result<JobSummary, JobError> {
    let accounts = AccountRepository::new(pool);
    let emails = accounts.duplicate_emails().await?;

    let mut summary = JobSummary {
        selected: emails.len(),
        ..JobSummary::default()
    };

    tracing::info!(emails = emails.len(), "deduplicating accounts");

    for email in emails {
        let duplicates = accounts.list_by_email_ci(&email).await?;

        // list_by_email_ci returns oldest first; keep the original.
        let [keeper, duplicate] = duplicates.as_slice() else {
            return Err(JobError::InvariantViolation(format!(
                "expected exactly 2 accounts for {email}, found {}",
                duplicates.len()
            )));
        };

        accounts.merge_duplicate(keeper.id, duplicate.id).await?;
        tracing::info!(
            %email,
            keeper = %keeper.id,
            merged = %duplicate.id,
            "merged duplicate account"
        );
        summary.succeeded += 1;
    }

    tracing::info!(%summary, "dedupe-users finished");
    Ok(summary)
}
