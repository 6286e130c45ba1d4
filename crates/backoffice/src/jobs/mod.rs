//! Batch jobs reconciling the database with Shopify.
//!
//! Every job processes its batch sequentially and logs-and-continues on
//! per-item failures; only an invariant violation aborts a batch (the
//! dedupe job's exactly-two rule). There are no operation-level retries:
//! a failed run is simply re-invoked.
//!
//! Re-runs are at-least-once with respect to the remote side. Each job
//! reads candidate rows, calls Shopify, then writes back local state - a
//! crash between the call and the write-back repeats the remote action on
//! the next run. The remote mutations are chosen to tolerate that
//! (re-tagging, re-archiving and re-deactivating are no-ops), and the
//! `fixed` and `used` flags are the only idempotence guards in the model.

pub mod archive_looks;
pub mod deactivate_discounts;
pub mod dedupe_users;
pub mod tag_group_customers;

use thiserror::Error;

use crate::db::RepositoryError;
use crate::shopify::ShopifyError;

pub use archive_looks::archive_looks;
pub use deactivate_discounts::deactivate_discounts;
pub use dedupe_users::dedupe_users;
pub use tag_group_customers::tag_group_customers;

/// Errors that abort a whole job run.
///
/// Per-item Shopify failures are logged and counted, not raised; a
/// variant here means the batch itself could not proceed.
#[derive(Debug, Error)]
pub enum JobError {
    /// A repository operation failed while driving the batch.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// A Shopify failure outside the per-item loop.
    #[error("shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// A data invariant the job depends on does not hold.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Per-run accounting, logged at the end of every job.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct JobSummary {
    /// Candidate items the batch selected.
    pub selected: usize,
    /// Items fully processed (remote call + write-back).
    pub succeeded: usize,
    /// Items that failed and were skipped.
    pub failed: usize,
}

impl std::fmt::Display for JobSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} selected, {} succeeded, {} failed",
            self.selected, self.succeeded, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_summary_display() {
        let summary = JobSummary {
            selected: 5,
            succeeded: 4,
            failed: 1,
        };
        assert_eq!(summary.to_string(), "5 selected, 4 succeeded, 1 failed");
    }

    #[test]
    fn test_job_error_from_repository() {
        let err = JobError::from(RepositoryError::NotFound);
        assert!(matches!(err, JobError::Repository(_)));
    }
}
