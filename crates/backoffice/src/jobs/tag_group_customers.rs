//! Tag Shopify customers whose events reached group size.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::db::EventRepository;
use crate::shopify::{ShopifyClient, gid};

use super::{JobError, JobSummary};

/// Tag the Shopify customers owning active events with at least
/// `min_invited` active, invited attendees created after `after`.
///
/// The tag is `grp{min_invited}` (e.g. `grp4`), which downstream marketing
/// automation keys on. Tagging is idempotent on Shopify's side, so the job
/// can be re-run after a partial failure without double effects.
///
/// # Errors
///
/// Returns [`JobError::Repository`] if the candidate query fails.
/// Per-customer Shopify failures are logged and counted in the summary.
#[instrument(skip(pool, shopify))]
pub async fn tag_group_customers(
    pool: &PgPool,
    shopify: &ShopifyClient,
    min_invited: i64,
    after: DateTime<Utc>,
) -> Result<JobSummary, JobError> {
    let events = EventRepository::new(pool);
    let customer_ids = events.group_customer_ids(min_invited, after).await?;

    let tag = format!("grp{min_invited}");
    let mut summary = JobSummary {
        selected: customer_ids.len(),
        ..JobSummary::default()
    };

    tracing::info!(
        customers = customer_ids.len(),
        %tag,
        "tagging group-event customers"
    );

    for customer_id in customer_ids {
        let customer_gid = gid("Customer", &customer_id);
        match shopify
            .add_customer_tags(&customer_gid, &[tag.as_str()])
            .await
        {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                tracing::error!(customer = %customer_gid, error = %e, "failed to tag customer");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(%summary, "tag-group-customers finished");
    Ok(summary)
}
