//! Archive Shopify bundle products for deactivated looks.

use sqlx::PgPool;
use tracing::instrument;

use regalia_core::ProductSpecs;

use crate::db::LookRepository;
use crate::shopify::{ShopifyClient, gid};

use super::{JobError, JobSummary};

/// Archive the Shopify bundle product of every deactivated look that
/// cleanup has not yet processed, then mark the look `fixed`.
///
/// `fixed` is the idempotence guard: once set, the look is skipped by the
/// candidate query forever. A crash between the archive call and the
/// write-back leaves `fixed` false, so the next run re-archives the
/// product - a no-op on Shopify's side.
///
/// # Errors
///
/// Returns [`JobError::Repository`] if the candidate query fails.
/// Per-look failures (malformed specs, Shopify errors) are logged and
/// counted in the summary.
#[instrument(skip(pool, shopify))]
pub async fn archive_looks(
    pool: &PgPool,
    shopify: &ShopifyClient,
) -> Result<JobSummary, JobError> {
    let looks = LookRepository::new(pool);
    let candidates = looks.list_unfixed_inactive().await?;

    let mut summary = JobSummary {
        selected: candidates.len(),
        ..JobSummary::default()
    };

    tracing::info!(looks = candidates.len(), "archiving deactivated looks");

    for look in candidates {
        let specs = match ProductSpecs::from_value(&look.product_specs) {
            Ok(specs) => specs,
            Err(e) => {
                tracing::error!(look = %look.id, error = %e, "skipping look with malformed specs");
                summary.failed += 1;
                continue;
            }
        };

        let product_gid = gid("Product", &specs.bundle.product_id);
        if let Err(e) = shopify.archive_product(&product_gid).await {
            tracing::error!(look = %look.id, product = %product_gid, error = %e, "failed to archive product");
            summary.failed += 1;
            continue;
        }

        match looks.mark_fixed(look.id).await {
            Ok(_) => {
                tracing::info!(look = %look.id, product = %product_gid, "look archived and fixed");
                summary.succeeded += 1;
            }
            Err(e) => {
                // The product is archived but the flag didn't stick; the
                // next run picks the look up again.
                tracing::error!(look = %look.id, error = %e, "failed to mark look fixed");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(%summary, "archive-looks finished");
    Ok(summary)
}
