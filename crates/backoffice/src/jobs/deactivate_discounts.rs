//! Deactivate Shopify codes for redeemed personal discounts.

use sqlx::PgPool;
use tracing::instrument;

use crate::db::discounts::{DiscountFilter, PERSONAL_CODE_PREFIX};
use crate::db::DiscountRepository;
use crate::shopify::{ShopifyClient, gid};

use super::{JobError, JobSummary};

/// Deactivate the Shopify discount behind every redeemed personal code.
///
/// The selection contract is "used discounts with the personal code
/// prefix, newest first". Redemption only flips the local `used` flag;
/// this job performs the out-of-band Shopify deactivation. Deactivating an
/// already-inactive code succeeds remotely, so re-runs are safe.
///
/// # Errors
///
/// Returns [`JobError::Repository`] if the candidate query fails.
/// Per-discount Shopify failures are logged and counted in the summary.
#[instrument(skip(pool, shopify))]
pub async fn deactivate_discounts(
    pool: &PgPool,
    shopify: &ShopifyClient,
    code_prefix: Option<&str>,
) -> Result<JobSummary, JobError> {
    let discounts = DiscountRepository::new(pool);
    let filter = DiscountFilter {
        used: Some(true),
        code_prefix: Some(code_prefix.unwrap_or(PERSONAL_CODE_PREFIX).to_owned()),
        ..DiscountFilter::default()
    };
    let candidates = discounts.list(&filter).await?;

    let mut summary = JobSummary {
        selected: candidates.len(),
        ..JobSummary::default()
    };

    tracing::info!(discounts = candidates.len(), "deactivating redeemed codes");

    for discount in candidates {
        let Some(shopify_discount_id) = discount.shopify_discount_id.as_deref() else {
            tracing::debug!(discount = %discount.id, code = %discount.code, "no shopify discount linked, skipping");
            continue;
        };

        let discount_gid = gid("DiscountCodeNode", shopify_discount_id);
        match shopify.deactivate_discount(&discount_gid).await {
            Ok(()) => {
                tracing::info!(discount = %discount.id, code = %discount.code, "code deactivated");
                summary.succeeded += 1;
            }
            Err(e) => {
                tracing::error!(discount = %discount.id, code = %discount.code, error = %e, "failed to deactivate code");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(%summary, "deactivate-discounts finished");
    Ok(summary)
}
