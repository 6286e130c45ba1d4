//! Discount repository for database operations.
//!
//! A discount is a single-use credit scoped to one attendee within one
//! event. Redemption is the only write to `used` and it only ever sets it
//! true; the deactivation job later reconciles redeemed codes with Shopify.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{AttendeeId, DiscountId, DiscountType, EventId};

use super::RepositoryError;
use crate::models::Discount;

/// Prefix of generated group discount codes.
pub const GROUP_CODE_PREFIX: &str = "GRP-";
/// Prefix of generated personal discount codes. The deactivation job
/// selects used discounts by this prefix.
pub const PERSONAL_CODE_PREFIX: &str = "IND-";

const CODE_SUFFIX_LEN: usize = 8;

/// Internal row type for `PostgreSQL` discount queries.
#[derive(Debug, sqlx::FromRow)]
struct DiscountRow {
    id: Uuid,
    event_id: Uuid,
    attendee_id: Uuid,
    amount: Decimal,
    discount_type: String,
    used: bool,
    code: String,
    shopify_discount_id: Option<String>,
    shopify_product_id: Option<String>,
    shopify_variant_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DiscountRow> for Discount {
    type Error = RepositoryError;

    fn try_from(row: DiscountRow) -> Result<Self, Self::Error> {
        let discount_type = row.discount_type.parse::<DiscountType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid discount type in database: {e}"))
        })?;

        Ok(Self {
            id: DiscountId::new(row.id),
            event_id: EventId::new(row.event_id),
            attendee_id: AttendeeId::new(row.attendee_id),
            amount: row.amount,
            discount_type,
            used: row.used,
            code: row.code,
            shopify_discount_id: row.shopify_discount_id,
            shopify_product_id: row.shopify_product_id,
            shopify_variant_id: row.shopify_variant_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_DISCOUNT: &str = "SELECT id, event_id, attendee_id, amount, discount_type, used, \
     code, shopify_discount_id, shopify_product_id, shopify_variant_id, created_at, updated_at \
     FROM backoffice.discount";

const RETURNING_DISCOUNT: &str = "RETURNING id, event_id, attendee_id, amount, discount_type, \
     used, code, shopify_discount_id, shopify_product_id, shopify_variant_id, \
     created_at, updated_at";

/// Fields for creating a discount.
#[derive(Debug)]
pub struct NewDiscount {
    pub event_id: EventId,
    pub attendee_id: AttendeeId,
    pub amount: Decimal,
    pub discount_type: DiscountType,
    /// Customer-facing code. Generated with [`PERSONAL_CODE_PREFIX`] when
    /// absent.
    pub code: Option<String>,
    pub shopify_discount_id: Option<String>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
}

/// Filter for listing discounts. Results are always newest first.
#[derive(Debug, Default)]
pub struct DiscountFilter {
    pub event_id: Option<EventId>,
    pub used: Option<bool>,
    pub code_prefix: Option<String>,
}

/// Generate a discount code: prefix plus a random alphanumeric suffix.
#[must_use]
pub fn generate_code(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}{}", suffix.to_uppercase())
}

/// Repository for discount database operations.
pub struct DiscountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DiscountRepository<'a> {
    /// Create a new discount repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new discount against an existing event and attendee.
    ///
    /// `PARTY_OF_FOUR` discounts carry no monetary amount by convention;
    /// whatever was passed is stored as zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ReferentialIntegrity` if the event or
    /// attendee doesn't exist; nothing is persisted in that case.
    /// Returns `RepositoryError::Validation` if the amount is negative.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewDiscount) -> Result<Discount, RepositoryError> {
        if new.amount < Decimal::ZERO {
            return Err(RepositoryError::Validation(
                "amount must be non-negative".to_owned(),
            ));
        }

        let amount = if new.discount_type == DiscountType::PartyOfFour {
            Decimal::ZERO
        } else {
            new.amount
        };
        let code = new
            .code
            .clone()
            .unwrap_or_else(|| generate_code(PERSONAL_CODE_PREFIX));

        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            "INSERT INTO backoffice.discount \
                 (event_id, attendee_id, amount, discount_type, code, \
                  shopify_discount_id, shopify_product_id, shopify_variant_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) {RETURNING_DISCOUNT}"
        ))
        .bind(new.event_id.as_uuid())
        .bind(new.attendee_id.as_uuid())
        .bind(amount)
        .bind(new.discount_type.as_str())
        .bind(&code)
        .bind(new.shopify_discount_id.as_deref())
        .bind(new.shopify_product_id.as_deref())
        .bind(new.shopify_variant_id.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "discount code", "event or attendee"))?;

        row.try_into()
    }

    /// Get a discount by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: DiscountId) -> Result<Option<Discount>, RepositoryError> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!("{SELECT_DISCOUNT} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// List discounts matching a filter, newest first.
    ///
    /// This is the selection contract the out-of-band deactivation job
    /// relies on: `used = true`, a code prefix, creation-time descending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if any row is invalid.
    pub async fn list(&self, filter: &DiscountFilter) -> Result<Vec<Discount>, RepositoryError> {
        let prefix_pattern = filter
            .code_prefix
            .as_ref()
            .map(|p| format!("{}%", p.replace('%', "\\%").replace('_', "\\_")));

        let rows = sqlx::query_as::<_, DiscountRow>(&format!(
            "{SELECT_DISCOUNT} \
             WHERE ($1::uuid IS NULL OR event_id = $1) \
               AND ($2::boolean IS NULL OR used = $2) \
               AND ($3::text IS NULL OR code LIKE $3) \
             ORDER BY created_at DESC"
        ))
        .bind(filter.event_id.map(|id| id.as_uuid()))
        .bind(filter.used)
        .bind(prefix_pattern)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Redeem a discount: flip `used` to true.
    ///
    /// One-way by construction: this is the only statement that writes the
    /// flag, and it can only set it. Redeeming an already-used discount is
    /// a no-op that returns the current row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the discount doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn redeem(&self, id: DiscountId) -> Result<Discount, RepositoryError> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            "UPDATE backoffice.discount SET used = TRUE, updated_at = now() \
             WHERE id = $1 {RETURNING_DISCOUNT}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_carries_prefix() {
        let code = generate_code(PERSONAL_CODE_PREFIX);
        assert!(code.starts_with("IND-"));
        assert_eq!(code.len(), PERSONAL_CODE_PREFIX.len() + CODE_SUFFIX_LEN);
    }

    #[test]
    fn test_generated_codes_differ() {
        assert_ne!(
            generate_code(GROUP_CODE_PREFIX),
            generate_code(GROUP_CODE_PREFIX)
        );
    }

    #[test]
    fn test_generated_code_is_uppercase_alphanumeric() {
        let code = generate_code(GROUP_CODE_PREFIX);
        let suffix = code.trim_start_matches(GROUP_CODE_PREFIX);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!suffix.chars().any(|c| c.is_ascii_lowercase()));
    }
}
