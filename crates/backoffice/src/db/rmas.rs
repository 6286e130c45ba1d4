//! RMA and RMA-item repositories for database operations.
//!
//! Statuses are stored as plain text and transitions are not validated:
//! the stored value set grows over time and warehouse tooling has always
//! been free to write states in its own order. Item totals are stored
//! redundantly and maintained by callers, never derived here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{OrderId, RmaId, RmaItemDisposition, RmaItemId, RmaStatus, RmaType};

use super::RepositoryError;
use crate::models::{Rma, RmaItem};

/// Internal row type for `PostgreSQL` RMA queries.
#[derive(Debug, sqlx::FromRow)]
struct RmaRow {
    id: Uuid,
    order_id: Uuid,
    rma_number: String,
    status: String,
    rma_types: Vec<String>,
    total_items_expected: i32,
    total_items_received: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RmaRow> for Rma {
    fn from(row: RmaRow) -> Self {
        Self {
            id: RmaId::new(row.id),
            order_id: OrderId::new(row.order_id),
            rma_number: row.rma_number,
            status: RmaStatus::from(row.status),
            rma_types: row.rma_types.into_iter().map(RmaType::from).collect(),
            total_items_expected: row.total_items_expected,
            total_items_received: row.total_items_received,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for `PostgreSQL` RMA item queries.
#[derive(Debug, sqlx::FromRow)]
struct RmaItemRow {
    id: Uuid,
    rma_id: Uuid,
    shopify_product_id: Option<String>,
    shopify_variant_id: Option<String>,
    variant_sku: String,
    purchased_price: Decimal,
    quantity: i32,
    disposition: String,
    reason: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RmaItemRow> for RmaItem {
    fn from(row: RmaItemRow) -> Self {
        Self {
            id: RmaItemId::new(row.id),
            rma_id: RmaId::new(row.rma_id),
            shopify_product_id: row.shopify_product_id,
            shopify_variant_id: row.shopify_variant_id,
            variant_sku: row.variant_sku,
            purchased_price: row.purchased_price,
            quantity: row.quantity,
            disposition: RmaItemDisposition::from(row.disposition),
            reason: row.reason,
            created_at: row.created_at,
        }
    }
}

const SELECT_RMA: &str = "SELECT id, order_id, rma_number, status, rma_types, \
     total_items_expected, total_items_received, created_at, updated_at FROM backoffice.rma";

const RETURNING_RMA: &str = "RETURNING id, order_id, rma_number, status, rma_types, \
     total_items_expected, total_items_received, created_at, updated_at";

/// Fields for creating an RMA.
#[derive(Debug)]
pub struct NewRma {
    pub order_id: OrderId,
    pub rma_number: String,
    pub rma_types: Vec<RmaType>,
    pub total_items_expected: i32,
}

/// Partial update for an RMA. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct RmaPatch {
    pub status: Option<RmaStatus>,
    pub rma_types: Option<Vec<RmaType>>,
    pub total_items_expected: Option<i32>,
    pub total_items_received: Option<i32>,
}

/// Fields for adding an item to an RMA.
#[derive(Debug)]
pub struct NewRmaItem {
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: String,
    pub purchased_price: Decimal,
    pub quantity: i32,
    pub disposition: RmaItemDisposition,
    pub reason: Option<String>,
}

/// Repository for RMA database operations.
pub struct RmaRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RmaRepository<'a> {
    /// Create a new RMA repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Open a new RMA against an order. Status starts at PENDING.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the RMA number is taken.
    /// Returns `RepositoryError::ReferentialIntegrity` if the order doesn't
    /// exist.
    /// Returns `RepositoryError::Validation` if the RMA number is empty.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewRma) -> Result<Rma, RepositoryError> {
        if new.rma_number.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "rma_number is required".to_owned(),
            ));
        }

        let types: Vec<String> = new.rma_types.iter().map(|t| t.as_str().to_owned()).collect();

        let row = sqlx::query_as::<_, RmaRow>(&format!(
            "INSERT INTO backoffice.rma \
                 (order_id, rma_number, status, rma_types, total_items_expected) \
             VALUES ($1, $2, $3, $4, $5) {RETURNING_RMA}"
        ))
        .bind(new.order_id.as_uuid())
        .bind(&new.rma_number)
        .bind(RmaStatus::default().as_str())
        .bind(&types)
        .bind(new.total_items_expected)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "rma number", "order"))?;

        Ok(row.into())
    }

    /// Get an RMA by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: RmaId) -> Result<Option<Rma>, RepositoryError> {
        let row = sqlx::query_as::<_, RmaRow>(&format!("{SELECT_RMA} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List RMAs, newest first, optionally scoped to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, order_id: Option<OrderId>) -> Result<Vec<Rma>, RepositoryError> {
        let rows = sqlx::query_as::<_, RmaRow>(&format!(
            "{SELECT_RMA} WHERE ($1::uuid IS NULL OR order_id = $1) ORDER BY created_at DESC"
        ))
        .bind(order_id.map(|id| id.as_uuid()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update to an RMA. Any status value is accepted,
    /// including ones this build doesn't know yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the RMA doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: RmaId, patch: &RmaPatch) -> Result<Rma, RepositoryError> {
        let types: Option<Vec<String>> = patch
            .rma_types
            .as_ref()
            .map(|ts| ts.iter().map(|t| t.as_str().to_owned()).collect());

        let row = sqlx::query_as::<_, RmaRow>(&format!(
            "UPDATE backoffice.rma SET \
                 status = COALESCE($2, status), \
                 rma_types = COALESCE($3, rma_types), \
                 total_items_expected = COALESCE($4, total_items_expected), \
                 total_items_received = COALESCE($5, total_items_received), \
                 updated_at = now() \
             WHERE id = $1 {RETURNING_RMA}"
        ))
        .bind(id.as_uuid())
        .bind(patch.status.as_ref().map(RmaStatus::as_str))
        .bind(types)
        .bind(patch.total_items_expected)
        .bind(patch.total_items_received)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Add an item to an RMA. The parent totals are not touched; callers
    /// maintain them through [`RmaRepository::update`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ReferentialIntegrity` if the RMA doesn't
    /// exist.
    /// Returns `RepositoryError::Validation` if the SKU is empty or the
    /// quantity is not positive.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        rma_id: RmaId,
        new: &NewRmaItem,
    ) -> Result<RmaItem, RepositoryError> {
        if new.variant_sku.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "variant_sku is required".to_owned(),
            ));
        }
        if new.quantity <= 0 {
            return Err(RepositoryError::Validation(
                "quantity must be positive".to_owned(),
            ));
        }

        let row = sqlx::query_as::<_, RmaItemRow>(
            "INSERT INTO backoffice.rma_item \
                 (rma_id, shopify_product_id, shopify_variant_id, variant_sku, \
                  purchased_price, quantity, disposition, reason) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, rma_id, shopify_product_id, shopify_variant_id, variant_sku, \
                       purchased_price, quantity, disposition, reason, created_at",
        )
        .bind(rma_id.as_uuid())
        .bind(new.shopify_product_id.as_deref())
        .bind(new.shopify_variant_id.as_deref())
        .bind(&new.variant_sku)
        .bind(new.purchased_price)
        .bind(new.quantity)
        .bind(new.disposition.as_str())
        .bind(new.reason.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "rma item", "rma"))?;

        Ok(row.into())
    }

    /// List the items of an RMA, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, rma_id: RmaId) -> Result<Vec<RmaItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, RmaItemRow>(
            "SELECT id, rma_id, shopify_product_id, shopify_variant_id, variant_sku, \
                    purchased_price, quantity, disposition, reason, created_at \
             FROM backoffice.rma_item WHERE rma_id = $1 ORDER BY created_at ASC",
        )
        .bind(rma_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
