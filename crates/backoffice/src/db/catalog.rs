//! Suit-builder catalog repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::CatalogItemId;

use super::RepositoryError;
use crate::models::CatalogItem;

/// Internal row type for `PostgreSQL` catalog queries.
#[derive(Debug, sqlx::FromRow)]
struct CatalogItemRow {
    id: Uuid,
    name: String,
    category: String,
    shopify_product_id: Option<String>,
    shopify_variant_id: Option<String>,
    variant_sku: String,
    display_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CatalogItemRow> for CatalogItem {
    fn from(row: CatalogItemRow) -> Self {
        Self {
            id: CatalogItemId::new(row.id),
            name: row.name,
            category: row.category,
            shopify_product_id: row.shopify_product_id,
            shopify_variant_id: row.shopify_variant_id,
            variant_sku: row.variant_sku,
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_CATALOG: &str = "SELECT id, name, category, shopify_product_id, \
     shopify_variant_id, variant_sku, display_order, is_active, created_at, updated_at \
     FROM backoffice.catalog_item";

const RETURNING_CATALOG: &str = "RETURNING id, name, category, shopify_product_id, \
     shopify_variant_id, variant_sku, display_order, is_active, created_at, updated_at";

/// Fields for creating a catalog item.
#[derive(Debug)]
pub struct NewCatalogItem {
    pub name: String,
    pub category: String,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: String,
    pub display_order: i32,
}

/// Partial update for a catalog item. `None` fields are left unchanged.
#[derive(Debug, Default)]
pub struct CatalogItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new catalog item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if required strings are empty.
    /// Returns `RepositoryError::Conflict` if the SKU is already listed.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewCatalogItem) -> Result<CatalogItem, RepositoryError> {
        if new.name.trim().is_empty()
            || new.category.trim().is_empty()
            || new.variant_sku.trim().is_empty()
        {
            return Err(RepositoryError::Validation(
                "name, category and variant_sku are required".to_owned(),
            ));
        }

        let row = sqlx::query_as::<_, CatalogItemRow>(&format!(
            "INSERT INTO backoffice.catalog_item \
                 (name, category, shopify_product_id, shopify_variant_id, variant_sku, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6) {RETURNING_CATALOG}"
        ))
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.shopify_product_id.as_deref())
        .bind(new.shopify_variant_id.as_deref())
        .bind(&new.variant_sku)
        .bind(new.display_order)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "variant sku", "catalog"))?;

        Ok(row.into())
    }

    /// Get a catalog item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: CatalogItemId,
    ) -> Result<Option<CatalogItem>, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogItemRow>(&format!("{SELECT_CATALOG} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List active catalog items, optionally filtered by category, in
    /// display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<CatalogItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CatalogItemRow>(&format!(
            "{SELECT_CATALOG} \
             WHERE is_active AND ($1::text IS NULL OR category = $1) \
             ORDER BY category ASC, display_order ASC"
        ))
        .bind(category)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update to a catalog item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CatalogItemId,
        patch: &CatalogItemPatch,
    ) -> Result<CatalogItem, RepositoryError> {
        let row = sqlx::query_as::<_, CatalogItemRow>(&format!(
            "UPDATE backoffice.catalog_item SET \
                 name = COALESCE($2, name), \
                 category = COALESCE($3, category), \
                 shopify_product_id = COALESCE($4, shopify_product_id), \
                 shopify_variant_id = COALESCE($5, shopify_variant_id), \
                 variant_sku = COALESCE($6, variant_sku), \
                 display_order = COALESCE($7, display_order), \
                 is_active = COALESCE($8, is_active), \
                 updated_at = now() \
             WHERE id = $1 {RETURNING_CATALOG}"
        ))
        .bind(id.as_uuid())
        .bind(patch.name.as_deref())
        .bind(patch.category.as_deref())
        .bind(patch.shopify_product_id.as_deref())
        .bind(patch.shopify_variant_id.as_deref())
        .bind(patch.variant_sku.as_deref())
        .bind(patch.display_order)
        .bind(patch.is_active)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "variant sku", "catalog"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
