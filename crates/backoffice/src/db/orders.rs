//! Order and order-item repositories for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use regalia_core::{AccountId, EventId, ItemStatus, OrderId, OrderItemId, OrderType};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// Internal row type for `PostgreSQL` order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    account_id: Uuid,
    event_id: Option<Uuid>,
    shopify_order_id: Option<String>,
    shopify_order_number: Option<String>,
    order_types: Vec<String>,
    meta: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            account_id: AccountId::new(row.account_id),
            event_id: row.event_id.map(EventId::new),
            shopify_order_id: row.shopify_order_id,
            shopify_order_number: row.shopify_order_number,
            order_types: row.order_types.into_iter().map(OrderType::from).collect(),
            meta: row.meta,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Internal row type for `PostgreSQL` order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    shopify_product_id: Option<String>,
    shopify_variant_id: Option<String>,
    variant_sku: String,
    quantity: i32,
    item_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            shopify_product_id: row.shopify_product_id,
            shopify_variant_id: row.shopify_variant_id,
            variant_sku: row.variant_sku,
            quantity: row.quantity,
            status: ItemStatus::from(row.item_status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_ORDER: &str = "SELECT id, account_id, event_id, shopify_order_id, \
     shopify_order_number, order_types, meta, created_at, updated_at \
     FROM backoffice.customer_order";

const RETURNING_ORDER: &str = "RETURNING id, account_id, event_id, shopify_order_id, \
     shopify_order_number, order_types, meta, created_at, updated_at";

const SELECT_ITEM: &str = "SELECT id, order_id, shopify_product_id, shopify_variant_id, \
     variant_sku, quantity, item_status, created_at, updated_at FROM backoffice.order_item";

/// Fields for creating an order.
#[derive(Debug)]
pub struct NewOrder {
    pub account_id: AccountId,
    pub event_id: Option<EventId>,
    pub shopify_order_id: Option<String>,
    pub shopify_order_number: Option<String>,
    pub order_types: Vec<OrderType>,
    pub meta: serde_json::Value,
}

/// Partial update for an order. `None` fields are left unchanged.
/// `created_at` is immutable; only mutable commerce fields appear here.
#[derive(Debug, Default)]
pub struct OrderPatch {
    pub event_id: Option<EventId>,
    pub shopify_order_number: Option<String>,
    pub order_types: Option<Vec<OrderType>>,
    pub meta: Option<serde_json::Value>,
}

/// Fields for adding an item to an order.
#[derive(Debug)]
pub struct NewOrderItem {
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: String,
    pub quantity: i32,
    pub status: ItemStatus,
}

/// Repository for order and order-item database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if `shopify_order_id` is already
    /// taken.
    /// Returns `RepositoryError::ReferentialIntegrity` if the account or
    /// event doesn't exist.
    /// Returns `RepositoryError::Validation` if no order type is given.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        if new.order_types.is_empty() {
            return Err(RepositoryError::Validation(
                "at least one order type is required".to_owned(),
            ));
        }

        let types: Vec<String> = new.order_types.iter().map(|t| t.as_str().to_owned()).collect();

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO backoffice.customer_order \
                 (account_id, event_id, shopify_order_id, shopify_order_number, order_types, meta) \
             VALUES ($1, $2, $3, $4, $5, $6) {RETURNING_ORDER}"
        ))
        .bind(new.account_id.as_uuid())
        .bind(new.event_id.map(|id| id.as_uuid()))
        .bind(new.shopify_order_id.as_deref())
        .bind(new.shopify_order_number.as_deref())
        .bind(&types)
        .bind(&new.meta)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "shopify order id", "account or event"))?;

        Ok(row.into())
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// List orders, newest first, optionally filtered by account and/or
    /// event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        account_id: Option<AccountId>,
        event_id: Option<EventId>,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{SELECT_ORDER} \
             WHERE ($1::uuid IS NULL OR account_id = $1) \
               AND ($2::uuid IS NULL OR event_id = $2) \
             ORDER BY created_at DESC"
        ))
        .bind(account_id.map(|id| id.as_uuid()))
        .bind(event_id.map(|id| id.as_uuid()))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Apply a partial update to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::ReferentialIntegrity` if a newly
    /// referenced event doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: OrderId, patch: &OrderPatch) -> Result<Order, RepositoryError> {
        let types: Option<Vec<String>> = patch
            .order_types
            .as_ref()
            .map(|ts| ts.iter().map(|t| t.as_str().to_owned()).collect());

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE backoffice.customer_order SET \
                 event_id = COALESCE($2, event_id), \
                 shopify_order_number = COALESCE($3, shopify_order_number), \
                 order_types = COALESCE($4, order_types), \
                 meta = COALESCE($5, meta), \
                 updated_at = now() \
             WHERE id = $1 {RETURNING_ORDER}"
        ))
        .bind(id.as_uuid())
        .bind(patch.event_id.map(|id| id.as_uuid()))
        .bind(patch.shopify_order_number.as_deref())
        .bind(types)
        .bind(patch.meta.as_ref())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "shopify order id", "event"))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Add an item to an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::ReferentialIntegrity` if the order doesn't
    /// exist.
    /// Returns `RepositoryError::Validation` if the SKU is empty or the
    /// quantity is not positive.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        order_id: OrderId,
        new: &NewOrderItem,
    ) -> Result<OrderItem, RepositoryError> {
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

        let row = sqlx::query_as::<_, OrderItemRow>(
            "INSERT INTO backoffice.order_item \
                 (order_id, shopify_product_id, shopify_variant_id, variant_sku, quantity, item_status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, order_id, shopify_product_id, shopify_variant_id, variant_sku, \
                       quantity, item_status, created_at, updated_at",
        )
        .bind(order_id.as_uuid())
        .bind(new.shopify_product_id.as_deref())
        .bind(new.shopify_variant_id.as_deref())
        .bind(&new.variant_sku)
        .bind(new.quantity)
        .bind(new.status.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "order item", "order"))?;

        Ok(row.into())
    }

    /// List the items of an order, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "{SELECT_ITEM} WHERE order_id = $1 ORDER BY created_at ASC"
        ))
        .bind(order_id.as_uuid())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Overwrite the current status of an order item. Only the current
    /// value is stored; there is no status history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_item_status(
        &self,
        item_id: OrderItemId,
        status: &ItemStatus,
    ) -> Result<OrderItem, RepositoryError> {
        let row = sqlx::query_as::<_, OrderItemRow>(
            "UPDATE backoffice.order_item SET item_status = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING id, order_id, shopify_product_id, shopify_variant_id, variant_sku, \
                       quantity, item_status, created_at, updated_at",
        )
        .bind(item_id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
