//! Order and order-item route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{AccountId, EventId, ItemStatus, OrderId, OrderItemId, OrderType};

use crate::db::OrderRepository;
use crate::db::orders::{NewOrder, NewOrderItem, OrderPatch};
use crate::error::AppError;
use crate::models::{Order, OrderItem};
use crate::state::AppState;

/// Body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub account_id: Uuid,
    pub event_id: Option<Uuid>,
    pub shopify_order_id: Option<String>,
    pub shopify_order_number: Option<String>,
    pub order_types: Vec<OrderType>,
    pub meta: Option<serde_json::Value>,
}

/// Body for `PATCH /orders/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub event_id: Option<Uuid>,
    pub shopify_order_number: Option<String>,
    pub order_types: Option<Vec<OrderType>>,
    pub meta: Option<serde_json::Value>,
}

/// Body for `POST /orders/{id}/items`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderItemRequest {
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: String,
    pub quantity: i32,
    pub status: Option<ItemStatus>,
}

/// Body for `PATCH /order-items/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderItemRequest {
    pub status: ItemStatus,
}

/// Query parameters for `GET /orders`.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub account_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
}

/// Create an order.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let new = NewOrder {
        account_id: AccountId::new(req.account_id),
        event_id: req.event_id.map(EventId::new),
        shopify_order_id: req.shopify_order_id,
        shopify_order_number: req.shopify_order_number,
        order_types: req.order_types,
        meta: req.meta.unwrap_or_else(|| serde_json::json!({})),
    };

    let order = OrderRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders, optionally filtered by account and/or event.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list(
            query.account_id.map(AccountId::new),
            query.event_id.map(EventId::new),
        )
        .await?;

    Ok(Json(orders))
}

/// Order detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}

/// Partially update an order.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let patch = OrderPatch {
        event_id: req.event_id.map(EventId::new),
        shopify_order_number: req.shopify_order_number,
        order_types: req.order_types,
        meta: req.meta,
    };

    let order = OrderRepository::new(state.pool())
        .update(OrderId::new(id), &patch)
        .await?;

    Ok(Json(order))
}

/// Add a line item to an order.
#[instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateOrderItemRequest>,
) -> Result<(StatusCode, Json<OrderItem>), AppError> {
    let new = NewOrderItem {
        shopify_product_id: req.shopify_product_id,
        shopify_variant_id: req.shopify_variant_id,
        variant_sku: req.variant_sku,
        quantity: req.quantity,
        status: req.status.unwrap_or_default(),
    };

    let item = OrderRepository::new(state.pool())
        .add_item(OrderId::new(id), &new)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// List the line items of an order.
#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderItem>>, AppError> {
    let items = OrderRepository::new(state.pool())
        .list_items(OrderId::new(id))
        .await?;

    Ok(Json(items))
}

/// Overwrite the current status of an order item.
#[instrument(skip(state, req))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderItemRequest>,
) -> Result<Json<OrderItem>, AppError> {
    let item = OrderRepository::new(state.pool())
        .update_item_status(OrderItemId::new(id), &req.status)
        .await?;

    Ok(Json(item))
}
