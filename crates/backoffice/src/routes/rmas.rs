//! RMA route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{OrderId, RmaId, RmaItemDisposition, RmaStatus, RmaType};

use crate::db::RmaRepository;
use crate::db::rmas::{NewRma, NewRmaItem, RmaPatch};
use crate::error::AppError;
use crate::models::{Rma, RmaItem};
use crate::state::AppState;

/// Body for `POST /rmas`.
#[derive(Debug, Deserialize)]
pub struct CreateRmaRequest {
    pub order_id: Uuid,
    pub rma_number: String,
    pub rma_types: Vec<RmaType>,
    #[serde(default)]
    pub total_items_expected: i32,
}

/// Body for `PATCH /rmas/{id}`.
///
/// Any status value is accepted, including ones added after this build
/// shipped; transitions are not validated.
#[derive(Debug, Deserialize)]
pub struct UpdateRmaRequest {
    pub status: Option<RmaStatus>,
    pub rma_types: Option<Vec<RmaType>>,
    pub total_items_expected: Option<i32>,
    pub total_items_received: Option<i32>,
}

/// Body for `POST /rmas/{id}/items`.
#[derive(Debug, Deserialize)]
pub struct CreateRmaItemRequest {
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: String,
    pub purchased_price: Decimal,
    pub quantity: i32,
    pub disposition: RmaItemDisposition,
    pub reason: Option<String>,
}

/// Query parameters for `GET /rmas`.
#[derive(Debug, Deserialize)]
pub struct ListRmasQuery {
    pub order_id: Option<Uuid>,
}

/// Open an RMA against an order.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRmaRequest>,
) -> Result<(StatusCode, Json<Rma>), AppError> {
    let new = NewRma {
        order_id: OrderId::new(req.order_id),
        rma_number: req.rma_number,
        rma_types: req.rma_types,
        total_items_expected: req.total_items_expected,
    };

    let rma = RmaRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(rma)))
}

/// List RMAs, optionally scoped to an order.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListRmasQuery>,
) -> Result<Json<Vec<Rma>>, AppError> {
    let rmas = RmaRepository::new(state.pool())
        .list(query.order_id.map(OrderId::new))
        .await?;

    Ok(Json(rmas))
}

/// RMA detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Rma>, AppError> {
    let rma = RmaRepository::new(state.pool())
        .get_by_id(RmaId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("rma {id}")))?;

    Ok(Json(rma))
}

/// Update an RMA's status, types or totals.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRmaRequest>,
) -> Result<Json<Rma>, AppError> {
    let patch = RmaPatch {
        status: req.status,
        rma_types: req.rma_types,
        total_items_expected: req.total_items_expected,
        total_items_received: req.total_items_received,
    };

    let rma = RmaRepository::new(state.pool())
        .update(RmaId::new(id), &patch)
        .await?;

    Ok(Json(rma))
}

/// Add an item to an RMA. Parent totals are caller-maintained via PATCH.
#[instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateRmaItemRequest>,
) -> Result<(StatusCode, Json<RmaItem>), AppError> {
    let new = NewRmaItem {
        shopify_product_id: req.shopify_product_id,
        shopify_variant_id: req.shopify_variant_id,
        variant_sku: req.variant_sku,
        purchased_price: req.purchased_price,
        quantity: req.quantity,
        disposition: req.disposition,
        reason: req.reason,
    };

    let item = RmaRepository::new(state.pool())
        .add_item(RmaId::new(id), &new)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// List the items of an RMA.
#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RmaItem>>, AppError> {
    let items = RmaRepository::new(state.pool())
        .list_items(RmaId::new(id))
        .await?;

    Ok(Json(items))
}
