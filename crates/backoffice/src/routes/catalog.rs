//! Suit-builder catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::CatalogItemId;

use crate::db::CatalogRepository;
use crate::db::catalog::{CatalogItemPatch, NewCatalogItem};
use crate::error::AppError;
use crate::models::CatalogItem;
use crate::state::AppState;

/// Body for `POST /catalog`.
#[derive(Debug, Deserialize)]
pub struct CreateCatalogItemRequest {
    pub name: String,
    pub category: String,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: String,
    #[serde(default)]
    pub display_order: i32,
}

/// Body for `PATCH /catalog/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCatalogItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
    pub variant_sku: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /catalog`.
#[derive(Debug, Deserialize)]
pub struct ListCatalogQuery {
    pub category: Option<String>,
}

/// Create a catalog item.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateCatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItem>), AppError> {
    let new = NewCatalogItem {
        name: req.name,
        category: req.category,
        shopify_product_id: req.shopify_product_id,
        shopify_variant_id: req.shopify_variant_id,
        variant_sku: req.variant_sku,
        display_order: req.display_order,
    };

    let item = CatalogRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List active catalog items in display order.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListCatalogQuery>,
) -> Result<Json<Vec<CatalogItem>>, AppError> {
    let items = CatalogRepository::new(state.pool())
        .list_active(query.category.as_deref())
        .await?;

    Ok(Json(items))
}

/// Catalog item detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CatalogItem>, AppError> {
    let item = CatalogRepository::new(state.pool())
        .get_by_id(CatalogItemId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("catalog item {id}")))?;

    Ok(Json(item))
}

/// Partially update a catalog item.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCatalogItemRequest>,
) -> Result<Json<CatalogItem>, AppError> {
    let patch = CatalogItemPatch {
        name: req.name,
        category: req.category,
        shopify_product_id: req.shopify_product_id,
        shopify_variant_id: req.shopify_variant_id,
        variant_sku: req.variant_sku,
        display_order: req.display_order,
        is_active: req.is_active,
    };

    let item = CatalogRepository::new(state.pool())
        .update(CatalogItemId::new(id), &patch)
        .await?;

    Ok(Json(item))
}
