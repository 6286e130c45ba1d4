//! Discount route handlers.
//!
//! There is deliberately no PATCH on discounts: the only mutation after
//! creation is redemption, and redemption is one-way. An "un-use"
//! operation does not exist in the public contract.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{AttendeeId, DiscountId, DiscountType, EventId};

use crate::db::DiscountRepository;
use crate::db::discounts::{DiscountFilter, NewDiscount};
use crate::error::AppError;
use crate::models::Discount;
use crate::state::AppState;

/// Body for `POST /discounts`.
#[derive(Debug, Deserialize)]
pub struct CreateDiscountRequest {
    pub event_id: Uuid,
    pub attendee_id: Uuid,
    #[serde(default)]
    pub amount: Decimal,
    pub discount_type: DiscountType,
    pub code: Option<String>,
    pub shopify_discount_id: Option<String>,
    pub shopify_product_id: Option<String>,
    pub shopify_variant_id: Option<String>,
}

/// Query parameters for `GET /discounts`.
#[derive(Debug, Deserialize)]
pub struct ListDiscountsQuery {
    pub event_id: Option<Uuid>,
    pub used: Option<bool>,
    pub code_prefix: Option<String>,
}

/// Create a discount against an existing event and attendee.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateDiscountRequest>,
) -> Result<(StatusCode, Json<Discount>), AppError> {
    let new = NewDiscount {
        event_id: EventId::new(req.event_id),
        attendee_id: AttendeeId::new(req.attendee_id),
        amount: req.amount,
        discount_type: req.discount_type,
        code: req.code,
        shopify_discount_id: req.shopify_discount_id,
        shopify_product_id: req.shopify_product_id,
        shopify_variant_id: req.shopify_variant_id,
    };

    let discount = DiscountRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(discount)))
}

/// List discounts, newest first. `used` and `code_prefix` make up the
/// selection the out-of-band deactivation job relies on.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListDiscountsQuery>,
) -> Result<Json<Vec<Discount>>, AppError> {
    let filter = DiscountFilter {
        event_id: query.event_id.map(EventId::new),
        used: query.used,
        code_prefix: query.code_prefix,
    };

    let discounts = DiscountRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(discounts))
}

/// Discount detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Discount>, AppError> {
    let discount = DiscountRepository::new(state.pool())
        .get_by_id(DiscountId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("discount {id}")))?;

    Ok(Json(discount))
}

/// Redeem a discount: set `used = true`. One-way; redeeming twice is a
/// no-op.
#[instrument(skip(state))]
pub async fn redeem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Discount>, AppError> {
    let discount = DiscountRepository::new(state.pool())
        .redeem(DiscountId::new(id))
        .await?;

    Ok(Json(discount))
}
