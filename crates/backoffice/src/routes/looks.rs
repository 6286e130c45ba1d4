//! Look route handlers.
//!
//! Deactivation and `mark-fixed` are separate POST endpoints rather than
//! PATCH fields: both flags are one-way, and keeping them off the patch
//! surface means there is no way to express the reverse transition.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{AccountId, LookId};

use crate::db::LookRepository;
use crate::db::looks::{LookPatch, NewLook};
use crate::error::AppError;
use crate::models::Look;
use crate::state::AppState;

/// Body for `POST /looks`.
#[derive(Debug, Deserialize)]
pub struct CreateLookRequest {
    pub account_id: Uuid,
    pub name: String,
    pub product_specs: serde_json::Value,
    pub image_path: Option<String>,
}

/// Body for `PATCH /looks/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateLookRequest {
    pub name: Option<String>,
    pub product_specs: Option<serde_json::Value>,
    pub image_path: Option<String>,
}

/// Query parameters for `GET /looks`.
#[derive(Debug, Deserialize)]
pub struct ListLooksQuery {
    pub account_id: Option<Uuid>,
}

/// Create a look.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateLookRequest>,
) -> Result<(StatusCode, Json<Look>), AppError> {
    let new = NewLook {
        account_id: AccountId::new(req.account_id),
        name: req.name,
        product_specs: req.product_specs,
        image_path: req.image_path,
    };

    let look = LookRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(look)))
}

/// List active looks, optionally scoped to an owner.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListLooksQuery>,
) -> Result<Json<Vec<Look>>, AppError> {
    let looks = LookRepository::new(state.pool())
        .list_active(query.account_id.map(AccountId::new))
        .await?;

    Ok(Json(looks))
}

/// Look detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Look>, AppError> {
    let look = LookRepository::new(state.pool())
        .get_by_id(LookId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("look {id}")))?;

    Ok(Json(look))
}

/// Partially update a look.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateLookRequest>,
) -> Result<Json<Look>, AppError> {
    let patch = LookPatch {
        name: req.name,
        product_specs: req.product_specs,
        image_path: req.image_path,
    };

    let look = LookRepository::new(state.pool())
        .update(LookId::new(id), &patch)
        .await?;

    Ok(Json(look))
}

/// Soft-delete a look. One-way.
#[instrument(skip(state))]
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Look>, AppError> {
    let look = LookRepository::new(state.pool())
        .deactivate(LookId::new(id))
        .await?;

    Ok(Json(look))
}

/// Record that external cleanup processed this look. One-way.
#[instrument(skip(state))]
pub async fn mark_fixed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Look>, AppError> {
    let look = LookRepository::new(state.pool())
        .mark_fixed(LookId::new(id))
        .await?;

    Ok(Json(look))
}
