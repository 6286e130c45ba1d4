//! User account route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{AccountId, AccountStatus, Email};

use crate::db::AccountRepository;
use crate::db::accounts::{AccountPatch, NewAccount};
use crate::error::AppError;
use crate::models::Account;
use crate::state::AppState;

/// Body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub shopify_customer_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Body for `PATCH /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub shopify_customer_id: Option<String>,
    pub status: Option<AccountStatus>,
    pub metadata: Option<serde_json::Value>,
}

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub email: Option<String>,
}

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Create a user account.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    let email = parse_email(&req.email)?;

    let new = NewAccount {
        email,
        first_name: req.first_name,
        last_name: req.last_name,
        shopify_customer_id: req.shopify_customer_id,
        metadata: req.metadata.unwrap_or_else(|| serde_json::json!({})),
    };

    let account = AccountRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// List accounts, or look one up by email (case-insensitive).
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Vec<Account>>, AppError> {
    let repo = AccountRepository::new(state.pool());

    let accounts = match query.email {
        Some(raw) => {
            let email = parse_email(&raw)?;
            repo.get_by_email(&email).await?.into_iter().collect()
        }
        None => repo.list().await?,
    };

    Ok(Json(accounts))
}

/// Account detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = AccountRepository::new(state.pool())
        .get_by_id(AccountId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    Ok(Json(account))
}

/// Partially update an account.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<Account>, AppError> {
    let patch = AccountPatch {
        first_name: req.first_name,
        last_name: req.last_name,
        shopify_customer_id: req.shopify_customer_id,
        status: req.status,
        metadata: req.metadata,
    };

    let account = AccountRepository::new(state.pool())
        .update(AccountId::new(id), &patch)
        .await?;

    Ok(Json(account))
}
