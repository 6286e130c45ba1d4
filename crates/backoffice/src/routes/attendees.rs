//! Attendee and role route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{AccountId, AttendeeId, EventId, LookId, RoleId};

use crate::db::attendees::{AttendeePatch, NewAttendee};
use crate::db::{AttendeeRepository, RoleRepository};
use crate::error::AppError;
use crate::models::{Attendee, Role};
use crate::state::AppState;

/// Body for `POST /attendees`.
#[derive(Debug, Deserialize)]
pub struct CreateAttendeeRequest {
    pub event_id: Uuid,
    pub account_id: Option<Uuid>,
    pub look_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub invited: bool,
}

/// Body for `PATCH /attendees/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateAttendeeRequest {
    pub account_id: Option<Uuid>,
    pub look_id: Option<Uuid>,
    pub role_id: Option<Uuid>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub invited: Option<bool>,
}

/// Query parameters for `GET /attendees`.
#[derive(Debug, Deserialize)]
pub struct ListAttendeesQuery {
    pub event_id: Uuid,
}

/// Create an attendee in an event.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAttendeeRequest>,
) -> Result<(StatusCode, Json<Attendee>), AppError> {
    let new = NewAttendee {
        event_id: EventId::new(req.event_id),
        account_id: req.account_id.map(AccountId::new),
        look_id: req.look_id.map(LookId::new),
        role_id: req.role_id.map(RoleId::new),
        first_name: req.first_name,
        last_name: req.last_name,
        invited: req.invited,
    };

    let attendee = AttendeeRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(attendee)))
}

/// List the attendees of an event.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListAttendeesQuery>,
) -> Result<Json<Vec<Attendee>>, AppError> {
    let attendees = AttendeeRepository::new(state.pool())
        .list_by_event(EventId::new(query.event_id))
        .await?;

    Ok(Json(attendees))
}

/// Attendee detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Attendee>, AppError> {
    let attendee = AttendeeRepository::new(state.pool())
        .get_by_id(AttendeeId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("attendee {id}")))?;

    Ok(Json(attendee))
}

/// Partially update an attendee.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAttendeeRequest>,
) -> Result<Json<Attendee>, AppError> {
    let patch = AttendeePatch {
        account_id: req.account_id.map(AccountId::new),
        look_id: req.look_id.map(LookId::new),
        role_id: req.role_id.map(RoleId::new),
        first_name: req.first_name,
        last_name: req.last_name,
        is_active: req.is_active,
        invited: req.invited,
    };

    let attendee = AttendeeRepository::new(state.pool())
        .update(AttendeeId::new(id), &patch)
        .await?;

    Ok(Json(attendee))
}

/// List active party roles.
#[instrument(skip(state))]
pub async fn list_roles(State(state): State<AppState>) -> Result<Json<Vec<Role>>, AppError> {
    let roles = RoleRepository::new(state.pool()).list_active().await?;
    Ok(Json(roles))
}
