//! Event route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use regalia_core::{AccountId, EventId, EventType};

use crate::db::EventRepository;
use crate::db::events::{EventPatch, NewEvent};
use crate::error::AppError;
use crate::models::Event;
use crate::state::AppState;

/// Body for `POST /events`.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub account_id: Uuid,
    pub name: String,
    pub event_at: DateTime<Utc>,
    pub event_type: EventType,
    pub metadata: Option<serde_json::Value>,
}

/// Body for `PATCH /events/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub event_at: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
    pub is_active: Option<bool>,
    pub metadata: Option<serde_json::Value>,
}

/// Query parameters for `GET /events`.
#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub account_id: Option<Uuid>,
    /// When set, only events with at least this many active invited
    /// attendees are returned; combine with `after`.
    pub min_invited: Option<i64>,
    pub after: Option<DateTime<Utc>>,
}

/// Query parameters for `GET /events/group-customers`.
#[derive(Debug, Deserialize)]
pub struct GroupCustomersQuery {
    pub min_invited: Option<i64>,
    pub after: Option<DateTime<Utc>>,
}

/// Default threshold for a "group" event (party of four).
const DEFAULT_MIN_INVITED: i64 = 4;

/// Create an event.
#[instrument(skip(state, req))]
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let new = NewEvent {
        account_id: AccountId::new(req.account_id),
        name: req.name,
        event_at: req.event_at,
        event_type: req.event_type,
        metadata: req.metadata.unwrap_or_else(|| serde_json::json!({})),
    };

    let event = EventRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// List active events, optionally filtered by owner or group size.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>, AppError> {
    let repo = EventRepository::new(state.pool());

    let events = match query.min_invited {
        Some(min_invited) => {
            let after = query.after.unwrap_or(DateTime::UNIX_EPOCH);
            repo.list_with_min_invited(min_invited, after).await?
        }
        None => {
            repo.list_active(query.account_id.map(AccountId::new))
                .await?
        }
    };

    Ok(Json(events))
}

/// Distinct Shopify customer ids for group events. This is the read the
/// customer-tagging job performs.
#[instrument(skip(state))]
pub async fn group_customers(
    State(state): State<AppState>,
    Query(query): Query<GroupCustomersQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    let min_invited = query.min_invited.unwrap_or(DEFAULT_MIN_INVITED);
    let after = query.after.unwrap_or(DateTime::UNIX_EPOCH);

    let ids = EventRepository::new(state.pool())
        .group_customer_ids(min_invited, after)
        .await?;

    Ok(Json(ids))
}

/// Event detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, AppError> {
    let event = EventRepository::new(state.pool())
        .get_by_id(EventId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("event {id}")))?;

    Ok(Json(event))
}

/// Partially update an event.
#[instrument(skip(state, req))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventRequest>,
) -> Result<Json<Event>, AppError> {
    let patch = EventPatch {
        name: req.name,
        event_at: req.event_at,
        event_type: req.event_type,
        is_active: req.is_active,
        metadata: req.metadata,
    };

    let event = EventRepository::new(state.pool())
        .update(EventId::new(id), &patch)
        .await?;

    Ok(Json(event))
}
