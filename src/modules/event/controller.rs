use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::model::Event;
use super::schema::{CreateEventRequest, EventEnvelope, EventListResponse, EventResponse, UpdateEventRequest};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::modules::auth::{
    middleware::{ensure_owner, AuthUser},
    schema::MessageResponse,
};
use crate::AppState;

async fn load_event(state: &AppState, event_id: &str) -> Result<Event, AppError> {
    state
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))
}

// =============================================================================
// PUBLIC
// =============================================================================

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = state.events.list().await?;
    Ok(Json(EventListResponse::new(events)))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Json<EventEnvelope>, AppError> {
    let event = load_event(&state, &event_id).await?;

    Ok(Json(EventEnvelope {
        success: true,
        event: EventResponse::from(event),
    }))
}

// =============================================================================
// CREATOR
// =============================================================================

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventEnvelope>), AppError> {
    req.validate()?;

    let (Some(date), Some(available_seats)) = (req.date, req.available_seats) else {
        return Err(AppError::bad_request("Date and available seats are required"));
    };

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        description: req.description,
        category: req.category,
        date,
        location: req.location,
        available_seats,
        creator_id: caller.id.clone(),
        created_at: now,
        updated_at: now,
    };

    state.events.create(&event).await?;
    tracing::info!(event_id = %event.id, creator_id = %caller.id, "event created");

    Ok((
        StatusCode::CREATED,
        Json(EventEnvelope {
            success: true,
            event: EventResponse::from(event),
        }),
    ))
}

pub async fn my_events(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = state.events.list_by_creator(&caller.id).await?;
    Ok(Json(EventListResponse::new(events)))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(event_id): Path<String>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> Result<Json<EventEnvelope>, AppError> {
    req.validate()?;

    let mut event = load_event(&state, &event_id).await?;
    if event.creator_id != caller.id {
        return Err(AppError::forbidden("You can only update your own events"));
    }

    req.apply(&mut event);
    event.updated_at = Utc::now();
    state.events.update(&event).await?;

    Ok(Json(EventEnvelope {
        success: true,
        event: EventResponse::from(event),
    }))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(event_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let event = load_event(&state, &event_id).await?;
    ensure_owner(&caller, &event.creator_id, "You can only delete your own events")?;

    if !state.events.delete(&event.id).await? {
        return Err(AppError::not_found("Event not found"));
    }

    tracing::info!(%event_id, user_id = %caller.id, "event deleted");
    Ok(Json(MessageResponse::ok("Event deleted successfully")))
}
