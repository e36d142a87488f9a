use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::model::Booking;
use super::schema::{
    BookingEnvelope, BookingListResponse, BookingResponse, CreateBookingRequest, UpdateBookingRequest,
};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::modules::auth::{
    middleware::{ensure_owner, AuthUser},
    schema::MessageResponse,
};
use crate::AppState;

async fn load_booking(state: &AppState, booking_id: &str) -> Result<Booking, AppError> {
    state
        .bookings
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))
}

// =============================================================================
// POST /api/booking
// =============================================================================

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    AppJson(req): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingEnvelope>), AppError> {
    req.validate()?;

    let Some(seats_booked) = req.seats_booked else {
        return Err(AppError::bad_request("Seats booked is required"));
    };

    if state.events.find_by_id(&req.event_id).await?.is_none() {
        return Err(AppError::not_found("Event not found"));
    }

    let now = Utc::now();
    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        event_id: req.event_id,
        user_id: caller.id.clone(),
        seats_booked,
        created_at: now,
        updated_at: now,
    };

    state.bookings.create(&booking).await?;
    tracing::info!(booking_id = %booking.id, event_id = %booking.event_id, user_id = %caller.id, "booking created");

    Ok((
        StatusCode::CREATED,
        Json(BookingEnvelope {
            success: true,
            message: Some("Booking created successfully"),
            booking: BookingResponse::from(booking),
        }),
    ))
}

// =============================================================================
// GET /api/booking/my-bookings
// =============================================================================

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<BookingListResponse>, AppError> {
    let details = state.bookings.list_by_user(&caller.id).await?;
    Ok(Json(BookingListResponse::new(details)))
}

// =============================================================================
// /api/booking/{booking_id}
// =============================================================================

/// Visible to the booking user, admins, and the creator of the booked event.
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingEnvelope>, AppError> {
    let detail = state
        .bookings
        .find_detail(&booking_id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking not found"))?;

    let hosts_event = detail
        .event
        .as_ref()
        .is_some_and(|event| event.creator_id == caller.id);

    if !hosts_event {
        ensure_owner(&caller, &detail.booking.user_id, "You are not authorized to view this booking")?;
    }

    Ok(Json(BookingEnvelope {
        success: true,
        message: None,
        booking: BookingResponse::from(detail),
    }))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(booking_id): Path<String>,
    AppJson(req): AppJson<UpdateBookingRequest>,
) -> Result<Json<BookingEnvelope>, AppError> {
    req.validate()?;

    let mut booking = load_booking(&state, &booking_id).await?;
    ensure_owner(&caller, &booking.user_id, "You are not authorized to update this booking")?;

    if let Some(seats_booked) = req.seats_booked {
        booking.seats_booked = seats_booked;
    }
    booking.updated_at = Utc::now();
    state.bookings.update(&booking).await?;

    Ok(Json(BookingEnvelope {
        success: true,
        message: Some("Booking updated successfully"),
        booking: BookingResponse::from(booking),
    }))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(booking_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let booking = load_booking(&state, &booking_id).await?;
    ensure_owner(&caller, &booking.user_id, "You are not authorized to cancel this booking")?;

    if !state.bookings.delete(&booking.id).await? {
        return Err(AppError::not_found("Booking not found"));
    }

    tracing::info!(%booking_id, user_id = %caller.id, "booking cancelled");
    Ok(Json(MessageResponse::ok("Booking cancelled successfully")))
}

// =============================================================================
// CREATOR VIEWS
// =============================================================================

pub async fn bookings_for_my_events(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<BookingListResponse>, AppError> {
    let details = state.bookings.list_for_creator(&caller.id).await?;
    Ok(Json(BookingListResponse::new(details)))
}

pub async fn bookings_for_event(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(event_id): Path<String>,
) -> Result<Json<BookingListResponse>, AppError> {
    let event = state
        .events
        .find_by_id(&event_id)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;

    if event.creator_id != caller.id {
        return Err(AppError::forbidden(
            "You can only view bookings for your own events",
        ));
    }

    let details = state.bookings.list_by_event(&event.id).await?;
    Ok(Json(BookingListResponse::new(details)))
}
