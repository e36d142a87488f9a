use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::modules::auth::middleware::{authenticate, require_creator};
use crate::AppState;
use super::controller;

pub fn booking_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let creator = Router::new()
        .route("/bookings-for-my-events", get(controller::bookings_for_my_events))
        .route("/event/{event_id}/bookings", get(controller::bookings_for_event))
        .route_layer(middleware::from_fn(require_creator));

    Router::new()
        .route("/", post(controller::create_booking))
        .route("/my-bookings", get(controller::my_bookings))
        .route(
            "/{booking_id}",
            get(controller::get_booking)
                .put(controller::update_booking)
                .delete(controller::cancel_booking),
        )
        .merge(creator)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

pub fn booking_index_alias(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/booking/", post(controller::create_booking))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
