use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::modules::auth::middleware::{authenticate, require_creator, require_creator_or_admin};
use crate::AppState;
use super::controller;

pub fn event_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let creator = Router::new()
        .route("/events", post(controller::create_event))
        .route("/my-events", get(controller::my_events))
        .route("/events/{event_id}", put(controller::update_event))
        .route_layer(middleware::from_fn(require_creator));

    let removal = Router::new()
        .route("/events/{event_id}", delete(controller::delete_event))
        .route_layer(middleware::from_fn(require_creator_or_admin));

    let protected = creator
        .merge(removal)
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/events", get(controller::list_events))
        .route("/events/{event_id}", get(controller::get_event))
        .merge(protected)
}
