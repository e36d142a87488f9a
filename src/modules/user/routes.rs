use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::modules::auth::middleware::{authenticate, require_admin};
use crate::AppState;
use super::controller;

pub fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/", get(controller::list_users))
        .route("/{user_id}", delete(controller::delete_user))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route(
            "/profile",
            get(controller::get_profile)
                .put(controller::update_profile)
                .delete(controller::delete_profile),
        )
        .route("/change-password", put(controller::change_password))
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}

/// `/api/user/` with a trailing slash, which `nest` does not match.
pub fn user_index_alias(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/user/", get(controller::list_users))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
