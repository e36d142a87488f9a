use axum::{middleware, routing::post, Router};
use std::sync::Arc;

use crate::AppState;
use super::{controller, middleware::authenticate};

pub fn auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .route("/logout", post(controller::logout))
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    Router::new()
        .route("/register", post(controller::register))
        .route("/login", post(controller::login))
        .route("/forgot-password", post(controller::forgot_password))
        .route("/reset-password", post(controller::reset_password))
        .merge(protected)
}
