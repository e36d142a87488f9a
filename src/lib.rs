pub mod config;
pub mod error;
pub mod extract;
pub mod modules;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use config::Config;
use modules::auth::auth_routes;
use modules::booking::{booking_index_alias, booking_routes, interface::BookingRepository};
use modules::event::{event_routes, interface::EventRepository};
use modules::user::{interface::UserRepository, user_index_alias, user_routes};
use services::jwt::JwtService;
use services::mailer::Mailer;
use services::security::{cors_layer, security_headers};

pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub events: Arc<dyn EventRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub jwt_service: JwtService,
    pub mailer: Box<dyn Mailer>,
    pub config: Config,
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/user", user_routes(state.clone()))
        .nest("/api/event", event_routes(state.clone()))
        .nest("/api/booking", booking_routes(state.clone()))
        .merge(user_index_alias(state.clone()))
        .merge(booking_index_alias(state.clone()))
        .layer(middleware::from_fn_with_state(state.clone(), error::expose_error_detail))
        .layer(middleware::from_fn(security_headers))
        .layer(RequestBodyLimitLayer::new(1024 * 100)) // 100KB max body
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct Banner {
    service: &'static str,
    version: &'static str,
    endpoints: [&'static str; 4],
}

async fn root() -> Json<Banner> {
    Json(Banner {
        service: "TripNest API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ["/api/auth", "/api/user", "/api/event", "/api/booking"],
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
