use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripnest::config::{environment::Config, init_db};
use tripnest::modules::{booking::crud::BookingCrud, event::crud::EventCrud, user::crud::UserCrud};
use tripnest::services::{jwt::JwtService, mailer::mailer_from_config};
use tripnest::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripnest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let db = init_db(&config.database_url).await?;
    tracing::info!("Connected to MySQL");

    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expires_in);
    let mailer = mailer_from_config(&config.mail);
    let port = config.port;

    let state = Arc::new(AppState {
        users: Arc::new(UserCrud::new(db.clone())),
        events: Arc::new(EventCrud::new(db.clone())),
        bookings: Arc::new(BookingCrud::new(db)),
        jwt_service,
        mailer,
        config,
    });

    let app = tripnest::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server running on http://localhost:{port}");
    axum::serve(listener, app).await?;

    Ok(())
}
