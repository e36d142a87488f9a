use std::env;

use chrono::{Duration, Utc};

/// Environment configuration
/// Loads and validates environment variables once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub cors_origins: Vec<String>,
    pub mail: MailConfig,
    pub app_base_url: String,
    pub app_env: AppEnv,
}

#[derive(Debug, Clone, Default)]
pub struct MailConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => AppEnv::Development,
            _ => AppEnv::Production,
        }
    }

    pub fn exposes_error_detail(self) -> bool {
        self == AppEnv::Development
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(p) => p.parse().map_err(|_| format!("PORT is not a valid port: {p}"))?,
            Err(_) => 3000,
        };

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set".to_string())?;

        let jwt_expires_in = match env::var("JWT_EXPIRES_IN") {
            Ok(raw) => parse_duration(&raw)
                .ok_or_else(|| format!("JWT_EXPIRES_IN is not a valid duration: {raw}"))?,
            Err(_) => Duration::days(1),
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or_default();

        let mail = MailConfig {
            api_url: env::var("MAIL_API_URL").ok().filter(|v| !v.is_empty()),
            api_key: env::var("MAIL_API_KEY").ok().filter(|v| !v.is_empty()),
            from: env::var("MAIL_FROM").unwrap_or_else(|_| "no-reply@tripnest.local".to_string()),
        };

        let app_base_url = env::var("APP_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));

        let app_env = env::var("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Production);

        Ok(Self {
            port,
            database_url,
            jwt_secret,
            jwt_expires_in,
            cors_origins,
            mail,
            app_base_url: app_base_url.trim_end_matches('/').to_string(),
            app_env,
        })
    }
}

/// Parses `3600`, `45s`, `30m`, `12h` or `7d`.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => raw.split_at(idx),
        None => (raw, "s"),
    };
    let amount: i64 = digits.parse().ok()?;
    if amount <= 0 {
        return None;
    }

    let duration = match unit {
        "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        _ => None,
    }?;

    // Token expiry is computed as now + duration.
    Utc::now().checked_add_signed(duration).map(|_| duration)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
