use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::environment::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Mail API error: {0}")]
    Api(String),
}

/// A rendered outbound message.
#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Outbound email collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

pub fn password_reset_email(from: &str, to: &str, reset_token: &str, base_url: &str) -> Email {
    let link = format!("{base_url}/reset-password?token={reset_token}");
    Email {
        from: from.to_string(),
        to: to.to_string(),
        subject: "Password Reset".to_string(),
        text: format!(
            "You requested a password reset. Here is your token: {reset_token}\n\n\
             Or open this link within 10 minutes: {link}"
        ),
    }
}

// =============================================================================
// HTTP MAIL API
// =============================================================================

/// Posts messages as JSON to a transactional mail API.
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let mut request = self.client.post(&self.api_url).json(&email);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailError::Api(format!(
                "API returned status: {}",
                response.status()
            )));
        }

        Ok(())
    }
}

// =============================================================================
// LOG ONLY
// =============================================================================

/// Used when no mail API is configured. Writes the message to the log.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(to = %email.to, subject = %email.subject, body = %email.text, "outbound email (not delivered)");
        Ok(())
    }
}

pub fn mailer_from_config(config: &MailConfig) -> Box<dyn Mailer> {
    match &config.api_url {
        Some(url) => Box::new(HttpMailer::new(url.clone(), config.api_key.clone())),
        None => {
            tracing::warn!("MAIL_API_URL not set; password reset emails will only be logged");
            Box::new(LogMailer)
        }
    }
}
