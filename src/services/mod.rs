pub mod hashing;
pub mod jwt;
pub mod mailer;
pub mod reset_token;
pub mod security;
