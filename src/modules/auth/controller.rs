use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::extract::AppJson;
use crate::modules::auth::{
    middleware::AuthUser,
    schema::{
        ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
        RegisterResponse, ResetPasswordRequest,
    },
};
use crate::modules::user::{
    model::{Role, User},
    schema::{is_long_enough_password, UserResponse, UserSummary},
};
use crate::services::{hashing, mailer, reset_token};
use crate::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// =============================================================================
// POST /api/auth/register
// =============================================================================

pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    req.validate()?;

    let role = match req.role.as_deref() {
        None | Some("") => Role::default(),
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| AppError::bad_request("Invalid role. Allowed roles: user, creator, admin"))?,
    };

    let email = req.email.to_lowercase();

    if let Some(existing) = state
        .users
        .find_identity_conflict(&email, &req.username, &req.phone_number)
        .await?
    {
        let field = if existing.email == email {
            "Email"
        } else if existing.username == req.username {
            "Username"
        } else {
            "Phone number"
        };
        return Err(AppError::Conflict(format!("{field} already exists")));
    }

    let password_hash = hashing::hash_password(&req.password)
        .map_err(|e| AppError::internal("Error registering user", e))?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: req.username,
        email,
        phone_number: req.phone_number,
        password_hash,
        gender: req.gender,
        date_of_birth: req.date_of_birth,
        profile_picture: req.profile_picture,
        role: role.as_str().to_string(),
        reset_password_token_hash: None,
        reset_password_expires_at: None,
        created_at: now,
        updated_at: now,
    };

    // A concurrent registration can still trip the unique index here
    state.users.create(&user).await?;
    tracing::info!(user_id = %user.id, role = %role, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully",
            user: UserResponse::from(&user),
        }),
    ))
}

// =============================================================================
// POST /api/auth/login
// =============================================================================

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::bad_request("Email and password are required"));
    }

    let user = state
        .users
        .find_by_email(&req.email.to_lowercase())
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    let is_valid = hashing::verify_password(&req.password, &user.password_hash)
        .map_err(|e| AppError::internal("Error during login", e))?;

    if !is_valid {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state
        .jwt_service
        .issue(&user.id)
        .map_err(|e| AppError::internal("Error during login", e))?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful",
        token,
        user: UserSummary::from(&user),
    }))
}

// =============================================================================
// POST /api/auth/logout
// =============================================================================

/// Tokens are stateless; the client discards its copy.
pub async fn logout(Extension(user): Extension<AuthUser>) -> Json<MessageResponse> {
    tracing::debug!(user_id = %user.id, "logout");
    Json(MessageResponse::ok(
        "Logout successful. Please remove the token from client storage.",
    ))
}

// =============================================================================
// POST /api/auth/forgot-password
// =============================================================================

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::bad_request("Email is required"));
    }

    let mut user = state
        .users
        .find_by_email(&req.email.trim().to_lowercase())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let now = Utc::now();
    let issued = reset_token::issue_reset_token(now);
    user.reset_password_token_hash = Some(issued.token_hash);
    user.reset_password_expires_at = Some(issued.expires_at);
    user.updated_at = now;
    state.users.update(&user).await?;

    let email = mailer::password_reset_email(
        &state.config.mail.from,
        &user.email,
        &issued.token,
        &state.config.app_base_url,
    );
    state
        .mailer
        .send(email)
        .await
        .map_err(|e| AppError::internal("Error sending password reset email", e))?;

    tracing::info!(user_id = %user.id, "password reset email sent");

    Ok(Json(MessageResponse::ok("Password reset email sent")))
}

// =============================================================================
// POST /api/auth/reset-password
// =============================================================================

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.reset_token.is_empty() || req.new_password.is_empty() {
        return Err(AppError::bad_request(
            "Reset token and new password are required",
        ));
    }

    if !is_long_enough_password(&req.new_password) {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters long",
        ));
    }

    let now = Utc::now();
    let token_hash = reset_token::hash_reset_token(&req.reset_token);

    let mut user = state
        .users
        .find_by_reset_token_hash(&token_hash, now)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid or expired reset token"))?;

    user.password_hash = hashing::hash_password(&req.new_password)
        .map_err(|e| AppError::internal("Error resetting password", e))?;
    user.clear_reset_token();
    user.updated_at = now;
    state.users.update(&user).await?;

    tracing::info!(user_id = %user.id, "password reset");

    Ok(Json(MessageResponse::ok("Password has been reset successfully")))
}
