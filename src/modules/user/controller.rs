use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use super::model::User;
use super::schema::{
    is_long_enough_password, ChangePasswordRequest, ProfileResponse, UpdateProfileRequest,
    UserListResponse, UserResponse,
};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::modules::auth::{middleware::AuthUser, schema::MessageResponse};
use crate::services::hashing;
use crate::AppState;

async fn load_user(state: &AppState, id: &str) -> Result<User, AppError> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

// =============================================================================
// GET /api/user/profile
// =============================================================================

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = load_user(&state, &caller.id).await?;

    Ok(Json(ProfileResponse {
        success: true,
        message: None,
        user: UserResponse::from(&user),
    }))
}

// =============================================================================
// PUT /api/user/profile
// =============================================================================

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    req.validate()?;

    let mut user = load_user(&state, &caller.id).await?;
    req.apply(&mut user);
    user.updated_at = Utc::now();

    state.users.update(&user).await?;

    Ok(Json(ProfileResponse {
        success: true,
        message: Some("User profile updated successfully"),
        user: UserResponse::from(&user),
    }))
}

// =============================================================================
// DELETE /api/user/profile
// =============================================================================

pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.users.delete(&caller.id).await? {
        return Err(AppError::not_found("User not found"));
    }

    tracing::info!(user_id = %caller.id, "user deleted own profile");
    Ok(Json(MessageResponse::ok("User profile deleted successfully")))
}

// =============================================================================
// PUT /api/user/change-password
// =============================================================================

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.current_password.is_empty() || req.new_password.is_empty() {
        return Err(AppError::bad_request(
            "Current password and new password are required",
        ));
    }

    if !is_long_enough_password(&req.new_password) {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters long",
        ));
    }

    let mut user = load_user(&state, &caller.id).await?;

    let matches = hashing::verify_password(&req.current_password, &user.password_hash)
        .map_err(|e| AppError::internal("Error changing password", e))?;
    if !matches {
        return Err(AppError::unauthorized("Current password is incorrect"));
    }

    user.password_hash = hashing::hash_password(&req.new_password)
        .map_err(|e| AppError::internal("Error changing password", e))?;
    user.updated_at = Utc::now();
    state.users.update(&user).await?;

    Ok(Json(MessageResponse::ok("Password changed successfully")))
}

// =============================================================================
// GET /api/user  (admin)
// =============================================================================

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserListResponse>, AppError> {
    let users = state.users.list().await?;

    Ok(Json(UserListResponse {
        success: true,
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

// =============================================================================
// DELETE /api/user/{user_id}  (admin)
// =============================================================================

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.users.delete(&user_id).await? {
        return Err(AppError::not_found("User not found"));
    }

    tracing::info!(admin_id = %caller.id, %user_id, "user deleted by admin");
    Ok(Json(MessageResponse::ok("User deleted successfully")))
}
