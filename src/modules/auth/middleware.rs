use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::modules::user::model::Role;
use crate::AppState;

/// Identity attached to the request by `authenticate`. Never carries the
/// password hash.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

const UNAUTHENTICATED: &str = "Authentication required";

fn unauthenticated() -> AppError {
    AppError::unauthorized(UNAUTHENTICATED)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves `Authorization: Bearer <token>` to a stored user. Every failure,
/// including a valid token for a deleted user, is the same 401.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::debug!("missing or malformed Authorization header");
        unauthenticated()
    })?;

    let user_id = state.jwt_service.verify(token).map_err(|_| unauthenticated())?;

    let user = state.users.find_by_id(&user_id).await?.ok_or_else(|| {
        tracing::debug!(%user_id, "token refers to a missing user");
        unauthenticated()
    })?;

    let role = user
        .role()
        .map_err(|e| AppError::internal("Authentication failed", e))?;

    request.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
        username: user.username,
        role,
    });

    Ok(next.run(request).await)
}

// =============================================================================
// ROLE GATE
// =============================================================================

fn role_gate(request: &Request, allowed: &[Role]) -> Result<(), AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(unauthenticated)?;

    if !allowed.contains(&user.role) {
        tracing::debug!(user_id = %user.id, role = %user.role, "role gate denied");
        return Err(AppError::forbidden("Access denied. Insufficient permissions."));
    }

    Ok(())
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    role_gate(&request, &[Role::Admin])?;
    Ok(next.run(request).await)
}

pub async fn require_creator(request: Request, next: Next) -> Result<Response, AppError> {
    role_gate(&request, &[Role::Creator])?;
    Ok(next.run(request).await)
}

pub async fn require_creator_or_admin(request: Request, next: Next) -> Result<Response, AppError> {
    role_gate(&request, &[Role::Creator, Role::Admin])?;
    Ok(next.run(request).await)
}

// =============================================================================
// OWNERSHIP GATE
// =============================================================================

/// Admins pass; everyone else must be the owning user.
pub fn ensure_owner(user: &AuthUser, owner_id: &str, denied: &str) -> Result<(), AppError> {
    if user.is_admin() || user.id == owner_id {
        Ok(())
    } else {
        Err(AppError::forbidden(denied))
    }
}
