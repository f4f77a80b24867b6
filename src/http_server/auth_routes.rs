//! Auth HTTP Routes
//!
//! Registration, login, and logout for both roles. The user and admin
//! login endpoints share the credential check; each gates on the role it
//! serves afterwards, so a user token never works the admin surface.

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde::Serialize;

use crate::auth::service::{LoginRequest, RegisterRequest};
use crate::auth::{AuthError, Role, User};

use super::response::{auth_error, ApiError};
use super::state::{bearer_token, AppState};

/// Routes under `/user` and `/admin`
pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/user/register", post(register_handler))
        .route("/user/login", post(user_login_handler))
        .route("/user/logout", post(user_logout_handler))
        .route("/admin/login", post(admin_login_handler))
        .route("/admin/logout", post(admin_logout_handler))
        .with_state(state)
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Handlers
// ==================

async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = state.auth.register(request).map_err(auth_error)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(&user),
            token,
        }),
    ))
}

/// Credential check plus a role gate for the route
fn login_as(
    state: &AppState,
    request: LoginRequest,
    role: Role,
) -> Result<(User, String), AuthError> {
    let (user, token) = state.auth.login(request)?;

    if user.role != role {
        // Revoke the freshly issued token before rejecting
        let _ = state.auth.logout(&token);
        return Err(AuthError::WrongRole);
    }

    Ok((user, token))
}

async fn user_login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = login_as(&state, request, Role::User).map_err(auth_error)?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: UserResponse::from(&user),
            token,
        }),
    ))
}

async fn admin_login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = login_as(&state, request, Role::Admin).map_err(auth_error)?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            user: UserResponse::from(&user),
            token,
        }),
    ))
}

fn logout(state: &AppState, headers: &HeaderMap, role: Role) -> Result<(), AuthError> {
    let token = bearer_token(headers)?;
    let principal = state.auth.authenticate(token)?;
    principal.require_role(role)?;

    state.auth.logout(token)
}

async fn user_logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    logout(&state, &headers, Role::User).map_err(auth_error)?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

async fn admin_logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    logout(&state, &headers, Role::Admin).map_err(auth_error)?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}
