//! Identity Handlers
//!
//! Plaintext credential matching against the Users collection; no
//! sessions, tokens or password policy. Response messages stay in Arabic
//! for the existing front-end.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::{RepoError, UserRepository};
use crate::db::models::{UserCreate, UserPublic};
use crate::utils::{AppError, AppResult};

const MSG_USERNAME_TAKEN: &str = "اسم المستخدم موجود بالفعل";
const MSG_REGISTERED: &str = "تم انشاء الحساب بنجاح";
const MSG_USERS_CLEARED: &str = "تم مسح جميع الحسابات بنجاح";

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /register
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let repo = UserRepository::new(state.store.clone());
    repo.register(payload).map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::business_rule(MSG_USERNAME_TAKEN),
        other => AppError::internal(other.to_string()),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: MSG_REGISTERED,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserPublic,
}

/// POST /login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = UserRepository::new(state.store.clone());
    let user = repo
        .authenticate(&req.username, &req.password)
        .ok_or(AppError::InvalidCredentials)?;

    Ok(Json(LoginResponse {
        success: true,
        user,
    }))
}

#[derive(Debug, Serialize)]
pub struct ClearUsersResponse {
    pub message: &'static str,
}

/// POST /clear-users - drops every account except the administrator
pub async fn clear_users(
    State(state): State<ServerState>,
) -> AppResult<Json<ClearUsersResponse>> {
    let repo = UserRepository::new(state.store.clone());
    let removed = repo
        .clear_retaining_admin()
        .map_err(|e| AppError::internal(e.to_string()))?;
    tracing::info!(removed, "Cleared user accounts");

    Ok(Json(ClearUsersResponse {
        message: MSG_USERS_CLEARED,
    }))
}
