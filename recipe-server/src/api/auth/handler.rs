//! Token auth handlers
//!
//! Tokens are stateless JWTs, so logout only acknowledges the request.

use axum::{extract::State, http::StatusCode};

use crate::auth::{CurrentUser, verify_password};
use crate::core::AppState;
use crate::db::repository::user;
use crate::utils::extract::Json;
use crate::utils::{AppError, AppResult};
use shared::models::{LoginRequest, TokenResponse};

/// POST /api/auth/token/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::invalid_credentials());
    }

    let found = user::find_by_email(&state.pool, email).await?;
    let Some(found) = found.filter(|u| verify_password(&payload.password, &u.password_hash))
    else {
        tracing::debug!(email = %email, "Login failed");
        return Err(AppError::invalid_credentials());
    };

    let auth_token = state
        .jwt
        .generate_token(found.id, &found.username)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    tracing::info!(user_id = found.id, "User logged in");
    Ok(Json(TokenResponse { auth_token }))
}

/// POST /api/auth/token/logout
pub async fn logout(current: CurrentUser) -> StatusCode {
    tracing::debug!(user_id = current.id, "User logged out");
    StatusCode::NO_CONTENT
}
