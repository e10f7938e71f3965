//! Authentication Handlers
//!
//! Handles login and token issuance

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// JSON payload containing access token
#[derive(Debug, Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/auth/login - 认证用户并签发 JWT
///
/// 凭证不符统一返回 "Invalid email or password"，不区分用户是否存在。
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Token>> {
    let repo = UserRepository::new(state.db.pool.clone());

    let user = repo
        .authenticate(&req.email, &req.password)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !user.is_active {
        return Err(AppError::forbidden("Inactive user"));
    }

    let token = state
        .get_jwt_service()
        .generate_token(&user.id, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user.id, email = %user.email, "User logged in successfully");

    Ok(Json(Token {
        access_token: token,
        token_type: "bearer".to_string(),
    }))
}
