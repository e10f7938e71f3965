//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Message, User, UserCreate};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/users/me - 当前用户信息
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .find_by_id(&user.id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(user))
}

/// POST /api/users - 创建用户 (仅超级用户)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    if !user.is_superuser {
        return Err(AppError::forbidden("Not enough permissions"));
    }
    payload.validate().map_err(AppError::from)?;

    let repo = UserRepository::new(state.db.pool.clone());
    let created = repo.create(payload).await.map_err(AppError::from)?;

    tracing::info!(user_id = %created.id, email = %created.email, "User created");
    Ok(Json(created))
}

/// DELETE /api/users/{id} - 删除用户 (仅超级用户，不能删除自己)
///
/// 该用户拥有的事件连同其评论一并级联删除；仅被指派的事件保留，
/// assignee_id 置空。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Message>> {
    if !user.is_superuser {
        return Err(AppError::forbidden("Not enough permissions"));
    }
    if user.id == id.to_string() {
        return Err(AppError::forbidden(
            "Super users are not allowed to delete themselves",
        ));
    }

    let repo = UserRepository::new(state.db.pool.clone());
    let deleted = repo.delete(&id.to_string()).await.map_err(AppError::from)?;
    if !deleted {
        return Err(AppError::not_found("User not found"));
    }

    Ok(Json(Message::new("User deleted successfully")))
}
