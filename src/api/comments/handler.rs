//! Comment API Handlers
//!
//! 每个操作先解析父事件并套用事件级访问检查 (404/403)，连读取也不例外：
//! 看不到事件的人也看不到它的评论。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::api::Pagination;
use crate::api::incidents::handler::load_incident_checked;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Comment, CommentCreate, CommentsPublic, Message};
use crate::db::repository::CommentRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/incidents/:incident_id/comments - 评论列表 (时间正序)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(incident_id): Path<Uuid>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<CommentsPublic>> {
    load_incident_checked(&state, &user, incident_id).await?;

    let repo = CommentRepository::new(state.db.pool.clone());
    let (data, count) = repo
        .list_for_incident(&incident_id.to_string(), page.skip, page.limit)
        .await
        .map_err(AppError::from)?;

    Ok(Json(CommentsPublic { data, count }))
}

/// POST /api/incidents/:incident_id/comments - 创建评论
///
/// author 强制为当前用户，incident 强制取路径参数。
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(incident_id): Path<Uuid>,
    Json(payload): Json<CommentCreate>,
) -> AppResult<Json<Comment>> {
    load_incident_checked(&state, &user, incident_id).await?;
    payload.validate().map_err(AppError::from)?;

    let repo = CommentRepository::new(state.db.pool.clone());
    let comment = repo
        .create(&incident_id.to_string(), &user.id, payload)
        .await
        .map_err(AppError::from)?;

    Ok(Json(comment))
}

/// DELETE /api/incidents/:incident_id/comments/:comment_id - 删除评论
///
/// 事件门禁之后，要求超级用户或评论作者本人；事件所有者不在其列。
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((incident_id, comment_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Message>> {
    load_incident_checked(&state, &user, incident_id).await?;

    let repo = CommentRepository::new(state.db.pool.clone());
    let comment = repo
        .find_by_id(&comment_id.to_string())
        .await
        .map_err(AppError::from)?
        .filter(|c| c.incident_id == incident_id.to_string())
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    if !user.is_superuser && comment.author_id != user.id {
        return Err(AppError::forbidden("Not enough permissions"));
    }

    repo.delete(&comment.id).await.map_err(AppError::from)?;

    Ok(Json(Message::new("Comment deleted successfully")))
}
