//! Incident API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::api::Pagination;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Incident, IncidentCreate, IncidentUpdate, IncidentsPublic, Message};
use crate::db::repository::IncidentRepository;
use crate::utils::{AppError, AppResult};

/// Load an incident and enforce the ownership gate
///
/// 404 if the id does not exist, 403 if the caller is neither superuser nor
/// owner. Comment handlers reuse this as the parent-incident gate.
pub(crate) async fn load_incident_checked(
    state: &ServerState,
    user: &CurrentUser,
    id: Uuid,
) -> AppResult<Incident> {
    let repo = IncidentRepository::new(state.db.pool.clone());
    let incident = repo
        .find_by_id(&id.to_string())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Incident not found"))?;

    if !user.is_superuser && incident.owner_id != user.id {
        return Err(AppError::forbidden("Not enough permissions"));
    }

    Ok(incident)
}

/// GET /api/incidents - 获取事件列表 (非超级用户只能看到自己的)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(page): Query<Pagination>,
) -> AppResult<Json<IncidentsPublic>> {
    let repo = IncidentRepository::new(state.db.pool.clone());
    let (data, count) = if user.is_superuser {
        repo.list_all(page.skip, page.limit).await
    } else {
        repo.list_by_owner(&user.id, page.skip, page.limit).await
    }
    .map_err(AppError::from)?;

    Ok(Json(IncidentsPublic { data, count }))
}

/// GET /api/incidents/:id - 获取单个事件
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Incident>> {
    let incident = load_incident_checked(&state, &user, id).await?;
    Ok(Json(incident))
}

/// POST /api/incidents - 创建事件 (owner 强制为当前用户)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<IncidentCreate>,
) -> AppResult<Json<Incident>> {
    payload.validate().map_err(AppError::from)?;

    let repo = IncidentRepository::new(state.db.pool.clone());
    let incident = repo
        .create(&user.id, payload)
        .await
        .map_err(AppError::from)?;

    Ok(Json(incident))
}

/// PUT /api/incidents/:id - 部分更新事件
///
/// 载荷里出现的字段才会被应用；status 出现时由仓储维护 resolved_at。
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<IncidentUpdate>,
) -> AppResult<Json<Incident>> {
    payload.validate()?;

    let incident = load_incident_checked(&state, &user, id).await?;

    let repo = IncidentRepository::new(state.db.pool.clone());
    let updated = repo
        .update(&incident, payload)
        .await
        .map_err(AppError::from)?;

    Ok(Json(updated))
}

/// DELETE /api/incidents/:id - 删除事件 (评论级联删除)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Message>> {
    load_incident_checked(&state, &user, id).await?;

    let repo = IncidentRepository::new(state.db.pool.clone());
    repo.delete(&id.to_string()).await.map_err(AppError::from)?;

    Ok(Json(Message::new("Incident deleted successfully")))
}
