//! Incident Repository

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::db::models::{Incident, IncidentCreate, IncidentStatus, IncidentUpdate};

#[derive(Clone)]
pub struct IncidentRepository {
    pool: SqlitePool,
}

impl IncidentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All incidents, newest first, with the total count of the full set
    pub async fn list_all(&self, skip: i64, limit: i64) -> RepoResult<(Vec<Incident>, i64)> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incident")
            .fetch_one(&self.pool)
            .await?;
        let incidents = sqlx::query_as::<_, Incident>(
            "SELECT * FROM incident ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;
        Ok((incidents, count))
    }

    /// Incidents owned by one user, newest first, with the owned-set count
    pub async fn list_by_owner(
        &self,
        owner_id: &str,
        skip: i64,
        limit: i64,
    ) -> RepoResult<(Vec<Incident>, i64)> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM incident WHERE owner_id = ?1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;
        let incidents = sqlx::query_as::<_, Incident>(
            "SELECT * FROM incident WHERE owner_id = ?1 ORDER BY created_at DESC LIMIT ?2 OFFSET ?3",
        )
        .bind(owner_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;
        Ok((incidents, count))
    }

    /// Find incident by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Incident>> {
        let incident = sqlx::query_as::<_, Incident>("SELECT * FROM incident WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(incident)
    }

    /// Create a new incident owned by `owner_id`
    ///
    /// 创建不打 resolved_at，即使初始状态就是 resolved；时间戳只由
    /// 带 status 的更新管理。
    pub async fn create(&self, owner_id: &str, data: IncidentCreate) -> RepoResult<Incident> {
        let incident = Incident {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            description: data.description,
            status: data.status.unwrap_or_default(),
            priority: data.priority.unwrap_or_default(),
            category: data.category.unwrap_or_default(),
            owner_id: owner_id.to_string(),
            assignee_id: data.assignee_id.map(|id| id.to_string()),
            created_at: Utc::now(),
            resolved_at: None,
        };

        sqlx::query(
            "INSERT INTO incident (id, title, description, status, priority, category, owner_id, assignee_id, created_at, resolved_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&incident.id)
        .bind(&incident.title)
        .bind(&incident.description)
        .bind(incident.status)
        .bind(incident.priority)
        .bind(incident.category)
        .bind(&incident.owner_id)
        .bind(&incident.assignee_id)
        .bind(incident.created_at)
        .bind(incident.resolved_at)
        .execute(&self.pool)
        .await?;

        Ok(incident)
    }

    /// Apply a partial update to a previously loaded incident
    ///
    /// Only payload-present fields change. When `status` is present:
    /// `resolved` stamps `resolved_at` with the current UTC time (re-stamped
    /// even on resolved→resolved), anything else clears it. When `status` is
    /// absent `resolved_at` stays untouched. Row-level last-write-wins.
    pub async fn update(&self, current: &Incident, data: IncidentUpdate) -> RepoResult<Incident> {
        let mut next = current.clone();

        if let Some(title) = data.title {
            next.title = title;
        }
        if let Some(description) = data.description {
            next.description = description;
        }
        if let Some(priority) = data.priority {
            next.priority = priority;
        }
        if let Some(category) = data.category {
            next.category = category;
        }
        if let Some(assignee_id) = data.assignee_id {
            next.assignee_id = assignee_id.map(|id| id.to_string());
        }
        if let Some(status) = data.status {
            next.status = status;
            next.resolved_at = if status == IncidentStatus::Resolved {
                Some(Utc::now())
            } else {
                None
            };
        }

        let result = sqlx::query(
            "UPDATE incident SET title = ?1, description = ?2, status = ?3, priority = ?4, \
             category = ?5, assignee_id = ?6, resolved_at = ?7 WHERE id = ?8",
        )
        .bind(&next.title)
        .bind(&next.description)
        .bind(next.status)
        .bind(next.priority)
        .bind(next.category)
        .bind(&next.assignee_id)
        .bind(next.resolved_at)
        .bind(&next.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Incident {} not found",
                next.id
            )));
        }

        Ok(next)
    }

    /// Hard delete an incident; comments cascade via referential actions
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM incident WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
