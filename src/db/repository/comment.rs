//! Comment Repository

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::RepoResult;
use crate::db::models::{Comment, CommentCreate};

#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Comments on one incident, oldest first, with the total count
    ///
    /// 排序与事件列表相反：评论按时间正序读起来才像讨论串。
    pub async fn list_for_incident(
        &self,
        incident_id: &str,
        skip: i64,
        limit: i64,
    ) -> RepoResult<(Vec<Comment>, i64)> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comment WHERE incident_id = ?1")
                .bind(incident_id)
                .fetch_one(&self.pool)
                .await?;
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comment WHERE incident_id = ?1 ORDER BY created_at ASC LIMIT ?2 OFFSET ?3",
        )
        .bind(incident_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;
        Ok((comments, count))
    }

    /// Find comment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comment WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(comment)
    }

    /// Create a comment authored by `author_id` on `incident_id`
    pub async fn create(
        &self,
        incident_id: &str,
        author_id: &str,
        data: CommentCreate,
    ) -> RepoResult<Comment> {
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            content: data.content,
            author_id: author_id.to_string(),
            incident_id: incident_id.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO comment (id, content, author_id, incident_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&comment.id)
        .bind(&comment.content)
        .bind(&comment.author_id)
        .bind(&comment.incident_id)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Hard delete a comment
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM comment WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
