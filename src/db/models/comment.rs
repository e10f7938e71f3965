//! Comment Model
//!
//! 评论除删除外不可变，没有更新载荷。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Comment row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author_id: String,
    pub incident_id: String,
    pub created_at: DateTime<Utc>,
}

/// Create comment payload. Author and incident come from the request context.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentCreate {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Paginated comment listing
#[derive(Debug, Serialize)]
pub struct CommentsPublic {
    pub data: Vec<Comment>,
    pub count: i64,
}
