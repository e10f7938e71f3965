//! Data Models
//!
//! 每个实体一个文件：数据库行结构 + 创建/更新载荷 + 分页响应结构。

pub mod comment;
pub mod incident;
pub mod serde_helpers;
pub mod user;

pub use comment::{Comment, CommentCreate, CommentsPublic};
pub use incident::{
    Incident, IncidentCategory, IncidentCreate, IncidentPriority, IncidentStatus, IncidentUpdate,
    IncidentsPublic,
};
pub use user::{User, UserCreate};

use serde::Serialize;

/// Generic confirmation message returned by delete operations
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
