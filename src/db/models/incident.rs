//! Incident Model
//!
//! 事件是核心工作项：状态/优先级/分类 + 所有者/指派人 + 解决时间戳。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::serde_helpers;
use crate::utils::AppError;

/// Incident lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
}

/// Incident priority
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum IncidentPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Incident category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum IncidentCategory {
    #[default]
    Bug,
    FeatureRequest,
    Question,
    Documentation,
}

/// Incident row
///
/// 不变式: `resolved_at` 非空 当且仅当 最近一次带 `status` 的更新把状态
/// 置为 `resolved`。创建时不打时间戳，哪怕创建即 resolved。
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: IncidentStatus,
    pub priority: IncidentPriority,
    pub category: IncidentCategory,
    pub owner_id: String,
    pub assignee_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Create incident payload. Unset lifecycle fields take the documented defaults.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IncidentCreate {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub status: Option<IncidentStatus>,
    pub priority: Option<IncidentPriority>,
    pub category: Option<IncidentCategory>,
    pub assignee_id: Option<Uuid>,
}

/// Partial update payload
///
/// 外层 Option 表示字段是否出现在载荷里；可空字段用双层 Option，
/// 显式 null 才会清空列。缺省字段一律不动。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentUpdate {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<IncidentStatus>,
    pub priority: Option<IncidentPriority>,
    pub category: Option<IncidentCategory>,
    #[serde(default, deserialize_with = "serde_helpers::double_option")]
    pub assignee_id: Option<Option<Uuid>>,
}

impl IncidentUpdate {
    /// Field-level bounds; enum membership is already enforced by serde.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title
            && (title.is_empty() || title.chars().count() > 255)
        {
            return Err(AppError::validation("title: length must be 1-255"));
        }
        if let Some(Some(description)) = &self.description
            && description.chars().count() > 255
        {
            return Err(AppError::validation("description: length must be at most 255"));
        }
        Ok(())
    }
}

/// Paginated incident listing
#[derive(Debug, Serialize)]
pub struct IncidentsPublic {
    pub data: Vec<Incident>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_absent_from_null() {
        let update: IncidentUpdate = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.description.is_none());
        assert!(update.assignee_id.is_none());

        let update: IncidentUpdate =
            serde_json::from_str(r#"{"description":null,"assignee_id":null}"#).unwrap();
        assert_eq!(update.description, Some(None));
        assert_eq!(update.assignee_id, Some(None));
    }

    #[test]
    fn update_rejects_bad_title() {
        let update = IncidentUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = IncidentUpdate {
            title: Some("x".repeat(256)),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = IncidentUpdate {
            title: Some("x".repeat(255)),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn enums_deserialize_snake_case() {
        let s: IncidentStatus = serde_json::from_str(r#""in_progress""#).unwrap();
        assert_eq!(s, IncidentStatus::InProgress);
        let c: IncidentCategory = serde_json::from_str(r#""feature_request""#).unwrap();
        assert_eq!(c, IncidentCategory::FeatureRequest);
        assert!(serde_json::from_str::<IncidentStatus>(r#""closed""#).is_err());
    }
}
