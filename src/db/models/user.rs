//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;

/// User row. `hashed_password` never leaves the server.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create user payload (superuser only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 255))]
    pub full_name: Option<String>,
    #[serde(default = "serde_helpers::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}
