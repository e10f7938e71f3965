//! User Repository

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{RepoError, RepoResult};
use crate::auth::password;
use crate::db::models::{User, UserCreate};

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM user WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM user WHERE email = ?1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }

        let hashed_password = password::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email: data.email,
            hashed_password,
            is_active: data.is_active,
            is_superuser: data.is_superuser,
            full_name: data.full_name,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO user (id, email, hashed_password, is_active, is_superuser, full_name, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.is_active)
        .bind(user.is_superuser)
        .bind(&user.full_name)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Verify email/password credentials
    ///
    /// 查不到用户、哈希损坏或密码不符都返回 None，调用方给出统一错误，
    /// 避免邮箱枚举。
    pub async fn authenticate(&self, email: &str, pass: &str) -> RepoResult<Option<User>> {
        let Some(user) = self.find_by_email(email).await? else {
            return Ok(None);
        };

        match password::verify_password(&user.hashed_password, pass) {
            Ok(true) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    /// Hard delete a user
    ///
    /// Owned incidents (and their comments) go with the row via ON DELETE
    /// CASCADE; incidents merely assigned to the user get assignee_id nulled.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM user WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
