//! Current-user resolution
//!
//! Custom extractor that validates the Bearer JWT and resolves the acting
//! user against the database, so deactivation takes effect immediately.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{JwtError, JwtService};
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::security_log;

/// 当前用户上下文
///
/// 认证守卫解析后的操作者；所有权/超级用户检查都基于它。
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
        }
    }
}

/// Validate a bearer token and load the matching user row
///
/// | 失败 | 响应 |
/// |------|------|
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
/// | 用户不存在 | 404 "User not found" |
/// | 用户被停用 | 403 "Inactive user" |
pub(crate) async fn resolve_current_user(
    state: &ServerState,
    token: &str,
) -> Result<CurrentUser, AppError> {
    let claims = state
        .get_jwt_service()
        .validate_token(token)
        .map_err(|e| match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        })?;

    let repo = UserRepository::new(state.db.pool.clone());
    let user = repo
        .find_by_id(&claims.sub)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if !user.is_active {
        return Err(AppError::forbidden("Inactive user"));
    }

    Ok(CurrentUser::from(user))
}

/// JWT Auth Extractor
///
/// Use this extractor in protected handlers to automatically validate JWT
/// and extract CurrentUser
impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        let user = resolve_current_user(state, token).await?;

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
