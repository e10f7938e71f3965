//! 集成测试公共设施
//!
//! 通过 [`OneshotRouter`] 直接调用完整的应用 (含中间件)，不经过网络栈。
//! 每个 TestContext 使用独立的临时工作目录和数据库文件。

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;

use incident_server::api::{self, OneshotRouter};
use incident_server::core::{Config, ServerState};
use incident_server::db::models::{User, UserCreate};
use incident_server::db::repository::UserRepository;

/// 所有测试用户的统一密码
pub const TEST_PASSWORD: &str = "test-password-123";

pub struct TestContext {
    pub state: ServerState,
    app: Router<ServerState>,
    // 析构时清理数据库文件
    _tmp: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
        // 超级用户由各测试显式播种，不走启动引导
        config.first_superuser = None;
        config.first_superuser_password = None;

        let state = ServerState::initialize(&config).await.unwrap();
        let app = api::build_app(&state);

        Self {
            state,
            app,
            _tmp: tmp,
        }
    }

    /// 播种一个激活用户并签发其令牌
    pub async fn seed_user(&self, email: &str, is_superuser: bool) -> (User, String) {
        let repo = UserRepository::new(self.state.db.pool.clone());
        let user = repo
            .create(UserCreate {
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                full_name: None,
                is_active: true,
                is_superuser,
            })
            .await
            .unwrap();
        let token = self
            .state
            .jwt_service
            .generate_token(&user.id, &user.email)
            .unwrap();
        (user, token)
    }

    /// 播种一个停用用户
    pub async fn seed_inactive_user(&self, email: &str) -> (User, String) {
        let repo = UserRepository::new(self.state.db.pool.clone());
        let user = repo
            .create(UserCreate {
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                full_name: None,
                is_active: false,
                is_superuser: false,
            })
            .await
            .unwrap();
        let token = self
            .state
            .jwt_service
            .generate_token(&user.id, &user.email)
            .unwrap();
        (user, token)
    }

    /// 发送请求并返回 (状态码, JSON 响应体)
    ///
    /// 非 JSON 响应体 (如 axum 的载荷拒绝) 以字符串形式返回。
    pub async fn request(
        &mut self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let state = self.state.clone();
        let response = self.app.oneshot(&state, request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&mut self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request("GET", path, Some(token), None).await
    }

    pub async fn post(&mut self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", path, Some(token), Some(body)).await
    }

    pub async fn put(&mut self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", path, Some(token), Some(body)).await
    }

    pub async fn delete(&mut self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request("DELETE", path, Some(token), None).await
    }
}

/// 创建一个事件并返回其 id
pub async fn create_incident(ctx: &mut TestContext, token: &str, body: Value) -> String {
    let (status, json) = ctx.post("/api/incidents", token, body).await;
    assert_eq!(status, StatusCode::OK, "incident creation failed: {json}");
    json["id"].as_str().unwrap().to_string()
}

/// 在事件下创建一条评论并返回其 id
pub async fn create_comment(
    ctx: &mut TestContext,
    token: &str,
    incident_id: &str,
    content: &str,
) -> String {
    let (status, json) = ctx
        .post(
            &format!("/api/incidents/{incident_id}/comments"),
            token,
            serde_json::json!({ "content": content }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "comment creation failed: {json}");
    json["id"].as_str().unwrap().to_string()
}
