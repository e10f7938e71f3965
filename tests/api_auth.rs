//! 认证与用户接口集成测试

mod common;

use http::StatusCode;
use serde_json::json;

use common::{TEST_PASSWORD, TestContext};

#[tokio::test]
async fn health_check_is_public() {
    let mut ctx = TestContext::new().await;

    let (status, json) = ctx.request("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let mut ctx = TestContext::new().await;
    ctx.seed_user("alice@example.com", false).await;

    let (status, json) = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": TEST_PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token_type"], "bearer");
    let token = json["access_token"].as_str().unwrap().to_string();

    // 签发的令牌可以直接访问受保护接口
    let (status, json) = ctx.get("/api/users/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "alice@example.com");
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let mut ctx = TestContext::new().await;
    ctx.seed_user("alice@example.com", false).await;

    // 密码错误与邮箱不存在返回同一条消息，防止枚举
    let (status, json) = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email or password");

    let (status, json) = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email or password");
}

#[tokio::test]
async fn login_rejects_inactive_user() {
    let mut ctx = TestContext::new().await;
    ctx.seed_inactive_user("ghost@example.com").await;

    let (status, json) = ctx
        .request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Inactive user");
}

#[tokio::test]
async fn protected_routes_require_token() {
    let mut ctx = TestContext::new().await;

    let (status, _) = ctx.request("GET", "/api/incidents", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx
        .request("GET", "/api/incidents", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn inactive_user_token_is_rejected() {
    let mut ctx = TestContext::new().await;
    let (_, token) = ctx.seed_inactive_user("ghost@example.com").await;

    let (status, json) = ctx.get("/api/incidents", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Inactive user");
}

#[tokio::test]
async fn me_never_exposes_password_hash() {
    let mut ctx = TestContext::new().await;
    let (user, token) = ctx.seed_user("alice@example.com", false).await;

    let (status, json) = ctx.get("/api/users/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], user.id);
    assert!(json.get("hashed_password").is_none());
}
