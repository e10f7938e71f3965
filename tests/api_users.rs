//! 用户管理接口集成测试

mod common;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{TEST_PASSWORD, TestContext, create_comment, create_incident};

#[tokio::test]
async fn user_creation_is_superuser_only() {
    let mut ctx = TestContext::new().await;
    let (_, alice) = ctx.seed_user("alice@example.com", false).await;
    let (_, admin) = ctx.seed_user("admin@example.com", true).await;

    let payload = json!({ "email": "new@example.com", "password": TEST_PASSWORD });

    let (status, json) = ctx.post("/api/users", &alice, payload.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Not enough permissions");

    let (status, json) = ctx.post("/api/users", &admin, payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "new@example.com");
    assert_eq!(json["is_active"], true);
    assert_eq!(json["is_superuser"], false);
    assert!(json.get("hashed_password").is_none());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let mut ctx = TestContext::new().await;
    let (_, admin) = ctx.seed_user("admin@example.com", true).await;
    ctx.seed_user("taken@example.com", false).await;

    let (status, _) = ctx
        .post(
            "/api/users",
            &admin,
            json!({ "email": "taken@example.com", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_creation_validates_payload() {
    let mut ctx = TestContext::new().await;
    let (_, admin) = ctx.seed_user("admin@example.com", true).await;

    let (status, _) = ctx
        .post(
            "/api/users",
            &admin,
            json!({ "email": "not-an-email", "password": TEST_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = ctx
        .post(
            "/api/users",
            &admin,
            json!({ "email": "short@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn user_deletion_is_superuser_only() {
    let mut ctx = TestContext::new().await;
    let (_, alice) = ctx.seed_user("alice@example.com", false).await;
    let (bob, _) = ctx.seed_user("bob@example.com", false).await;

    let (status, _) = ctx.delete(&format!("/api/users/{}", bob.id), &alice).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, admin) = ctx.seed_user("admin@example.com", true).await;
    let (status, _) = ctx
        .delete(&format!("/api/users/{}", Uuid::new_v4()), &admin)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn superuser_cannot_delete_self() {
    let mut ctx = TestContext::new().await;
    let (admin, token) = ctx.seed_user("admin@example.com", true).await;

    let (status, json) = ctx.delete(&format!("/api/users/{}", admin.id), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        json["message"],
        "Super users are not allowed to delete themselves"
    );
}

#[tokio::test]
async fn deleting_user_cascades_ownership_but_keeps_assignments() {
    let mut ctx = TestContext::new().await;
    let (bob, bob_token) = ctx.seed_user("bob@example.com", false).await;
    let (_, admin_token) = ctx.seed_user("admin@example.com", true).await;

    // bob 拥有一个事件；另一个事件仅指派给 bob
    let owned = create_incident(&mut ctx, &bob_token, json!({ "title": "Owned by bob" })).await;
    let assigned = create_incident(
        &mut ctx,
        &admin_token,
        json!({ "title": "Assigned to bob", "assignee_id": bob.id }),
    )
    .await;
    // bob 在自己将被删除前留下的评论也应随之消失
    create_comment(&mut ctx, &bob_token, &assigned, "on it").await;

    let (status, json) = ctx
        .delete(&format!("/api/users/{}", bob.id), &admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "User deleted successfully");

    // 名下事件级联删除
    let (status, _) = ctx.get(&format!("/api/incidents/{owned}"), &admin_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 仅被指派的事件保留，指派人清空
    let (status, json) = ctx
        .get(&format!("/api/incidents/{assigned}"), &admin_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["assignee_id"].is_null());

    // 被删用户的评论一并清除
    let (_, json) = ctx
        .get(&format!("/api/incidents/{assigned}/comments"), &admin_token)
        .await;
    assert_eq!(json["count"], 0);
}
