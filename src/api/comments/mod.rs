//! Comment API 模块
//!
//! 所有路由都挂在父事件之下，先过事件的所有权检查。

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    // 与 incidents 路由共享 "/api/incidents/{id}" 前缀，参数名必须一致
    Router::new().nest("/api/incidents/{id}/comments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{comment_id}", delete(handler::delete))
}
