//! User API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// User router
///
/// 访问控制由处理器内的策略评估完成（update 允许学生改自己的记录，
/// 无法用纯中间件表达），路由层不再附加权限中间件。
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
