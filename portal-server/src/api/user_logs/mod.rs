//! User Log API Module
//!
//! user_log 表是 append-only 的：查询仅对 `is_admin` 会话开放，
//! 改写路由保留注册但恒定返回 403，使不可变契约成为 API 表面的一部分。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// User log router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/user-logs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list)).route(
        "/{id}",
        axum::routing::put(handler::reject_mutation).delete(handler::reject_mutation),
    )
}
