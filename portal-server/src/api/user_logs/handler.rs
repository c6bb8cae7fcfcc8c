//! User Log API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::audit::{UserLogListResponse, UserLogQuery};
use crate::auth::{CurrentUser, policy};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/user-logs — 查询用户日志（仅 is_admin 会话）
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<UserLogQuery>,
) -> AppResult<Json<UserLogListResponse>> {
    if !policy::can_query_logs(Some(&user)) {
        return Err(AppError::forbidden(
            "Only admin sessions may read user logs".to_string(),
        ));
    }

    let (items, total) = state
        .user_logs
        .query(&query)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(UserLogListResponse { items, total }))
}

/// PUT/DELETE /api/user-logs/{id} — 恒定拒绝
///
/// 策略对任何会话都返回 false；路由保留注册，让不可变契约可被测试。
pub async fn reject_mutation(
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<()>> {
    // 始终为 false，包括 is_admin 会话
    if !policy::can_mutate_logs(Some(&user)) {
        tracing::warn!(actor = %user.id, log_id = %id, "Rejected user log mutation attempt");
        return Err(AppError::forbidden(
            "User log entries are immutable".to_string(),
        ));
    }

    Ok(Json(()))
}
