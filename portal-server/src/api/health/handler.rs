//! Health Check Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 数据库是否可达
    database: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let database = match state.db.query("RETURN 1").await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            "error"
        }
    };

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    }))
}
