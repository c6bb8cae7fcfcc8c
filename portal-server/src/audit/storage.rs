//! 用户日志 SurrealDB 存储层
//!
//! Append-only 设计，没有任何删除/更新接口。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use super::types::{UserLogEntry, UserLogQuery, UserOperation};
use shared::util::now_millis;

/// 存储错误
#[derive(Debug, Error)]
pub enum UserLogStorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<surrealdb::Error> for UserLogStorageError {
    fn from(err: surrealdb::Error) -> Self {
        UserLogStorageError::Database(err.to_string())
    }
}

pub type UserLogResult<T> = Result<T, UserLogStorageError>;

/// 插入用结构（不含 SurrealDB record id）
#[derive(Debug, serde::Serialize)]
struct UserLogInsert {
    user: String,
    operation: UserOperation,
    before: Option<serde_json::Value>,
    after: Option<serde_json::Value>,
    timestamp: i64,
}

/// 用户日志存储 (SurrealDB)
///
/// 仅提供 `append` 和 `query`；改写路径在类型层面就不存在。
#[derive(Clone)]
pub struct UserLogStorage {
    db: Surreal<Db>,
}

impl UserLogStorage {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    /// 追加一条用户日志
    pub async fn append(
        &self,
        user: String,
        operation: UserOperation,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> UserLogResult<UserLogEntry> {
        let insert = UserLogInsert {
            user,
            operation,
            before,
            after,
            timestamp: now_millis(),
        };

        let mut result = self
            .db
            .query("CREATE user_log CONTENT $entry RETURN AFTER")
            .bind(("entry", insert))
            .await?;

        let created: Option<UserLogEntry> = result.take(0)?;
        created.ok_or_else(|| UserLogStorageError::Database("Failed to append user log".to_string()))
    }

    /// 查询用户日志（按时间倒序，支持过滤和分页）
    ///
    /// 嵌入式引擎上 WHERE + ORDER BY DESC + LIMIT 组合会丢首行，
    /// 分页在内存中完成。
    pub async fn query(&self, query: &UserLogQuery) -> UserLogResult<(Vec<UserLogEntry>, u64)> {
        let mut conditions: Vec<&str> = Vec::new();
        if query.from.is_some() {
            conditions.push("timestamp >= $from");
        }
        if query.to.is_some() {
            conditions.push("timestamp <= $to");
        }
        if query.operation.is_some() {
            conditions.push("operation = $operation");
        }
        if query.user.is_some() {
            conditions.push("user = $user");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let select = format!("SELECT * FROM user_log{where_clause} ORDER BY timestamp DESC");

        let mut result = self
            .db
            .query(select)
            .bind(("from", query.from))
            .bind(("to", query.to))
            .bind(("operation", query.operation))
            .bind(("user", query.user.clone()))
            .await?;

        let all: Vec<UserLogEntry> = result.take(0)?;
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        Ok((items, total))
    }
}
