//! 审计日志类型定义

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::db::models::serde_helpers;

/// 用户操作类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserOperation {
    /// 用户创建
    Create,
    /// 用户更新
    Update,
    /// 用户删除
    Delete,
}

impl std::fmt::Display for UserOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UserOperation::Create => "create",
            UserOperation::Update => "update",
            UserOperation::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// 用户日志条目（不可变）
///
/// 每条对应一次已完成的用户变更。`before`/`after` 为变更前后的
/// 序列化快照（密码哈希已剥离），delete 后 `after` 为空，
/// create 前 `before` 为空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogEntry {
    /// 记录 ID
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// 关联用户 ("user:xxx")
    pub user: String,
    /// 操作类型
    pub operation: UserOperation,
    /// 变更前快照
    pub before: Option<serde_json::Value>,
    /// 变更后快照
    pub after: Option<serde_json::Value>,
    /// 时间戳（Unix 毫秒）
    pub timestamp: i64,
}

/// 用户日志查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct UserLogQuery {
    /// 起始时间（Unix 毫秒，含）
    pub from: Option<i64>,
    /// 截止时间（Unix 毫秒，含）
    pub to: Option<i64>,
    /// 操作类型过滤
    pub operation: Option<UserOperation>,
    /// 用户过滤 ("user:xxx")
    pub user: Option<String>,
    /// 分页偏移
    #[serde(default)]
    pub offset: usize,
    /// 分页大小（默认 50）
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for UserLogQuery {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            operation: None,
            user: None,
            offset: 0,
            limit: default_limit(),
        }
    }
}

/// 用户日志列表响应
#[derive(Debug, Serialize)]
pub struct UserLogListResponse {
    pub items: Vec<UserLogEntry>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserOperation::Create).unwrap(),
            "\"create\""
        );
        let op: UserOperation = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(op, UserOperation::Delete);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(UserOperation::Update.to_string(), "update");
    }
}
