//! 用户审计模块
//!
//! # 架构
//!
//! ```text
//! 用户变更提交后
//!   └─ UserHooks::after_operation()
//!        ├─ 1. 变更邮件通知 (仅 update, best-effort)
//!        └─ 2. UserLogStorage::append() → SurrealDB (user_log 表, best-effort)
//! ```
//!
//! # 保证
//!
//! - **Append-only**: 存储层没有删除/更新接口，API 层对任何会话拒绝改写
//! - **Best-effort**: 两个动作各自包含失败，互不阻塞，绝不回传给调用方
//! - **顺序**: 通知先于日志写入；两者都发生在数据变更提交之后
//! - 每条 user_log 对应一次已完成的用户变更；没有日志行不代表变更失败

pub mod hook;
pub mod snapshot;
pub mod storage;
pub mod types;

pub use hook::UserHooks;
pub use snapshot::snapshot;
pub use storage::{UserLogStorage, UserLogStorageError};
pub use types::{UserLogEntry, UserLogListResponse, UserLogQuery, UserOperation};
