//! Campus Portal Server - 校园门户管理后台
//!
//! # 架构概述
//!
//! 本模块是 Portal Server 的主入口，提供以下核心功能：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储（用户与用户日志）
//! - **认证** (`auth`): JWT + Argon2 认证体系，访问策略评估
//! - **审计** (`audit`): 用户变更审计日志 + 变更通知钩子
//! - **通知** (`notify`): 账户变更邮件投递
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! portal-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、访问策略
//! ├── db/            # 数据库层（模型与仓储）
//! ├── audit/         # 用户日志存储与操作钩子
//! ├── notify/        # 邮件通知
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在加载配置之前调用。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 不存在不是错误（生产环境直接使用环境变量）
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____             __        __
   / __ \____  _____/ /_____ _/ /
  / /_/ / __ \/ ___/ __/ __ `/ /
 / ____/ /_/ / /  / /_/ /_/ / /
/_/    \____/_/   \__/\__,_/_/
    "#
    );
}
