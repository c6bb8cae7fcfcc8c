//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`users`] - 用户管理接口
//! - [`user_logs`] - 用户日志查询接口 (append-only)

pub mod auth;
pub mod health;
pub mod user_logs;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
