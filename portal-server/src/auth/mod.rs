//! 认证授权模块
//!
//! 提供 JWT 认证、访问策略和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`policy`] - 访问策略评估（纯函数）

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod policy;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use policy::QueryScope;
