//! 核心模块
//!
//! 配置、服务器状态和 HTTP 服务器。

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
