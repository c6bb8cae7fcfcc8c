use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::audit::{UserHooks, UserLogStorage};
use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::{HttpMailer, Mailer};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是门户后台的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | mailer | Arc<dyn Mailer> | 邮件投递 |
/// | user_logs | UserLogStorage | 用户日志存储 (append-only) |
/// | hooks | Arc<UserHooks> | 用户变更钩子 (邮件 + 审计) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 邮件投递服务
    pub mailer: Arc<dyn Mailer>,
    /// 用户日志存储
    pub user_logs: UserLogStorage,
    /// 用户变更钩子
    pub hooks: Arc<UserHooks>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/portal.db)
    /// 3. 各服务 (JWT, Mailer, UserLogStorage, UserHooks)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        let db_path = config.database_dir().join("portal.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        // 2. Initialize Services
        let jwt_service = Arc::new(JwtService::default());
        let mailer: Arc<dyn Mailer> = Arc::new(HttpMailer::new(config.mail.clone()));
        let user_logs = UserLogStorage::new(db.clone());
        let hooks = Arc::new(UserHooks::new(mailer.clone(), user_logs.clone()));

        Self {
            config: config.clone(),
            db,
            jwt_service,
            mailer,
            user_logs,
            hooks,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取用户变更钩子
    pub fn get_hooks(&self) -> Arc<UserHooks> {
        self.hooks.clone()
    }
}
