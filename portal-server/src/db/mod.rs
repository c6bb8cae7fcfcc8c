//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDB 引擎) 初始化与 schema 定义。

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database and apply schema definitions.
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("portal")
            .use_db("portal")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database ready (SurrealDB embedded, RocksDB engine)");

        Ok(Self { db })
    }

    /// Apply schema definitions (idempotent).
    ///
    /// - `user.email` carries a unique index; repositories still check for
    ///   duplicates first to return a friendly conflict error.
    /// - `user_log` is append-only at the application layer: the storage
    ///   type exposes no update/delete and the API denies both outright.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query("DEFINE INDEX IF NOT EXISTS user_email_idx ON TABLE user FIELDS email UNIQUE")
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        Ok(())
    }
}
