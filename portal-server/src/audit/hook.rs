//! 用户操作钩子
//!
//! 在每次用户 create/update/delete 提交后调用一次。两个动作独立包含
//! 失败，互不阻塞：
//!
//! 1. update 时向用户邮箱投递"账户已更新"通知（失败仅记日志）
//! 2. 向 user_log 追加审计行（失败仅记日志）
//!
//! 数据变更在钩子运行前已经提交，钩子无法阻止或回滚变更。

use std::sync::Arc;

use super::snapshot::snapshot;
use super::storage::UserLogStorage;
use super::types::UserOperation;
use crate::db::models::User;
use crate::notify::Mailer;

const UPDATE_MAIL_SUBJECT: &str = "Your Account Was Updated";

/// 用户变更钩子
pub struct UserHooks {
    mailer: Arc<dyn Mailer>,
    logs: UserLogStorage,
}

impl UserHooks {
    pub fn new(mailer: Arc<dyn Mailer>, logs: UserLogStorage) -> Self {
        Self { mailer, logs }
    }

    /// 在一次用户变更提交后调用
    ///
    /// - `item`: 变更后的记录（delete 后为 None）
    /// - `original_item`: 变更前的记录（create 前为 None）
    pub async fn after_operation(
        &self,
        operation: UserOperation,
        item: Option<&User>,
        original_item: Option<&User>,
    ) {
        // 1. 通知（仅 update，先于日志写入）
        if operation == UserOperation::Update
            && let Some(item) = item
        {
            let body = format!("<p>Hi {}, your account has been updated.</p>", item.name);
            if let Err(e) = self
                .mailer
                .send(&item.email, UPDATE_MAIL_SUBJECT, &body)
                .await
            {
                tracing::warn!(email = %item.email, error = %e, "Failed to send update email");
            }
        }

        // 2. 审计日志追加
        // 用户引用：变更后的 id，delete 时回退到变更前的 id
        let user_ref = item
            .and_then(|i| i.id.as_ref())
            .or_else(|| original_item.and_then(|i| i.id.as_ref()))
            .map(|id| id.to_string());

        let Some(user_ref) = user_ref else {
            tracing::warn!(%operation, "Skipping user log append: no record id available");
            return;
        };

        let before = original_item.map(snapshot);
        let after = item.map(snapshot);

        if let Err(e) = self.logs.append(user_ref, operation, before, after).await {
            tracing::error!(%operation, error = %e, "Failed to log user operation");
        }
    }
}
