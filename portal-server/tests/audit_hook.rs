//! Audit/notification hook integration tests.
//!
//! The hook's contract: notification first, audit append second, each
//! failure contained. Exercised over a tempfile-backed database with
//! recording/failing mailer doubles.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use portal_server::audit::{UserHooks, UserLogQuery, UserLogStorage, UserOperation};
use portal_server::db::DbService;
use portal_server::db::models::{User, UserRole};
use portal_server::notify::{MailError, Mailer};

/// Records every send attempt; delivery outcome is configurable.
struct MailerDouble {
    sent: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

impl MailerDouble {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    fn attempts(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MailerDouble {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), html.to_string()));
        if self.fail {
            Err(MailError::Status(502))
        } else {
            Ok(())
        }
    }
}

struct Fixture {
    hooks: UserHooks,
    logs: UserLogStorage,
    mailer: Arc<MailerDouble>,
    _tmp: tempfile::TempDir,
}

async fn fixture(mailer: Arc<MailerDouble>) -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let db_path = tmp.path().join("portal.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let logs = UserLogStorage::new(service.db);
    let hooks = UserHooks::new(mailer.clone(), logs.clone());
    Fixture {
        hooks,
        logs,
        mailer,
        _tmp: tmp,
    }
}

fn user(id: &str, name: &str, email: &str) -> User {
    User {
        id: Some(id.parse().unwrap()),
        name: name.to_string(),
        email: email.to_string(),
        hash_pass: "$argon2$secret".to_string(),
        role: UserRole::Student,
        is_admin: false,
        is_active: true,
        created_at: 1,
        last_login_date: 1,
    }
}

#[tokio::test]
async fn update_sends_notification_with_name_in_body() {
    let fx = fixture(MailerDouble::ok()).await;
    let before = user("user:jane", "Jane", "a@b.com");
    let mut after = before.clone();
    after.name = "Jane Doe".to_string();

    fx.hooks
        .after_operation(UserOperation::Update, Some(&after), Some(&before))
        .await;

    let attempts = fx.mailer.attempts();
    assert_eq!(attempts.len(), 1);
    let (to, subject, html) = &attempts[0];
    assert_eq!(to, "a@b.com");
    assert_eq!(subject, "Your Account Was Updated");
    assert!(html.contains("Jane"));
}

#[tokio::test]
async fn failed_notification_does_not_block_audit_append() {
    let fx = fixture(MailerDouble::failing()).await;
    let before = user("user:jane", "Jane", "a@b.com");

    fx.hooks
        .after_operation(UserOperation::Update, Some(&before), Some(&before))
        .await;

    // 邮件尝试过且失败
    assert_eq!(fx.mailer.attempts().len(), 1);

    // 日志仍然被写入
    let (items, total) = fx.logs.query(&UserLogQuery::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].operation, UserOperation::Update);
    assert_eq!(items[0].user, "user:jane");
}

#[tokio::test]
async fn create_appends_log_without_notification() {
    let fx = fixture(MailerDouble::ok()).await;
    let created = user("user:bob", "Bob", "bob@example.edu");

    fx.hooks
        .after_operation(UserOperation::Create, Some(&created), None)
        .await;

    assert!(fx.mailer.attempts().is_empty()); // 仅 update 发邮件

    let (items, _) = fx.logs.query(&UserLogQuery::default()).await.unwrap();
    assert_eq!(items.len(), 1);
    let entry = &items[0];
    assert_eq!(entry.operation, UserOperation::Create);
    assert!(entry.before.is_none());
    let after = entry.after.as_ref().unwrap();
    assert_eq!(after["email"], "bob@example.edu");
    assert!(after.get("hash_pass").is_none()); // 快照不含密码哈希
}

#[tokio::test]
async fn delete_falls_back_to_original_item_id() {
    let fx = fixture(MailerDouble::ok()).await;
    let original = user("user:42", "Gone", "gone@example.edu");

    // delete 之后 item 不存在，只有变更前的记录
    fx.hooks
        .after_operation(UserOperation::Delete, None, Some(&original))
        .await;

    let (items, _) = fx.logs.query(&UserLogQuery::default()).await.unwrap();
    assert_eq!(items.len(), 1);
    let entry = &items[0];
    assert_eq!(entry.user, "user:42");
    assert_eq!(entry.operation, UserOperation::Delete);
    assert!(entry.after.is_none());
    assert_eq!(entry.before.as_ref().unwrap()["name"], "Gone");
    assert!(entry.timestamp > 0);
}

#[tokio::test]
async fn missing_ids_skip_append_without_error() {
    let fx = fixture(MailerDouble::ok()).await;
    let mut unsaved = user("user:x", "X", "x@example.edu");
    unsaved.id = None;

    fx.hooks
        .after_operation(UserOperation::Delete, None, Some(&unsaved))
        .await;

    let (_, total) = fx.logs.query(&UserLogQuery::default()).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn query_filters_by_operation_and_user() {
    let fx = fixture(MailerDouble::ok()).await;
    let jane = user("user:jane", "Jane", "a@b.com");
    let bob = user("user:bob", "Bob", "bob@example.edu");

    fx.hooks
        .after_operation(UserOperation::Create, Some(&jane), None)
        .await;
    fx.hooks
        .after_operation(UserOperation::Create, Some(&bob), None)
        .await;
    fx.hooks
        .after_operation(UserOperation::Update, Some(&jane), Some(&jane))
        .await;

    let (all, total) = fx.logs.query(&UserLogQuery::default()).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(all.len(), 3);

    let creates_only = UserLogQuery {
        operation: Some(UserOperation::Create),
        ..Default::default()
    };
    let (items, total) = fx.logs.query(&creates_only).await.unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|e| e.operation == UserOperation::Create));

    let jane_only = UserLogQuery {
        user: Some("user:jane".to_string()),
        ..Default::default()
    };
    let (items, total) = fx.logs.query(&jane_only).await.unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|e| e.user == "user:jane"));
}
