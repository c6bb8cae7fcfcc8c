//! 通知模块
//!
//! 账户变更邮件投递。

pub mod mailer;

pub use mailer::{HttpMailer, MailConfig, MailError, Mailer};
