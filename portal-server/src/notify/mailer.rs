//! 邮件投递
//!
//! 通过 HTTP 邮件 API 投递通知。投递方以 [`Mailer`] trait 注入，
//! 钩子与测试不关心具体实现。

use async_trait::async_trait;
use thiserror::Error;

/// 投递错误
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Mail API returned status {0}")]
    Status(u16),
}

/// 邮件投递服务
#[async_trait]
pub trait Mailer: Send + Sync {
    /// 投递一封 HTML 邮件
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError>;
}

/// 邮件配置
///
/// | 环境变量 | 说明 |
/// |----------|------|
/// | MAIL_API_URL | 邮件投递 API 地址（未设置时投递为空操作） |
/// | MAIL_API_KEY | Bearer 密钥 |
/// | MAIL_FROM | 发件人地址 |
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub from: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MAIL_API_URL").ok(),
            api_key: std::env::var("MAIL_API_KEY").ok(),
            from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@portal.local".to_string()),
        }
    }
}

/// HTTP 邮件 API 投递实现
///
/// POST `{from, to, subject, html}` JSON 到配置的地址。
/// 未配置 MAIL_API_URL 时投递为空操作（开发环境无需邮件服务商）。
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        let Some(api_url) = &self.config.api_url else {
            tracing::debug!(to = %to, subject = %subject, "Mail delivery disabled, skipping");
            return Ok(());
        };

        let payload = serde_json::json!({
            "from": self.config.from,
            "to": to,
            "subject": subject,
            "html": html,
        });

        let mut request = self.client.post(api_url).json(&payload);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| MailError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MailError::Status(resp.status().as_u16()));
        }

        tracing::debug!(to = %to, subject = %subject, "Mail delivered");
        Ok(())
    }
}
