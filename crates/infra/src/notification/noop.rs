//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! 開発環境や通知無効化時に使用する。

use async_trait::async_trait;
use cumpleflow_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok("noop".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_emailが固定のメッセージidを返す() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            to:        "test@example.com".to_string(),
            subject:   "テスト件名".to_string(),
            text_body: "テスト".to_string(),
        };

        let result = sender.send_email(&email).await;
        assert_eq!(result.unwrap(), "noop");
    }
}
