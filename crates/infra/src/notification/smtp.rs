//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use cumpleflow_domain::notification::{EmailMessage, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::NotificationSender;

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// Mailpit（開発）や社内 SMTP リレーで使用する。
pub struct SmtpNotificationSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit, 587 for リレー）
    /// - `credentials`: 認証情報（ユーザー名, パスワード）。リレーが要求する場合のみ
    /// - `from_address`: 送信元。表示名付きの `"名前 <addr>"` 形式も可
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<(String, String)>,
        from_address: String,
    ) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit・内部リレー向け）
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);

        if let Some((user, password)) = credentials {
            builder = builder.credentials(Credentials::new(user, password));
        }

        Self {
            transport: builder.build(),
            from_address,
        }
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError> {
        let message = Message::builder()
            .from(self.from_address.parse().map_err(|e| {
                NotificationError::SendFailed(format!("送信元アドレス不正: {e}"))
            })?)
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(email.text_body.clone()),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        // SMTP 応答テキスト（例: "2.0.0 Ok: queued as ..."）をメッセージ ID として返す
        let message_id = response.message().collect::<Vec<&str>>().join(" ");
        if message_id.is_empty() {
            Ok(response.code().to_string())
        } else {
            Ok(message_id)
        }
    }
}
