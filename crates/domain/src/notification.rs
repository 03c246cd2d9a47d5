//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: 送信の具体的な方法はインフラ層の
//!   `NotificationSender` trait が担い、ここではメッセージとエラーのみ定義する
//! - **プレーンテキストのみ**: レガシーシステムの祝いメールはテキストメール
//!   だったため、HTML 本文は持たない

use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。`NotificationSender` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}
