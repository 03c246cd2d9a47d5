//! # 祝いメールテンプレートレンダラー
//!
//! tera テンプレートエンジンで祝いメールをプレーンテキストで生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `🎉 ¡Feliz Cumpleaños {名}!`（レガシーの文言を踏襲）
//! - **本文はスペイン語固定文**: 既存 UI の利用者向けの文面をそのまま使う

use cumpleflow_domain::{
    employee::Employee,
    notification::{EmailMessage, NotificationError},
};
use tera::{Context, Tera};

/// 祝いメールレンダラー
///
/// tera テンプレートエンジンをラップし、従業員から `EmailMessage` を生成する。
pub struct GreetingTemplateRenderer {
    engine: Tera,
}

impl GreetingTemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_template(
                "birthday.txt",
                include_str!("../../../templates/birthday.txt"),
            )
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 従業員から祝いメールを生成する
    pub fn render(&self, employee: &Employee) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("nombre", employee.name().as_str());

        let text_body = self
            .engine
            .render("birthday.txt", &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: employee.email().as_str().to_string(),
            subject: format!("🎉 ¡Feliz Cumpleaños {}!", employee.name().given_name()),
            text_body,
        })
    }
}
