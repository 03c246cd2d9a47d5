//! # CumpleFlow ドメイン層
//!
//! 誕生日祝いメールシステムのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Employee）
//! - **値オブジェクト**: 生成時にバリデーションを実行する不変オブジェクト
//!   （例: Email, BirthDate）
//! - **純粋関数**: 誕生日マッチングと送信済み判定は入力だけで決まる純粋関数
//!   として定義し、IO を一切持たない
//!
//! ## 依存関係の方向
//!
//! ```text
//! server → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（ファイルストア、SMTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`activity_log`] - 送信履歴ログと同日重複送信の判定
//! - [`birthday`] - 誕生日マッチング（本日分・直近分）
//! - [`clock`] - テスト注入可能な時刻プロバイダ
//! - [`employee`] - 従業員エンティティと値オブジェクト
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`notification`] - メールメッセージと通知エラー
//! - [`store`] - 従業員・ログを束ねる永続化単位

pub mod activity_log;
pub mod birthday;
pub mod clock;
pub mod employee;
pub mod error;
pub mod notification;
pub mod store;

pub use error::DomainError;
