//! # CumpleFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **ストア永続化**: 単一 JSON ドキュメント（`data.json`）の読み書き
//! - **メール送信**: SMTP / Noop バックエンドの実装
//! - **テスト用モック**: `test-utils` feature でインメモリ実装を公開
//!
//! ## 依存関係
//!
//! ```text
//! server → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信バックエンド
//! - [`store`] - ストアリポジトリ（JSON ファイル実装）

pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod store;

pub use error::InfraError;
