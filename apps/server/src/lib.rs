//! # CumpleFlow サーバーライブラリ
//!
//! 誕生日祝いメールサーバーのコアモジュール。
//! テストからルーター構築を再利用できるようライブラリとして公開する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI（State）の初期化とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: HTTP レスポンスへ変換されるサーバーエラー
//! - `handler`: HTTP ハンドラ
//! - `scheduler`: 日次送信トリガー
//! - `usecase`: ユースケース（従業員管理・ダッシュボード・祝いメール送信）

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod scheduler;
pub mod usecase;
