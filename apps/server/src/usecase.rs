//! # ユースケース
//!
//! サーバーのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - ハンドラは薄く保ち、ストア操作とドメインロジックの組み合わせは
//!   ユースケース層に集約する
//! - リポジトリ・送信器・時刻は trait オブジェクトで注入し、
//!   テストではインメモリモックに差し替える

pub mod dashboard;
pub mod employee;
pub mod greeting;

pub use dashboard::{DashboardOverview, DashboardStats, DashboardUseCaseImpl, UpcomingEntry};
pub use employee::{CreateEmployeeInput, EmployeeUseCaseImpl};
pub use greeting::{GreetingTemplateRenderer, GreetingUseCaseImpl, SendRunSummary, SendTrigger};
