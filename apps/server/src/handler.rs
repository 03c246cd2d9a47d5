//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲

pub mod dashboard;
pub mod employee;
pub mod health;
pub mod send;
pub mod store;

pub use dashboard::{DashboardState, get_dashboard};
pub use employee::{EmployeeState, create_employee, delete_employee};
pub use health::health_check;
pub use send::{SendState, send_all, send_email};
pub use store::{StoreState, get_data, save_data};
