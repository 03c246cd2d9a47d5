//! # サーバーエラー定義
//!
//! サーバー固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `BadRequest` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `Conflict` | 409 Conflict |
//! | `SendFailed` | 502 Bad Gateway |
//! | `Store` / `Internal` | 500 Internal Server Error |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use cumpleflow_domain::{DomainError, notification::NotificationError};
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

/// サーバーで発生するエラー
#[derive(Debug, Error)]
pub enum ServerError {
   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 不正なリクエスト（バリデーションエラー）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 競合（メールアドレス重複、送信処理の二重起動）
   #[error("競合が発生しました: {0}")]
   Conflict(String),

   /// メール送信失敗（SMTP コラボレータ側の障害）
   #[error("メール送信に失敗しました: {0}")]
   SendFailed(String),

   /// ストア操作エラー
   #[error("ストア操作に失敗しました: {0}")]
   Store(#[from] cumpleflow_infra::InfraError),

   /// 内部エラー
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl From<DomainError> for ServerError {
   fn from(e: DomainError) -> Self {
      match e {
         DomainError::Validation(msg) => ServerError::BadRequest(msg),
         DomainError::NotFound { .. } => ServerError::NotFound(e.to_string()),
         DomainError::Conflict(msg) => ServerError::Conflict(msg),
      }
   }
}

impl From<NotificationError> for ServerError {
   fn from(e: NotificationError) -> Self {
      match e {
         NotificationError::SendFailed(msg) => ServerError::SendFailed(msg),
         NotificationError::TemplateFailed(msg) => ServerError::Internal(msg),
      }
   }
}

impl IntoResponse for ServerError {
   fn into_response(self) -> Response {
      let (status, error_type, title, detail) = match &self {
         ServerError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            "https://cumpleflow.example.com/errors/not-found",
            "Not Found",
            msg.clone(),
         ),
         ServerError::BadRequest(msg) => (
            StatusCode::BAD_REQUEST,
            "https://cumpleflow.example.com/errors/bad-request",
            "Bad Request",
            msg.clone(),
         ),
         ServerError::Conflict(msg) => (
            StatusCode::CONFLICT,
            "https://cumpleflow.example.com/errors/conflict",
            "Conflict",
            msg.clone(),
         ),
         ServerError::SendFailed(msg) => {
            tracing::warn!("メール送信エラー: {}", msg);
            (
               StatusCode::BAD_GATEWAY,
               "https://cumpleflow.example.com/errors/send-failed",
               "Bad Gateway",
               msg.clone(),
            )
         }
         ServerError::Store(e) => {
            tracing::error!("ストアエラー: {}", e);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               "https://cumpleflow.example.com/errors/internal-error",
               "Internal Server Error",
               "内部エラーが発生しました".to_string(),
            )
         }
         ServerError::Internal(msg) => {
            tracing::error!("内部エラー: {}", msg);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               "https://cumpleflow.example.com/errors/internal-error",
               "Internal Server Error",
               "内部エラーが発生しました".to_string(),
            )
         }
      };

      (
         status,
         Json(ErrorResponse {
            error_type: error_type.to_string(),
            title: title.to_string(),
            status: status.as_u16(),
            detail,
         }),
      )
         .into_response()
   }
}
