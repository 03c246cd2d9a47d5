//! # 送信 API ハンドラ
//!
//! 祝いメールの手動トリガーを実装する。
//!
//! - 単体送信はレガシーの `/api/send-email` と同じ `{success, messageId}` を返す
//! - 全員送信は送信パスの実行結果サマリを返す

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cumpleflow_domain::employee::EmployeeId;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::ServerError,
    usecase::{GreetingUseCaseImpl, SendTrigger},
};

/// 送信ハンドラーの State
///
/// スケジューラと同じユースケースインスタンスを共有する
/// （実行排他ガードを 1 つにするため）。
pub struct SendState {
    pub usecase: Arc<GreetingUseCaseImpl>,
}

/// 単体送信リクエスト
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(rename = "employeeId")]
    pub employee_id: i64,
}

/// 全員送信のレスポンス
#[derive(Debug, Serialize)]
pub struct SendAllResponse {
    pub success: bool,
    pub matched: usize,
    pub sent:    usize,
    pub failed:  usize,
    pub skipped: usize,
}

/// 指定した従業員 1 人へ祝いメールを送る
///
/// ## エンドポイント
/// POST /api/send-email
#[tracing::instrument(skip_all)]
pub async fn send_email(
    State(state): State<Arc<SendState>>,
    Json(payload): Json<SendEmailRequest>,
) -> Result<Response, ServerError> {
    let message_id = state
        .usecase
        .send_to_employee(EmployeeId::new(payload.employee_id))
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "messageId": message_id })),
    )
        .into_response())
}

/// 本日が誕生日で未送信の全従業員へ祝いメールを送る
///
/// ## エンドポイント
/// POST /api/send-all
#[tracing::instrument(skip_all)]
pub async fn send_all(State(state): State<Arc<SendState>>) -> Result<Response, ServerError> {
    let summary = state.usecase.send_to_all_eligible(SendTrigger::Manual).await?;

    Ok((
        StatusCode::OK,
        Json(SendAllResponse {
            success: true,
            matched: summary.matched,
            sent:    summary.sent,
            failed:  summary.failed,
            skipped: summary.skipped,
        }),
    )
        .into_response())
}
