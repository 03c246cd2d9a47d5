//! # 従業員 API ハンドラ
//!
//! 従業員の作成・削除エンドポイントを実装する。
//! バリデーション（必須項目・メール形式・未来日・メール重複）は
//! ユースケース層で行い、失敗時はストアを変更せずに 400/409 を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use cumpleflow_domain::employee::EmployeeId;
use cumpleflow_infra::store::EmployeeRecord;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::ServerError,
    usecase::{CreateEmployeeInput, EmployeeUseCaseImpl},
};

/// 従業員ハンドラーの State
pub struct EmployeeState {
    pub usecase: EmployeeUseCaseImpl,
}

/// 従業員作成リクエスト
///
/// フォームのフィールド名（レガシーのワイヤキー）をそのまま受ける。
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub nombre: String,
    pub email: String,
    pub fecha_nacimiento: NaiveDate,
}

/// 従業員を作成する
///
/// ## エンドポイント
/// POST /api/employees
#[tracing::instrument(skip_all)]
pub async fn create_employee(
    State(state): State<Arc<EmployeeState>>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<Response, ServerError> {
    let employee = state
        .usecase
        .create_employee(CreateEmployeeInput {
            name:       payload.nombre,
            email:      payload.email,
            birth_date: payload.fecha_nacimiento,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(EmployeeRecord::from(&employee))).into_response())
}

/// 従業員を ID 指定で削除する
///
/// ## エンドポイント
/// DELETE /api/employees/{id}
#[tracing::instrument(skip_all)]
pub async fn delete_employee(
    State(state): State<Arc<EmployeeState>>,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    state.usecase.delete_employee(EmployeeId::new(id)).await?;

    Ok((StatusCode::OK, Json(json!({ "success": true }))).into_response())
}
