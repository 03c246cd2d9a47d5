//! # ストア API ハンドラ
//!
//! レガシー UI が使う「全体取得」「全体置換」のエンドポイント。
//! ドキュメント形状（`employees` / `logs`、`nombre` 等のキー）は
//! 既存クライアントとの互換のためそのまま維持する。

use std::sync::Arc;

use axum::{Json, extract::State};
use cumpleflow_domain::store::Store;
use cumpleflow_infra::store::{StoreDocument, StoreRepository};
use serde_json::{Value, json};

use crate::error::ServerError;

/// ストアハンドラーの State
pub struct StoreState {
    pub repository: Arc<dyn StoreRepository>,
}

/// ストア全体を取得する
///
/// ## エンドポイント
/// GET /api/data
#[tracing::instrument(skip_all)]
pub async fn get_data(
    State(state): State<Arc<StoreState>>,
) -> Result<Json<StoreDocument>, ServerError> {
    let store = state.repository.load().await?;
    Ok(Json(StoreDocument::from(&store)))
}

/// ストア全体を置き換える
///
/// ## エンドポイント
/// POST /api/save
#[tracing::instrument(skip_all)]
pub async fn save_data(
    State(state): State<Arc<StoreState>>,
    Json(document): Json<StoreDocument>,
) -> Result<Json<Value>, ServerError> {
    state.repository.replace(&Store::from(document)).await?;
    Ok(Json(json!({ "success": true })))
}
