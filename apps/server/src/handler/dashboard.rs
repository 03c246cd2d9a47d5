//! # ダッシュボード API ハンドラ
//!
//! 画面表示用の読み取り専用ビューを返す。送信のトリガーにはならない。

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cumpleflow_infra::store::{EmployeeRecord, LogEntryRecord};
use serde::Serialize;

use crate::{error::ServerError, usecase::DashboardUseCaseImpl};

/// ダッシュボードハンドラーの State
pub struct DashboardState {
    pub usecase: DashboardUseCaseImpl,
}

/// ダッシュボード統計 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub total_employees: i64,
    pub birthdays_today: i64,
    pub sent_today:      i64,
}

/// 直近の誕生日 DTO
///
/// レガシー UI と同じく従業員フィールドに `daysUntil` を足した形で返す。
#[derive(Debug, Serialize)]
pub struct UpcomingDto {
    #[serde(flatten)]
    pub employee:   EmployeeRecord,
    #[serde(rename = "daysUntil")]
    pub days_until: i64,
}

/// ダッシュボード DTO
#[derive(Debug, Serialize)]
pub struct DashboardDto {
    pub stats:    DashboardStatsDto,
    pub today:    Vec<EmployeeRecord>,
    pub upcoming: Vec<UpcomingDto>,
    /// 直近のアクティビティフィード（最大 50 件）
    pub logs:     Vec<LogEntryRecord>,
}

/// ダッシュボードビューを取得する
///
/// ## エンドポイント
/// GET /api/dashboard
#[tracing::instrument(skip_all)]
pub async fn get_dashboard(
    State(state): State<Arc<DashboardState>>,
) -> Result<Response, ServerError> {
    let overview = state.usecase.get_overview().await?;

    let response = DashboardDto {
        stats:    DashboardStatsDto {
            total_employees: overview.stats.total_employees,
            birthdays_today: overview.stats.birthdays_today,
            sent_today:      overview.stats.sent_today,
        },
        today:    overview.today.iter().map(EmployeeRecord::from).collect(),
        upcoming: overview
            .upcoming
            .into_iter()
            .map(|u| UpcomingDto {
                employee:   EmployeeRecord::from(&u.employee),
                days_until: u.days_until,
            })
            .collect(),
        logs:     overview.recent_logs.iter().map(LogEntryRecord::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
