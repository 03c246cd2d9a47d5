//! # アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//! テストはこのビルダーでモックを差し込んだルーターを組み立てる。

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use cumpleflow_domain::clock::Clock;
use cumpleflow_infra::store::StoreRepository;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        DashboardState,
        EmployeeState,
        SendState,
        StoreState,
        create_employee,
        delete_employee,
        get_dashboard,
        get_data,
        health_check,
        save_data,
        send_all,
        send_email,
    },
    usecase::{DashboardUseCaseImpl, EmployeeUseCaseImpl, GreetingUseCaseImpl},
};

/// ルーターを構築する
///
/// レガシー UI が呼ぶ `/api/data` `/api/save` `/api/send-email` に加え、
/// サーバー側バリデーション付きの従業員 API と読み取り専用の
/// ダッシュボード API を提供する。UI はブラウザから直接呼ぶため
/// CORS は全許可にしている。
pub fn build_app(
    repository: Arc<dyn StoreRepository>,
    greeting_usecase: Arc<GreetingUseCaseImpl>,
    clock: Arc<dyn Clock>,
    upcoming_window_days: i64,
) -> Router {
    let store_state = Arc::new(StoreState {
        repository: Arc::clone(&repository),
    });

    let employee_state = Arc::new(EmployeeState {
        usecase: EmployeeUseCaseImpl::new(Arc::clone(&repository), Arc::clone(&clock)),
    });

    let dashboard_state = Arc::new(DashboardState {
        usecase: DashboardUseCaseImpl::new(repository, clock, upcoming_window_days),
    });

    let send_state = Arc::new(SendState {
        usecase: greeting_usecase,
    });

    Router::new()
        .route("/health", get(health_check))
        // ストア API（レガシー互換）
        .route("/api/data", get(get_data))
        .route("/api/save", post(save_data))
        .with_state(store_state)
        // 従業員 API
        .route("/api/employees", post(create_employee))
        .route("/api/employees/{id}", delete(delete_employee))
        .with_state(employee_state)
        // ダッシュボード API（純粋な読み取り）
        .route("/api/dashboard", get(get_dashboard))
        .with_state(dashboard_state)
        // 送信 API
        .route("/api/send-email", post(send_email))
        .route("/api/send-all", post(send_all))
        .with_state(send_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
