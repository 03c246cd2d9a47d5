//! # HTTP API の統合テスト
//!
//! モック（インメモリストア・モック送信器・固定時刻）を差し込んだ
//! 実ルーターに対してリクエストを流し、エンドポイントの契約を検証する。

use std::{sync::Arc, time::Duration};

use axum::{Router, body::Body};
use chrono::TimeZone;
use cumpleflow_domain::{
    activity_log::LogEntry,
    clock::FixedClock,
    employee::{BirthDate, Email, Employee, EmployeeId, EmployeeName},
    store::Store,
};
use cumpleflow_infra::mock::{MockNotificationSender, MockStoreRepository};
use cumpleflow_server::{
    app_builder::build_app,
    usecase::{GreetingTemplateRenderer, GreetingUseCaseImpl},
};
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

/// モックを差し込んだテスト用ルーターを構築する
///
/// 固定時刻は 2024-06-15（土曜・ローカル時刻）。
fn test_app(store: Store) -> (Router, MockStoreRepository, MockNotificationSender) {
    let repo = MockStoreRepository::with_store(store);
    let sender = MockNotificationSender::new();
    let clock = Arc::new(FixedClock::new(
        chrono::Local.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
    ));

    let greeting_usecase = Arc::new(GreetingUseCaseImpl::new(
        Arc::new(repo.clone()),
        Arc::new(sender.clone()),
        GreetingTemplateRenderer::new().unwrap(),
        clock.clone(),
        Duration::from_millis(0),
    ));

    let app = build_app(Arc::new(repo.clone()), greeting_usecase, clock, 7);
    (app, repo, sender)
}

fn ana() -> Employee {
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    Employee::new(
        EmployeeId::new(1),
        EmployeeName::new("Ana Lopez").unwrap(),
        Email::new("ana.lopez@example.com").unwrap(),
        BirthDate::new(chrono::NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(), today).unwrap(),
    )
}

fn store_with_ana() -> Store {
    let mut store = Store::default();
    store.employees.push(ana());
    store
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_ヘルスチェックが200を返す() {
    let (app, _, _) = test_app(Store::default());

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_dataはレガシー形状のドキュメントを返す() {
    let (app, _, _) = test_app(store_with_ana());

    let response = app.oneshot(get("/api/data")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "employees": [{
                "id": 1,
                "nombre": "Ana Lopez",
                "email": "ana.lopez@example.com",
                "fecha_nacimiento": "1990-06-15",
            }],
            "logs": [],
        })
    );
}

#[tokio::test]
async fn test_api_saveはストア全体を置き換える() {
    let (app, repo, _) = test_app(store_with_ana());

    let response = app
        .oneshot(post_json(
            "/api/save",
            serde_json::json!({ "employees": [], "logs": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "success": true }));
    assert_eq!(repo.snapshot(), Store::default());
}

#[tokio::test]
async fn test_従業員作成は201とレガシーキーのレコードを返す() {
    let (app, repo, _) = test_app(Store::default());

    let response = app
        .oneshot(post_json(
            "/api/employees",
            serde_json::json!({
                "nombre": "Ana Lopez",
                "email": "ana.lopez@example.com",
                "fecha_nacimiento": "1990-06-15",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["id"], serde_json::json!(1));
    assert_eq!(json["nombre"], serde_json::json!("Ana Lopez"));
    assert_eq!(repo.snapshot().employees.len(), 1);
}

#[tokio::test]
async fn test_未来の生年月日は400で拒否されストアは変更されない() {
    let (app, repo, _) = test_app(Store::default());

    let response = app
        .oneshot(post_json(
            "/api/employees",
            serde_json::json!({
                "nombre": "Ana Lopez",
                "email": "ana.lopez@example.com",
                // 固定時刻の「今日」は 2024-06-15
                "fecha_nacimiento": "2024-06-16",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["status"], serde_json::json!(400));
    assert!(json["detail"].as_str().unwrap().contains("生年月日"));
    assert_eq!(repo.snapshot(), Store::default());
}

#[tokio::test]
async fn test_重複メールアドレスは409で拒否される() {
    let (app, _, _) = test_app(store_with_ana());

    let response = app
        .oneshot(post_json(
            "/api/employees",
            serde_json::json!({
                "nombre": "Otra Persona",
                "email": "ANA.LOPEZ@EXAMPLE.COM",
                "fecha_nacimiento": "1985-01-01",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_従業員削除は成功レスポンスを返す() {
    let (app, repo, _) = test_app(store_with_ana());

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/employees/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(repo.snapshot().employees.is_empty());
}

#[tokio::test]
async fn test_単体送信は成功時にメッセージidを返す() {
    let (app, _, sender) = test_app(store_with_ana());

    let response = app
        .oneshot(post_json("/api/send-email", serde_json::json!({ "employeeId": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], serde_json::json!(true));
    assert_eq!(json["messageId"], serde_json::json!("mock-message-1"));
    assert_eq!(sender.sent_emails().len(), 1);
}

#[tokio::test]
async fn test_存在しない従業員への単体送信は404を返す() {
    let (app, _, _) = test_app(Store::default());

    let response = app
        .oneshot(post_json("/api/send-email", serde_json::json!({ "employeeId": 99 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_全員送信は送信済みを除外した実行結果を返す() {
    // Ana は送信済み、Elena は未送信
    let mut store = store_with_ana();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    store.employees.push(Employee::new(
        EmployeeId::new(2),
        EmployeeName::new("Elena Diaz").unwrap(),
        Email::new("elena.diaz@example.com").unwrap(),
        BirthDate::new(chrono::NaiveDate::from_ymd_opt(1975, 6, 15).unwrap(), today).unwrap(),
    ));
    store.push_log(LogEntry::success(
        chrono::Local.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
        "✅ Email enviado a Ana Lopez",
        EmployeeId::new(1),
    ));

    let (app, _, sender) = test_app(store);

    let response = app
        .oneshot(post_json("/api/send-all", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({
            "success": true,
            "matched": 2,
            "sent": 1,
            "failed": 0,
            "skipped": 1,
        })
    );

    let sent = sender.sent_emails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "elena.diaz@example.com");
}

#[tokio::test]
async fn test_ダッシュボードは統計と本日分と直近分を返す() {
    let (app, _, _) = test_app(store_with_ana());

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["stats"],
        serde_json::json!({
            "totalEmployees": 1,
            "birthdaysToday": 1,
            "sentToday": 0,
        })
    );
    assert_eq!(json["today"][0]["nombre"], serde_json::json!("Ana Lopez"));
    assert_eq!(json["upcoming"][0]["daysUntil"], serde_json::json!(0));
    assert_eq!(json["upcoming"][0]["nombre"], serde_json::json!("Ana Lopez"));
}
