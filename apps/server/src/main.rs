//! # CumpleFlow サーバー
//!
//! 従業員の誕生日を追跡し、祝いメールを送る社内ツールのサーバー。
//!
//! ## 役割
//!
//! - **ストア永続化**: 単一 JSON ドキュメント（`data.json`）の読み書き
//! - **誕生日マッチング**: 本日分・直近分の算出（ダッシュボード API）
//! - **祝いメール送信**: 日次の定時トリガーと手動トリガー。
//!   送信済み判定により同日の重複送信を防ぐ
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CUMPLE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CUMPLE_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATA_FILE` | No | ストアファイルのパス（デフォルト: `data.json`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` または `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP リレー（デフォルト: `localhost:587`） |
//! | `SMTP_USER` / `SMTP_PASS` | No | SMTP 認証情報（未設定なら認証なし） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元メールアドレス |
//! | `NOTIFICATION_FROM_NAME` | No | 送信元表示名 |
//! | `DAILY_SEND_TIME` | No | 定時送信時刻 HH:MM（デフォルト: `12:00`） |
//! | `SEND_INTERVAL_MS` | No | 連続送信の間隔（デフォルト: `2000`） |
//! | `UPCOMING_WINDOW_DAYS` | No | 直近誕生日の日数窓（デフォルト: `7`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（メール送信なし）
//! cargo run -p cumpleflow-server
//!
//! # 本番環境
//! NOTIFICATION_BACKEND=smtp SMTP_HOST=mail.example.com \
//!     SMTP_USER=cumpleanos SMTP_PASS=... cargo run -p cumpleflow-server --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use cumpleflow_domain::clock::{Clock, SystemClock};
use cumpleflow_infra::{
   notification::{NoopNotificationSender, NotificationSender, SmtpNotificationSender},
   store::{JsonFileStoreRepository, StoreRepository},
};
use cumpleflow_server::{
   app_builder::build_app,
   config::AppConfig,
   scheduler,
   usecase::{GreetingTemplateRenderer, GreetingUseCaseImpl},
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,cumpleflow_server=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み
   let config = AppConfig::from_env();

   tracing::info!(
      "CumpleFlow サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // 依存コンポーネントを初期化
   let repository: Arc<dyn StoreRepository> =
      Arc::new(JsonFileStoreRepository::new(&config.data_file));
   tracing::info!(data_file = %config.data_file, "ストアファイルを使用");

   let sender: Arc<dyn NotificationSender> = match config.notification.backend.as_str() {
      "smtp" => {
         tracing::info!(
            host = %config.notification.smtp_host,
            port = config.notification.smtp_port,
            "SMTP バックエンドを使用"
         );
         Arc::new(SmtpNotificationSender::new(
            &config.notification.smtp_host,
            config.notification.smtp_port,
            config.notification.smtp_credentials(),
            config.notification.from_mailbox(),
         ))
      }
      "noop" => Arc::new(NoopNotificationSender),
      other => {
         tracing::warn!(backend = other, "未知の通知バックエンド。noop を使用");
         Arc::new(NoopNotificationSender)
      }
   };

   let renderer = GreetingTemplateRenderer::new()
      .map_err(|e| anyhow::anyhow!("テンプレートの初期化に失敗: {e}"))?;
   let clock: Arc<dyn Clock> = Arc::new(SystemClock);

   let greeting_usecase = Arc::new(GreetingUseCaseImpl::new(
      Arc::clone(&repository),
      sender,
      renderer,
      Arc::clone(&clock),
      config.schedule.send_interval,
   ));

   // 日次送信タスクを起動
   scheduler::spawn_daily_send(
      Arc::clone(&greeting_usecase),
      Arc::clone(&clock),
      config.schedule.daily_send_time,
   );
   tracing::info!(
      send_time = %config.schedule.daily_send_time,
      "日次の定時送信を予約"
   );

   // ルーター構築
   let app = build_app(
      repository,
      greeting_usecase,
      clock,
      config.schedule.upcoming_window_days,
   );

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("CumpleFlow サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
