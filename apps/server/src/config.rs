//! # サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。

use std::{env, time::Duration};

use chrono::NaiveTime;

/// サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// ストアファイルのパス
    pub data_file: String,
    /// 通知設定
    pub notification: NotificationConfig,
    /// 送信スケジュール設定
    pub schedule: ScheduleConfig,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `smtp`: Mailpit（開発）/ 社内 SMTP リレー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド（"smtp" | "noop"）
    pub backend:       String,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:     String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:     u16,
    /// SMTP 認証ユーザー（リレーが要求する場合のみ）
    pub smtp_user:     Option<String>,
    /// SMTP 認証パスワード（リレーが要求する場合のみ）
    pub smtp_password: Option<String>,
    /// 送信元メールアドレス
    pub from_address:  String,
    /// 送信元表示名
    pub from_name:     String,
}

/// 送信スケジュールの設定
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// 日次の定時送信時刻（ローカル時刻）
    pub daily_send_time: NaiveTime,
    /// 連続送信の間に置く待機時間（SMTP レート制限対策）
    pub send_interval: Duration,
    /// ダッシュボードの「直近の誕生日」の日数窓
    pub upcoming_window_days: i64,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            host: env::var("CUMPLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("CUMPLE_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("CUMPLE_PORT は有効なポート番号である必要があります"),
            data_file: env::var("DATA_FILE").unwrap_or_else(|_| "data.json".to_string()),
            notification: NotificationConfig::from_env(),
            schedule: ScheduleConfig::from_env(),
        }
    }
}

impl NotificationConfig {
    /// 環境変数から通知設定を読み込む
    fn from_env() -> Self {
        Self {
            backend:       env::var("NOTIFICATION_BACKEND").unwrap_or_else(|_| "noop".to_string()),
            smtp_host:     env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port:     env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            smtp_user:     env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASS").ok(),
            from_address:  env::var("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|_| "cumpleanos@example.com".to_string()),
            from_name:     env::var("NOTIFICATION_FROM_NAME")
                .unwrap_or_else(|_| "Sistema de Cumpleaños".to_string()),
        }
    }

    /// 表示名付きの送信元（`"名前" <addr>` 形式）を返す
    pub fn from_mailbox(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.from_address)
    }

    /// SMTP 認証情報（ユーザー名・パスワードが両方ある場合のみ）
    pub fn smtp_credentials(&self) -> Option<(String, String)> {
        match (&self.smtp_user, &self.smtp_password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        }
    }
}

impl ScheduleConfig {
    /// 環境変数からスケジュール設定を読み込む
    fn from_env() -> Self {
        let daily_send_time = env::var("DAILY_SEND_TIME").unwrap_or_else(|_| "12:00".to_string());
        let send_interval_ms: u64 = env::var("SEND_INTERVAL_MS")
            .unwrap_or_else(|_| "2000".to_string())
            .parse()
            .expect("SEND_INTERVAL_MS は有効なミリ秒数である必要があります");

        Self {
            daily_send_time: NaiveTime::parse_from_str(&daily_send_time, "%H:%M")
                .expect("DAILY_SEND_TIME は HH:MM 形式である必要があります"),
            send_interval: Duration::from_millis(send_interval_ms),
            upcoming_window_days: env::var("UPCOMING_WINDOW_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .expect("UPCOMING_WINDOW_DAYS は有効な日数である必要があります"),
        }
    }
}
