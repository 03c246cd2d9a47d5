//! # 送信履歴ログ
//!
//! 送信試行と操作履歴を記録する追記専用のログと、
//! 「この従業員には今日すでに送信済みか」の判定を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`LogEntry`] | ログエントリ | 送信結果・操作履歴の 1 レコード |
//! | [`LogEntryKind`] | エントリ種別 | 3 種類: success / error / info |
//!
//! ## 設計方針
//!
//! - **追記専用**: 永続化されるログは切り詰めない。表示用の直近 50 件
//!   （[`LOG_DISPLAY_CAP`]）は [`recent`] が返すビューに過ぎない
//! - **重複送信判定は全履歴を走査**: 表示キャップで切り詰めたビューを
//!   判定に使うと、同日内のトリミングで送信済みを見落とす
//! - **失敗は送信済み扱いにしない**: `error` エントリの従業員は
//!   次のトリガーで再送対象に戻る

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::employee::EmployeeId;

/// 表示用アクティビティフィードの最大件数
///
/// 永続化されるログには適用しない（見た目だけのキャップ）。
pub const LOG_DISPLAY_CAP: usize = 50;

/// ログエントリ種別
///
/// ストアの `type` フィールドに格納される値。lowercase でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogEntryKind {
    /// メール送信成功。重複送信判定の根拠になる
    Success,
    /// メール送信失敗。判定には数えず、再送対象のまま残す
    Error,
    /// 操作履歴（従業員の追加・削除など）
    Info,
}

/// ログエントリ
///
/// ワイヤ形式（`type` / `employeeId` キー、RFC 3339 タイムスタンプ）への
/// 変換はインフラ層のレコード型が担う。
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp:   DateTime<Local>,
    pub message:     String,
    pub kind:        LogEntryKind,
    pub employee_id: Option<EmployeeId>,
}

impl LogEntry {
    /// 送信成功エントリを作成する
    pub fn success(
        timestamp: DateTime<Local>,
        message: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            kind: LogEntryKind::Success,
            employee_id: Some(employee_id),
        }
    }

    /// 送信失敗エントリを作成する
    pub fn error(
        timestamp: DateTime<Local>,
        message: impl Into<String>,
        employee_id: EmployeeId,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            kind: LogEntryKind::Error,
            employee_id: Some(employee_id),
        }
    }

    /// 操作履歴エントリを作成する
    pub fn info(
        timestamp: DateTime<Local>,
        message: impl Into<String>,
        employee_id: Option<EmployeeId>,
    ) -> Self {
        Self {
            timestamp,
            message: message.into(),
            kind: LogEntryKind::Info,
            employee_id,
        }
    }
}

/// 指定従業員に今日すでに送信済みか判定する
///
/// 「今日」はローカルの暦日で比較する（経過 24 時間ではない）。
/// `success` エントリのみが送信済みの根拠になる。
pub fn already_sent_today(logs: &[LogEntry], employee_id: EmployeeId, today: NaiveDate) -> bool {
    logs.iter().any(|entry| {
        entry.employee_id == Some(employee_id)
            && entry.kind == LogEntryKind::Success
            && entry.timestamp.date_naive() == today
    })
}

/// 今日の送信成功件数を数える（ダッシュボード統計用）
pub fn sent_today_count(logs: &[LogEntry], today: NaiveDate) -> usize {
    logs.iter()
        .filter(|entry| {
            entry.kind == LogEntryKind::Success && entry.timestamp.date_naive() == today
        })
        .count()
}

/// 表示用の直近エントリ（最大 [`LOG_DISPLAY_CAP`] 件）を返す
pub fn recent(logs: &[LogEntry]) -> &[LogEntry] {
    let start = logs.len().saturating_sub(LOG_DISPLAY_CAP);
    &logs[start..]
}
