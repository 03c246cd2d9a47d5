//! # 日次送信スケジューラ
//!
//! 設定された時刻（ローカル時刻）に 1 日 1 回、送信パスを起動する
//! バックグラウンドタスク。
//!
//! ## 設計方針
//!
//! - **サーバー側の単一トリガー**: クライアント側のポーリングに業務ロジックを
//!   持たせない。画面の更新は純粋な読み取り API で行う
//! - **sleep-until 方式**: 次回の発火時刻までスリープし、実行後に再計算する
//! - **DST・時計変更時の挙動は未定義**: パニックせず次の機会に倒すだけで、
//!   正確性は保証しない

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime};
use cumpleflow_domain::clock::Clock;

use crate::usecase::{GreetingUseCaseImpl, SendTrigger};

/// 次回の発火時刻を計算する
///
/// 今日の発火時刻がまだ来ていなければ今日、過ぎていれば明日。
fn next_fire_time(now: DateTime<Local>, send_time: NaiveTime) -> DateTime<Local> {
    let today_fire = now.date_naive().and_time(send_time);
    let fire = if today_fire <= now.naive_local() {
        today_fire + chrono::Duration::days(1)
    } else {
        today_fire
    };

    // DST 切替等でローカル時刻として存在しない場合は 1 時間後に倒す
    fire.and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| now + chrono::Duration::hours(1))
}

/// 日次送信タスクを起動する
///
/// 発火のたびに送信パス（[`GreetingUseCaseImpl::send_to_all_eligible`]）を
/// 実行する。手動トリガーと重なった場合は実行排他により競合エラーになるが、
/// 未送信分は翌日の発火で自然に回収される。
pub fn spawn_daily_send(
    usecase: Arc<GreetingUseCaseImpl>,
    clock: Arc<dyn Clock>,
    send_time: NaiveTime,
) {
    tokio::spawn(async move {
        loop {
            let now = clock.now();
            let next = next_fire_time(now, send_time);
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::info!(next_run = %next, "次回の定時送信を予約");

            tokio::time::sleep(wait).await;

            tracing::info!("定時送信を開始");
            match usecase.send_to_all_eligible(SendTrigger::Scheduled).await {
                Ok(summary) => tracing::info!(
                    matched = summary.matched,
                    sent = summary.sent,
                    failed = summary.failed,
                    skipped = summary.skipped,
                    "定時送信が完了"
                ),
                Err(e) => tracing::warn!(error = %e, "定時送信を実行できず"),
            }
        }
    });
}
