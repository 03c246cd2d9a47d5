//! 祝いメール送信ユースケース
//!
//! 1 回の送信パスは「本日分の抽出 → 送信済みの除外 → 逐次送信 → ログ記録」。
//!
//! ## 設計方針
//!
//! - **実行排他**: 定時トリガーと手動トリガーが重なっても、同時に動く
//!   送信パスは 1 つだけ（`try_lock` で後着を 409 にする）
//! - **逐次送信**: SMTP レート制限を尊重し、送信のたびに固定の待機時間を
//!   置く。並列送信はしない
//! - **ベストエフォート**: 1 人への送信失敗は `error` ログに残して次の
//!   候補へ進む。失敗分は次の定時/手動トリガーで自然に再試行される
//! - **at-least-once**: 送信成功とログ永続化の間でクラッシュすると翌パスで
//!   重複送信になりうる（許容済みの既知の性質）

mod template_renderer;

use std::{sync::Arc, time::Duration};

use cumpleflow_domain::{
    activity_log::{LogEntry, already_sent_today},
    birthday::todays_birthdays,
    clock::Clock,
    employee::{Employee, EmployeeId, EmployeeName},
    store::Store,
};
use cumpleflow_infra::{notification::NotificationSender, store::StoreRepository};
pub use template_renderer::GreetingTemplateRenderer;
use tokio::sync::Mutex;

use crate::error::ServerError;

/// 送信パスのトリガー種別
///
/// ログに残すメッセージの文言だけが異なる（レガシーのフィード文言を踏襲）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendTrigger {
    /// 手動トリガー（「全員に送信」ボタン）
    Manual,
    /// 日次の定時トリガー
    Scheduled,
}

impl SendTrigger {
    fn success_message(self, name: &EmployeeName) -> String {
        match self {
            SendTrigger::Manual => format!("✅ Email enviado a {name}"),
            SendTrigger::Scheduled => format!("✅ Email enviado automáticamente a {name}"),
        }
    }
}

/// 送信パスの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendRunSummary {
    /// 本日が誕生日の従業員数
    pub matched: usize,
    /// このパスで送信に成功した数
    pub sent:    usize,
    /// このパスで送信に失敗した数
    pub failed:  usize,
    /// 送信済みのため除外した数
    pub skipped: usize,
}

/// 祝いメール送信ユースケース
pub struct GreetingUseCaseImpl {
    repository:    Arc<dyn StoreRepository>,
    sender:        Arc<dyn NotificationSender>,
    renderer:      GreetingTemplateRenderer,
    clock:         Arc<dyn Clock>,
    send_interval: Duration,
    run_guard:     Mutex<()>,
}

impl GreetingUseCaseImpl {
    pub fn new(
        repository: Arc<dyn StoreRepository>,
        sender: Arc<dyn NotificationSender>,
        renderer: GreetingTemplateRenderer,
        clock: Arc<dyn Clock>,
        send_interval: Duration,
    ) -> Self {
        Self {
            repository,
            sender,
            renderer,
            clock,
            send_interval,
            run_guard: Mutex::new(()),
        }
    }

    /// 本日が誕生日で未送信の全従業員へ祝いメールを送る（1 送信パス）
    ///
    /// パスの流れ: 抽出 → 未送信なしなら即終了 → 逐次送信。
    /// 各送信の結果はログに追記し、その都度ストアを書き戻す。
    #[tracing::instrument(skip_all, fields(trigger = ?trigger))]
    pub async fn send_to_all_eligible(
        &self,
        trigger: SendTrigger,
    ) -> Result<SendRunSummary, ServerError> {
        // 実行排他: 先行パスの完了前に届いたトリガーは受け付けない
        let Ok(_guard) = self.run_guard.try_lock() else {
            return Err(ServerError::Conflict(
                "送信処理が既に実行中です".to_string(),
            ));
        };

        let today = self.clock.today();
        let mut store = self.repository.load().await?;

        let matched: Vec<Employee> = todays_birthdays(&store.employees, today)
            .into_iter()
            .cloned()
            .collect();
        let unsent: Vec<Employee> = matched
            .iter()
            .filter(|e| !already_sent_today(&store.logs, e.id(), today))
            .cloned()
            .collect();

        let mut summary = SendRunSummary {
            matched: matched.len(),
            sent:    0,
            failed:  0,
            skipped: matched.len() - unsent.len(),
        };

        if unsent.is_empty() {
            tracing::info!(matched = summary.matched, "未送信の誕生日なし");
            return Ok(summary);
        }

        tracing::info!(count = unsent.len(), "祝いメールの送信を開始");

        for (i, employee) in unsent.iter().enumerate() {
            match self.deliver(employee).await {
                Ok(message_id) => {
                    tracing::info!(
                        employee_id = %employee.id(),
                        message_id = %message_id,
                        "祝いメールを送信"
                    );
                    store.push_log(LogEntry::success(
                        self.clock.now(),
                        trigger.success_message(employee.name()),
                        employee.id(),
                    ));
                    summary.sent += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        employee_id = %employee.id(),
                        error = %e,
                        "祝いメールの送信に失敗"
                    );
                    store.push_log(LogEntry::error(
                        self.clock.now(),
                        format!("❌ Error enviando a {}", employee.name()),
                        employee.id(),
                    ));
                    summary.failed += 1;
                }
            }
            self.repository.replace(&store).await?;

            if i + 1 < unsent.len() {
                tokio::time::sleep(self.send_interval).await;
            }
        }

        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "送信パスが完了"
        );
        Ok(summary)
    }

    /// 指定した従業員 1 人へ祝いメールを送る（手動・テスト送信）
    ///
    /// 送信済み判定は適用しない（レガシーの手動送信と同じ挙動）。
    /// 成功時はプロバイダのメッセージ ID を返す。
    #[tracing::instrument(skip_all, fields(employee_id = %id))]
    pub async fn send_to_employee(&self, id: EmployeeId) -> Result<String, ServerError> {
        let mut store = self.repository.load().await?;

        let Some(employee) = store.find_employee(id).cloned() else {
            return Err(ServerError::NotFound(format!(
                "従業員が見つかりません: {id}"
            )));
        };

        match self.deliver(&employee).await {
            Ok(message_id) => {
                store.push_log(LogEntry::success(
                    self.clock.now(),
                    SendTrigger::Manual.success_message(employee.name()),
                    employee.id(),
                ));
                self.record(&store).await;
                Ok(message_id)
            }
            Err(e) => {
                store.push_log(LogEntry::error(
                    self.clock.now(),
                    format!("❌ Error enviando a {}", employee.name()),
                    employee.id(),
                ));
                self.record(&store).await;
                Err(e)
            }
        }
    }

    /// テンプレートをレンダリングして送信する
    async fn deliver(&self, employee: &Employee) -> Result<String, ServerError> {
        let email = self.renderer.render(employee)?;
        let message_id = self.sender.send_email(&email).await?;
        Ok(message_id)
    }

    /// 送信結果のログを書き戻す。ログ記録の失敗で送信結果は覆さない
    async fn record(&self, store: &Store) {
        if let Err(e) = self.repository.replace(store).await {
            tracing::error!(error = %e, "送信ログの記録に失敗");
        }
    }
}
