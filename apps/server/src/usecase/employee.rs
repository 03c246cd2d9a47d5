//! 従業員管理ユースケース

use std::sync::Arc;

use chrono::NaiveDate;
use cumpleflow_domain::{
    activity_log::LogEntry,
    clock::Clock,
    employee::{BirthDate, Email, Employee, EmployeeId, EmployeeName},
};
use cumpleflow_infra::store::StoreRepository;

use crate::error::ServerError;

/// 従業員作成の入力
pub struct CreateEmployeeInput {
    pub name:       String,
    pub email:      String,
    pub birth_date: NaiveDate,
}

/// 従業員管理ユースケース
pub struct EmployeeUseCaseImpl {
    repository: Arc<dyn StoreRepository>,
    clock:      Arc<dyn Clock>,
}

impl EmployeeUseCaseImpl {
    pub fn new(repository: Arc<dyn StoreRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 従業員を作成する
    ///
    /// 1. 値オブジェクトのバリデーション（名前・メール形式・未来日でない生年月日）
    /// 2. メールアドレスの重複チェック（case-insensitive）
    /// 3. ID 採番（現存する最大 ID + 1）
    /// 4. ストアへ追加し、操作履歴を残して書き戻す
    ///
    /// バリデーションに失敗した場合、ストアは一切変更されない。
    #[tracing::instrument(skip_all)]
    pub async fn create_employee(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<Employee, ServerError> {
        let name = EmployeeName::new(input.name)?;
        let email = Email::new(input.email)?;
        let birth_date = BirthDate::new(input.birth_date, self.clock.today())?;

        let mut store = self.repository.load().await?;

        // メールアドレスの重複チェック
        if store.email_registered(&email) {
            return Err(ServerError::Conflict(
                "このメールアドレスは既に使用されています".to_string(),
            ));
        }

        let employee = Employee::new(store.next_employee_id(), name, email, birth_date);

        store.employees.push(employee.clone());
        store.push_log(LogEntry::info(
            self.clock.now(),
            format!("👥 {} agregado al sistema", employee.name()),
            Some(employee.id()),
        ));
        self.repository.replace(&store).await?;

        tracing::info!(employee_id = %employee.id(), "従業員を登録");
        Ok(employee)
    }

    /// 従業員を ID 指定で削除する
    #[tracing::instrument(skip_all)]
    pub async fn delete_employee(&self, id: EmployeeId) -> Result<Employee, ServerError> {
        let mut store = self.repository.load().await?;

        let Some(removed) = store.remove_employee(id) else {
            return Err(ServerError::NotFound(format!(
                "従業員が見つかりません: {id}"
            )));
        };

        // レガシーの削除ログは employeeId を持たない
        store.push_log(LogEntry::info(
            self.clock.now(),
            format!("🗑️ {} eliminado", removed.name()),
            None,
        ));
        self.repository.replace(&store).await?;

        tracing::info!(employee_id = %id, "従業員を削除");
        Ok(removed)
    }
}
