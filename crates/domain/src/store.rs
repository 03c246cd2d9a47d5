//! # ストア（永続化単位）
//!
//! 従業員一覧とログ一覧を束ねた集約。毎回の操作で全体を読み込み、
//! 変更のたびに全体を書き戻す（単一ドキュメント永続化）。
//!
//! モジュールレベルの可変状態は持たず、各操作に明示的に渡す。

use crate::{
    activity_log::LogEntry,
    employee::{Email, Employee, EmployeeId},
};

/// 従業員とログを束ねた永続化単位
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub employees: Vec<Employee>,
    pub logs:      Vec<LogEntry>,
}

impl Store {
    /// 次に採番すべき従業員 ID を返す（現存する最大 ID + 1、最小 1）
    pub fn next_employee_id(&self) -> EmployeeId {
        let max = self
            .employees
            .iter()
            .map(|e| e.id().as_i64())
            .max()
            .unwrap_or(0);
        EmployeeId::new(max + 1)
    }

    /// ID で従業員を検索する
    pub fn find_employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    /// メールアドレスが登録済みか判定する（case-insensitive）
    pub fn email_registered(&self, email: &Email) -> bool {
        self.employees
            .iter()
            .any(|e| e.email().matches_ignore_case(email))
    }

    /// ID で従業員を削除し、削除した従業員を返す
    pub fn remove_employee(&mut self, id: EmployeeId) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| e.id() == id)?;
        Some(self.employees.remove(pos))
    }

    /// ログエントリを追記する
    pub fn push_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
    }
}
