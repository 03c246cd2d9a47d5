//! ダッシュボードユースケース
//!
//! 画面表示用の読み取り専用ビューを組み立てる。送信をトリガーすることはない
//! （クライアント側のポーリングは純粋な読み取りに置き換えられている）。

use std::sync::Arc;

use cumpleflow_domain::{
    activity_log::{self, LogEntry},
    birthday::{todays_birthdays, upcoming_birthdays},
    clock::Clock,
    employee::Employee,
};
use cumpleflow_infra::store::StoreRepository;

use crate::error::ServerError;

/// ダッシュボード統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_employees: i64,
    pub birthdays_today: i64,
    pub sent_today:      i64,
}

/// 直近の誕生日（所有版）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEntry {
    pub employee:   Employee,
    pub days_until: i64,
}

/// ダッシュボードビュー
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOverview {
    pub stats:       DashboardStats,
    pub today:       Vec<Employee>,
    pub upcoming:    Vec<UpcomingEntry>,
    /// 直近のアクティビティフィード（最大 50 件）
    pub recent_logs: Vec<LogEntry>,
}

/// ダッシュボードユースケース
pub struct DashboardUseCaseImpl {
    repository:  Arc<dyn StoreRepository>,
    clock:       Arc<dyn Clock>,
    window_days: i64,
}

impl DashboardUseCaseImpl {
    pub fn new(repository: Arc<dyn StoreRepository>, clock: Arc<dyn Clock>, window_days: i64) -> Self {
        Self {
            repository,
            clock,
            window_days,
        }
    }

    /// ダッシュボードビューを取得する
    #[tracing::instrument(skip_all)]
    pub async fn get_overview(&self) -> Result<DashboardOverview, ServerError> {
        let store = self.repository.load().await?;
        let today = self.clock.today();

        let today_matches: Vec<Employee> = todays_birthdays(&store.employees, today)
            .into_iter()
            .cloned()
            .collect();

        let upcoming: Vec<UpcomingEntry> =
            upcoming_birthdays(&store.employees, today, self.window_days)
                .into_iter()
                .map(|u| UpcomingEntry {
                    employee:   u.employee.clone(),
                    days_until: u.days_until,
                })
                .collect();

        let stats = DashboardStats {
            total_employees: store.employees.len() as i64,
            birthdays_today: today_matches.len() as i64,
            sent_today:      activity_log::sent_today_count(&store.logs, today) as i64,
        };

        Ok(DashboardOverview {
            stats,
            today: today_matches,
            upcoming,
            recent_logs: activity_log::recent(&store.logs).to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};
    use cumpleflow_domain::{
        activity_log::LogEntry,
        clock::FixedClock,
        employee::{BirthDate, Email, EmployeeId, EmployeeName},
        store::Store,
    };
    use cumpleflow_infra::mock::MockStoreRepository;
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: i64, name: &str, birth: NaiveDate) -> Employee {
        Employee::new(
            EmployeeId::new(id),
            EmployeeName::new(name).unwrap(),
            Email::new(format!("user{id}@example.com")).unwrap(),
            BirthDate::new(birth, date(2100, 1, 1)).unwrap(),
        )
    }

    fn make_usecase(store: Store) -> DashboardUseCaseImpl {
        let clock = FixedClock::new(chrono::Local.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap());
        DashboardUseCaseImpl::new(
            Arc::new(MockStoreRepository::with_store(store)),
            Arc::new(clock),
            7,
        )
    }

    #[tokio::test]
    async fn test_ビューは統計と本日分と直近分を含む() {
        let mut store = Store::default();
        store.employees.push(employee(1, "Ana Lopez", date(1990, 6, 15)));
        store.employees.push(employee(2, "Carlos Ruiz", date(1988, 6, 20)));
        store.employees.push(employee(3, "Elena Diaz", date(1975, 12, 1)));
        store.push_log(LogEntry::success(
            chrono::Local.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
            "✅ Email enviado a Ana Lopez",
            EmployeeId::new(1),
        ));

        let overview = make_usecase(store).get_overview().await.unwrap();

        assert_eq!(
            overview.stats,
            DashboardStats {
                total_employees: 3,
                birthdays_today: 1,
                sent_today:      1,
            }
        );
        assert_eq!(overview.today.len(), 1);
        assert_eq!(overview.today[0].id(), EmployeeId::new(1));

        // 直近分は残り日数の昇順（本日 0 日 → 5 日後）、12 月は窓の外
        let days: Vec<i64> = overview.upcoming.iter().map(|u| u.days_until).collect();
        assert_eq!(days, vec![0, 5]);
        assert_eq!(overview.recent_logs.len(), 1);
    }

    #[tokio::test]
    async fn test_空のストアでは全て空() {
        let overview = make_usecase(Store::default()).get_overview().await.unwrap();

        assert_eq!(overview.stats.total_employees, 0);
        assert!(overview.today.is_empty());
        assert!(overview.upcoming.is_empty());
        assert!(overview.recent_logs.is_empty());
    }
}
