//! # 誕生日マッチング
//!
//! 「今日が誕生日の従業員」と「直近 N 日以内に誕生日を迎える従業員」を
//! 求める純粋関数を定義する。
//!
//! ## 設計方針
//!
//! - **年は無視**: マッチングは誕生日の月日成分と「今日」の月日の比較で決まる
//! - **閏日ポリシー**: 2/29 生まれは平年では 2/28 に祝う。
//!   素朴な月日比較では平年に一度も祝われないため、祝う日を
//!   [`celebration_date_in`] で明示的に定義する
//! - **純粋関数**: 時刻取得は呼び出し元の責務（[`crate::clock::Clock`] で注入）

use chrono::{Datelike, NaiveDate};

use crate::employee::{BirthDate, Employee};

/// 指定した年における「誕生日を祝う日」を返す
///
/// 通常は誕生日と同じ月日。2/29 生まれで `year` が平年の場合のみ 2/28 になる。
pub fn celebration_date_in(year: i32, birth_date: BirthDate) -> NaiveDate {
    let birth = birth_date.as_date();
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day()).unwrap_or_else(|| {
        // 年によって存在しない月日は 2/29 のみ
        NaiveDate::from_ymd_opt(year, 2, 28).expect("2/28 はどの年にも存在する")
    })
}

/// 今日以降で最も近い「誕生日を祝う日」を返す
///
/// 今年の祝う日が既に過ぎている場合は翌年の祝う日に繰り越す。
/// 今日当日は「過ぎていない」扱い。
pub fn next_celebration_date(birth_date: BirthDate, today: NaiveDate) -> NaiveDate {
    let this_year = celebration_date_in(today.year(), birth_date);
    if this_year >= today {
        this_year
    } else {
        celebration_date_in(today.year() + 1, birth_date)
    }
}

/// 今日が誕生日の従業員を返す
///
/// 生まれ年は一切考慮しない。
pub fn todays_birthdays(employees: &[Employee], today: NaiveDate) -> Vec<&Employee> {
    employees
        .iter()
        .filter(|e| celebration_date_in(today.year(), e.birth_date()) == today)
        .collect()
}

/// 直近の誕生日（従業員と残り日数の組）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday<'a> {
    pub employee:   &'a Employee,
    /// 今日から祝う日までの日数（今日なら 0）
    pub days_until: i64,
}

/// `window_days` 日以内に誕生日を迎える従業員を残り日数の昇順で返す
///
/// 今日当日（残り 0 日）も含む。残り日数が同じ場合は従業員 ID の昇順。
pub fn upcoming_birthdays(
    employees: &[Employee],
    today: NaiveDate,
    window_days: i64,
) -> Vec<UpcomingBirthday<'_>> {
    let mut upcoming: Vec<UpcomingBirthday<'_>> = employees
        .iter()
        .map(|e| UpcomingBirthday {
            employee:   e,
            days_until: (next_celebration_date(e.birth_date(), today) - today).num_days(),
        })
        .filter(|u| u.days_until <= window_days)
        .collect();

    upcoming.sort_by_key(|u| (u.days_until, u.employee.id()));
    upcoming
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::employee::{Email, EmployeeId, EmployeeName};

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

    // celebration_date_in のテスト

    #[rstest]
    #[case(date(1990, 6, 15), 2024, date(2024, 6, 15))]
    #[case(date(2000, 2, 29), 2024, date(2024, 2, 29))] // 閏年はそのまま
    #[case(date(2000, 2, 29), 2023, date(2023, 2, 28))] // 平年は 2/28
    fn test_祝う日は閏日ポリシーを適用する(
        #[case] birth: NaiveDate,
        #[case] year: i32,
        #[case] expected: NaiveDate,
    ) {
        let birth_date = BirthDate::new(birth, date(2100, 1, 1)).unwrap();
        assert_eq!(celebration_date_in(year, birth_date), expected);
    }

    // todays_birthdays のテスト

    #[test]
    fn test_月日が一致する従業員だけを返す() {
        let employees = vec![
            employee(1, "Ana Lopez", date(1990, 6, 15)),
            employee(2, "Carlos Ruiz", date(1988, 6, 20)),
            employee(3, "Elena Diaz", date(1975, 6, 15)),
        ];

        let matched = todays_birthdays(&employees, date(2024, 6, 15));

        let ids: Vec<i64> = matched.iter().map(|e| e.id().as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_生まれ年は考慮しない() {
        let employees = vec![employee(1, "Ana Lopez", date(1990, 6, 15))];

        // 生まれ年と違う年でもマッチする
        assert_eq!(todays_birthdays(&employees, date(2024, 6, 15)).len(), 1);
        assert_eq!(todays_birthdays(&employees, date(1990, 6, 15)).len(), 1);
    }

    #[test]
    fn test_該当なしの場合は空を返す() {
        let employees = vec![employee(1, "Ana Lopez", date(1990, 6, 15))];

        assert!(todays_birthdays(&employees, date(2024, 6, 14)).is_empty());
    }

    #[rstest]
    #[case(date(2024, 2, 29), 1, "閏年は 2/29 にマッチ")]
    #[case(date(2023, 2, 28), 1, "平年は 2/28 にマッチ")]
    fn test_閏日生まれの従業員のマッチング(
        #[case] today: NaiveDate,
        #[case] expected: usize,
        #[case] _reason: &str,
    ) {
        let employees = vec![employee(1, "Mario Vega", date(2000, 2, 29))];

        assert_eq!(todays_birthdays(&employees, today).len(), expected);
    }

    #[test]
    fn test_閏日生まれは平年の3月1日にはマッチしない() {
        let employees = vec![employee(1, "Mario Vega", date(2000, 2, 29))];

        assert!(todays_birthdays(&employees, date(2023, 3, 1)).is_empty());
    }

    // upcoming_birthdays のテスト

    #[test]
    fn test_残り日数を計算して窓内の従業員を返す() {
        let employees = vec![employee(1, "Carlos Ruiz", date(1988, 6, 20))];

        let upcoming = upcoming_birthdays(&employees, date(2024, 6, 15), 7);

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].days_until, 5);
        assert_eq!(upcoming[0].employee.id(), EmployeeId::new(1));
    }

    #[test]
    fn test_窓の外の従業員は含まない() {
        let employees = vec![
            employee(1, "Carlos Ruiz", date(1988, 6, 20)), // 残り 5 日
            employee(2, "Elena Diaz", date(1975, 6, 23)),  // 残り 8 日
        ];

        let upcoming = upcoming_birthdays(&employees, date(2024, 6, 15), 7);

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].employee.id(), EmployeeId::new(1));
    }

    #[test]
    fn test_今日当日は残り0日として含む() {
        let employees = vec![employee(1, "Ana Lopez", date(1990, 6, 15))];

        let upcoming = upcoming_birthdays(&employees, date(2024, 6, 15), 7);

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].days_until, 0);
    }

    #[test]
    fn test_年をまたぐ誕生日は翌年に繰り越す() {
        let employees = vec![employee(1, "Ana Lopez", date(1990, 1, 2))];

        let upcoming = upcoming_birthdays(&employees, date(2024, 12, 30), 7);

        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].days_until, 3);
    }

    #[test]
    fn test_結果は残り日数の昇順() {
        let employees = vec![
            employee(1, "Carlos Ruiz", date(1988, 6, 20)),
            employee(2, "Ana Lopez", date(1990, 6, 15)),
            employee(3, "Elena Diaz", date(1975, 6, 17)),
        ];

        let upcoming = upcoming_birthdays(&employees, date(2024, 6, 15), 7);

        let days: Vec<i64> = upcoming.iter().map(|u| u.days_until).collect();
        assert_eq!(days, vec![0, 2, 5]);
    }

    #[test]
    fn test_全件の残り日数が窓内に収まる() {
        let employees = vec![
            employee(1, "Ana Lopez", date(1990, 6, 15)),
            employee(2, "Carlos Ruiz", date(1988, 6, 20)),
            employee(3, "Elena Diaz", date(1975, 12, 1)),
        ];

        let upcoming = upcoming_birthdays(&employees, date(2024, 6, 15), 7);

        assert!(upcoming.iter().all(|u| (0..=7).contains(&u.days_until)));
    }
}
