//! # Clock（時刻プロバイダ）
//!
//! ユースケース層での `Local::now()` 直接呼び出しを置き換え、
//! テストで固定時刻を注入可能にするための抽象化。
//!
//! 誕生日マッチングと送信済み判定はどちらも「ローカルの暦日」で
//! 定義されるため、このシステムの時刻はローカルタイムゾーンで扱う。

use chrono::{DateTime, Local, NaiveDate};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Local>;

   /// ローカルの暦日としての「今日」
   fn today(&self) -> NaiveDate {
      self.now().date_naive()
   }
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Local> {
      Local::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Local>,
}

impl FixedClock {
   pub fn new(now: DateTime<Local>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Local> {
      self.now
   }
}

#[cfg(test)]
mod tests {
   use chrono::TimeZone;

   use super::*;

   #[test]
   fn test_system_clock_は現在時刻を返す() {
      let clock = SystemClock;
      let before = Local::now();
      let result = clock.now();
      let after = Local::now();

      assert!(result >= before);
      assert!(result <= after);
   }

   #[test]
   fn test_fixed_clock_はコンストラクタで渡した時刻を返す() {
      let fixed_time = Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
      let clock = FixedClock::new(fixed_time);

      assert_eq!(clock.now(), fixed_time);
   }

   #[test]
   fn test_todayは時刻部分を落とした暦日を返す() {
      let fixed_time = Local.with_ymd_and_hms(2024, 6, 15, 23, 59, 59).unwrap();
      let clock = FixedClock::new(fixed_time);

      assert_eq!(
         clock.today(),
         NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
      );
   }
}
