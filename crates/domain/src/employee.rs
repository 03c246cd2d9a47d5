//! # 従業員
//!
//! 従業員エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Employee`] | 従業員 | 名前・メールアドレス・生年月日を持つ祝いメールの宛先 |
//! | [`BirthDate`] | 生年月日 | 未来日は登録不可。月日成分が誕生日マッチングの入力になる |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: EmployeeId はレガシーデータ由来の連番 i64 をラップ
//! - **不変性**: 従業員は作成と削除のみで、フィールドの更新操作を持たない
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chrono::NaiveDate;
//! use cumpleflow_domain::employee::{BirthDate, Email, Employee, EmployeeId, EmployeeName};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let employee = Employee::new(
//!     EmployeeId::new(1),
//!     EmployeeName::new("Ana Lopez")?,
//!     Email::new("ana.lopez@example.com")?,
//!     BirthDate::new(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap(), today)?,
//! );
//!
//! assert_eq!(employee.name().given_name(), "Ana");
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 従業員 ID（一意識別子）
///
/// レガシーストアとの互換のため UUID ではなく連番の i64 を使用する。
/// 採番は「現存する最大 ID + 1」（[`crate::store::Store::next_employee_id`]）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// 既存の値から従業員 ID を作成する
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// 内部の i64 値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// 従業員名（値オブジェクト）
///
/// 前後の空白を除去し、空文字列と 100 文字超を拒否する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeName(String);

impl EmployeeName {
    /// 従業員名を作成する
    ///
    /// # エラー
    ///
    /// 空文字列または 100 文字超の場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation("名前は必須です".to_string()));
        }

        if value.chars().count() > 100 {
            return Err(DomainError::Validation(
                "名前は100文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 名（最初の空白まで）を取得する
    ///
    /// 祝いメールの件名で使用する（レガシー UI と同じ切り出し規則）。
    pub fn given_name(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or(&self.0)
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
/// ストアからの復元（デシリアライズ）では再検証しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 空白文字を含まない
    /// - `local@domain` の形式で、ドメイン部分が `.` を含む
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() || !domain.contains('.') {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 大文字小文字を無視して一致するか判定する
    ///
    /// メールアドレスの一意性は登録時に case-insensitive で検査する。
    pub fn matches_ignore_case(&self, other: &Email) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 生年月日（値オブジェクト）
///
/// 未来の日付を拒否する。月日成分が誕生日マッチングの入力になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    /// 生年月日を作成する
    ///
    /// # 引数
    ///
    /// - `value`: 生年月日
    /// - `today`: 現在の暦日（呼び出し元から注入）
    ///
    /// # エラー
    ///
    /// `value` が `today` より後の場合は `DomainError::Validation` を返す。
    pub fn new(value: NaiveDate, today: NaiveDate) -> Result<Self, DomainError> {
        if value > today {
            return Err(DomainError::Validation(
                "生年月日に未来の日付は指定できません".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 内部の暦日を取得する
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

/// 従業員エンティティ
///
/// 祝いメールの宛先となる従業員を表現する。フォームから作成され、
/// ID 指定で削除される。それ以外の更新操作は存在しない。
///
/// # 不変条件
///
/// - `id` はストア内で一意
/// - `email` の一意性（case-insensitive）は登録時のみ検査される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    name: EmployeeName,
    email: Email,
    birth_date: BirthDate,
}

impl Employee {
    /// 新しい従業員を作成する
    ///
    /// ストアからの復元にも同じコンストラクタを使用する
    /// （派生フィールドを持たないため作成と復元を区別しない）。
    pub fn new(id: EmployeeId, name: EmployeeName, email: Email, birth_date: BirthDate) -> Self {
        Self {
            id,
            name,
            email,
            birth_date,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &EmployeeName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn birth_date(&self) -> BirthDate {
        self.birth_date
    }
}
