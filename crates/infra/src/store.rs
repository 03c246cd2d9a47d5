//! # ストアリポジトリ
//!
//! 従業員・ログを束ねた単一 JSON ドキュメントの読み書きを担当する。
//!
//! ## 設計方針
//!
//! - **load / replace の 2 操作のみ**: 毎回全体を読み込み、全体を書き戻す。
//!   データ量が小さいため部分更新は持たない
//! - **レガシー互換のワイヤ形式**: 既存の `data.json` を読めるよう、
//!   永続化キーは `nombre` / `fecha_nacimiento` / `employeeId` を維持する。
//!   復元時に値オブジェクトの再検証は行わない
//! - **temp-then-rename**: 書き込みは一時ファイルに出力してからリネームし、
//!   途中クラッシュによるドキュメント破損を防ぐ
//! - **サイレント・フォールバック**: ファイル障害時はログを出して
//!   直近に読み書きできたメモリ上のコピーで継続する。
//!   このリポジトリの操作はリクエストを失敗させない

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use cumpleflow_domain::{
    activity_log::{LogEntry, LogEntryKind},
    employee::{BirthDate, Email, Employee, EmployeeId, EmployeeName},
    store::Store,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::InfraError;

/// 従業員レコード（ワイヤ形式）
///
/// レガシーストアのキー名を維持する。値オブジェクトのデシリアライズは
/// Newtype をそのまま包むだけで、登録時バリデーションを再実行しない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: EmployeeId,
    #[serde(rename = "nombre")]
    pub name: EmployeeName,
    pub email: Email,
    #[serde(rename = "fecha_nacimiento")]
    pub birth_date: BirthDate,
}

impl From<&Employee> for EmployeeRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            name: employee.name().clone(),
            email: employee.email().clone(),
            birth_date: employee.birth_date(),
        }
    }
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Employee::new(record.id, record.name, record.email, record.birth_date)
    }
}

/// ログレコード（ワイヤ形式）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntryRecord {
    pub timestamp: DateTime<Local>,
    pub message:   String,
    #[serde(rename = "type")]
    pub kind:      LogEntryKind,
    #[serde(rename = "employeeId", default)]
    pub employee_id: Option<EmployeeId>,
}

impl From<&LogEntry> for LogEntryRecord {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            message: entry.message.clone(),
            kind: entry.kind,
            employee_id: entry.employee_id,
        }
    }
}

impl From<LogEntryRecord> for LogEntry {
    fn from(record: LogEntryRecord) -> Self {
        Self {
            timestamp: record.timestamp,
            message: record.message,
            kind: record.kind,
            employee_id: record.employee_id,
        }
    }
}

/// ストアドキュメント（ワイヤ形式）
///
/// `data.json` の最上位構造。フィールド欠落は空リストとして読む。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
    #[serde(default)]
    pub logs:      Vec<LogEntryRecord>,
}

impl From<&Store> for StoreDocument {
    fn from(store: &Store) -> Self {
        Self {
            employees: store.employees.iter().map(EmployeeRecord::from).collect(),
            logs:      store.logs.iter().map(LogEntryRecord::from).collect(),
        }
    }
}

impl From<StoreDocument> for Store {
    fn from(document: StoreDocument) -> Self {
        Self {
            employees: document.employees.into_iter().map(Employee::from).collect(),
            logs:      document.logs.into_iter().map(LogEntry::from).collect(),
        }
    }
}

/// ストアリポジトリトレイト
///
/// 唯一の永続化抽象。全体読み込みと全体置換のみを提供する。
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// ストア全体を読み込む
    async fn load(&self) -> Result<Store, InfraError>;

    /// ストア全体を置き換える
    async fn replace(&self, store: &Store) -> Result<(), InfraError>;
}

/// JSON ファイル実装の StoreRepository
///
/// ファイル障害時のフォールバック用に、直近に読み書きできた内容を
/// メモリ上に保持する。プロセス起動直後のフォールバックは空ストア。
pub struct JsonFileStoreRepository {
    path:  PathBuf,
    cache: Mutex<Store>,
}

impl JsonFileStoreRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:  path.into(),
            cache: Mutex::new(Store::default()),
        }
    }

    async fn read_document(&self) -> Result<Store, InfraError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // ファイル未作成は初回起動として空ストア扱い
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Store::default());
            }
            Err(e) => return Err(e.into()),
        };

        let document: StoreDocument = serde_json::from_slice(&bytes)?;
        Ok(document.into())
    }

    async fn write_document(&self, store: &Store) -> Result<(), InfraError> {
        let document = StoreDocument::from(store);
        // レガシーと同じく整形 JSON で書き出す（手元での確認・手修正を想定）
        let json = serde_json::to_vec_pretty(&document)?;

        let tmp_path = PathBuf::from(format!("{}.tmp", self.path.display()));
        tokio::fs::write(&tmp_path, &json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl StoreRepository for JsonFileStoreRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn load(&self) -> Result<Store, InfraError> {
        match self.read_document().await {
            Ok(store) => {
                *self.cache.lock().await = store.clone();
                Ok(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "ストアの読み込みに失敗。メモリ上のコピーで継続");
                Ok(self.cache.lock().await.clone())
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn replace(&self, store: &Store) -> Result<(), InfraError> {
        // 先にメモリ上のコピーを更新し、書き込み失敗時もデータを失わない
        *self.cache.lock().await = store.clone();

        if let Err(e) = self.write_document(store).await {
            tracing::warn!(error = %e, "ストアの書き込みに失敗。メモリ上のコピーのみ更新");
        }

        Ok(())
    }
}
