//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! cumpleflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::HashSet,
   sync::{Arc, Mutex},
};

use async_trait::async_trait;
use cumpleflow_domain::{
   notification::{EmailMessage, NotificationError},
   store::Store,
};

use crate::{error::InfraError, notification::NotificationSender, store::StoreRepository};

// ===== MockStoreRepository =====

/// テスト用のインメモリ StoreRepository
#[derive(Clone, Default)]
pub struct MockStoreRepository {
   store: Arc<Mutex<Store>>,
}

impl MockStoreRepository {
   pub fn new() -> Self {
      Self {
         store: Arc::new(Mutex::new(Store::default())),
      }
   }

   /// 初期内容を指定して作成する
   pub fn with_store(store: Store) -> Self {
      Self {
         store: Arc::new(Mutex::new(store)),
      }
   }

   /// 現在の内容のスナップショットを取得する
   pub fn snapshot(&self) -> Store {
      self.store.lock().unwrap().clone()
   }
}

#[async_trait]
impl StoreRepository for MockStoreRepository {
   async fn load(&self) -> Result<Store, InfraError> {
      Ok(self.store.lock().unwrap().clone())
   }

   async fn replace(&self, store: &Store) -> Result<(), InfraError> {
      *self.store.lock().unwrap() = store.clone();
      Ok(())
   }
}

// ===== MockNotificationSender =====

/// テスト用のモック NotificationSender
///
/// 送信したメッセージを記録する。`fail_for` で指定した宛先への送信は
/// 失敗させられる（送信失敗時にループが継続することのテスト用）。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
   sent:            Arc<Mutex<Vec<EmailMessage>>>,
   fail_recipients: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
   pub fn new() -> Self {
      Self::default()
   }

   /// 指定した宛先への送信を失敗させる
   pub fn fail_for(&self, recipient: impl Into<String>) {
      self.fail_recipients.lock().unwrap().insert(recipient.into());
   }

   /// 送信されたメッセージの一覧を取得する
   pub fn sent_emails(&self) -> Vec<EmailMessage> {
      self.sent.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
   async fn send_email(&self, email: &EmailMessage) -> Result<String, NotificationError> {
      if self.fail_recipients.lock().unwrap().contains(&email.to) {
         return Err(NotificationError::SendFailed(
            "モックが失敗を注入".to_string(),
         ));
      }

      let mut sent = self.sent.lock().unwrap();
      sent.push(email.clone());
      Ok(format!("mock-message-{}", sent.len()))
   }
}
