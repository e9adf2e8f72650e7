//! テスト共通フィクスチャ
//!
//! インメモリ SQLite を使用する統合テストで共通利用するヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use todo_domain::todo::NewTodo;
use todo_infra::db;

/// スキーマ作成済みのインメモリ DB プールを作成する
///
/// テストごとに独立した DB になる。
pub async fn setup_pool() -> SqlitePool {
   let pool = db::create_pool("sqlite::memory:")
      .await
      .expect("インメモリ DB の作成に失敗");
   db::ensure_schema(&pool)
      .await
      .expect("スキーマの作成に失敗");
   pool
}

/// RFC 3339 文字列から UTC 日時を作る
pub fn at(s: &str) -> DateTime<Utc> {
   DateTime::parse_from_rfc3339(s)
      .expect("日時のパースに失敗")
      .with_timezone(&Utc)
}

/// 完了状態と期限を指定した作成入力
pub fn new_todo(title: &str, completed: bool, deadline_at: Option<&str>) -> NewTodo {
   NewTodo {
      title:       title.to_string(),
      description: None,
      completed,
      deadline_at: deadline_at.map(at),
   }
}
