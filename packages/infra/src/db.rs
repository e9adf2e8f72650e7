//! # SQLite データベース接続管理
//!
//! データベース接続プールの作成、スキーマ作成、疎通確認を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 接続を再利用し、リクエストごとの接続確立を避ける
//! - **sqlx 採用**: 非同期サポート、型安全なバインド
//! - **スキーマ自動作成**: 起動時に `CREATE TABLE IF NOT EXISTS` を実行する。
//!   バージョン管理されたマイグレーションは扱わない
//!
//! ## インメモリ DB
//!
//! `sqlite::memory:` は接続ごとに別の DB になるため、接続数を 1 に固定し、
//! アイドル切断も無効にする。テストではこの URL を使用する。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::db;
//!
//! let pool = db::create_pool("sqlite://todo.db").await?;
//! db::ensure_schema(&pool).await?;
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
   SqlitePool,
   sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::error::InfraError;

/// todos テーブル定義
///
/// `AUTOINCREMENT` により、削除済みの ID が再採番されないことを保証する。
const CREATE_TODOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
   id          INTEGER PRIMARY KEY AUTOINCREMENT,
   title       TEXT    NOT NULL,
   description TEXT,
   completed   BOOLEAN NOT NULL DEFAULT 0,
   deadline_at TEXT
)
"#;

/// URL がインメモリ DB を指しているか
fn is_in_memory(database_url: &str) -> bool {
   database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// URL に応じた `SqlitePoolOptions` を返す
///
/// - ファイル DB: 最大 10 接続
/// - インメモリ DB: 1 接続固定、アイドル切断・寿命なし
pub fn pool_options(database_url: &str) -> SqlitePoolOptions {
   let options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));

   if is_in_memory(database_url) {
      options
         .max_connections(1)
         .idle_timeout(None)
         .max_lifetime(None)
   } else {
      options.max_connections(10)
   }
}

/// SQLite 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを共有する。
/// ファイル DB が存在しない場合は作成する。
///
/// # 引数
///
/// * `database_url` - `sqlite://path/to/file.db` または `sqlite::memory:`
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, InfraError> {
   let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

   let pool = pool_options(database_url)
      .connect_with(connect_options)
      .await?;

   Ok(pool)
}

/// todos テーブルが存在しなければ作成する
///
/// 冪等であり、起動のたびに呼び出してよい。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), InfraError> {
   sqlx::query(CREATE_TODOS_TABLE).execute(pool).await?;
   Ok(())
}

/// データベースへの疎通を確認する（Readiness Check 用）
pub async fn check_connection(pool: &SqlitePool) -> Result<(), InfraError> {
   sqlx::query("SELECT 1").execute(pool).await?;
   Ok(())
}
