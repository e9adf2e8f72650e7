//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **コミット後に返す**: すべての書き込みはコミット完了後に結果を返す
//! - **部分更新は 1 トランザクション**: 既存行の読み出し → 差分適用 → 書き込みを
//!   同一トランザクション内で行う
//! - **削除は削除前の値を返す**: `DELETE ... RETURNING` で 1 文にまとめる
//! - **期限は固定幅の UTC 文字列で保存する**: `YYYY-MM-DDTHH:MM:SS.fffffffffZ`。
//!   桁数が揃うため文字列比較がナノ秒単位の時刻比較と一致する。
//!   `deadline_at` が NULL の行は比較結果も NULL になり、ウィンドウ検索から除外される

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoFilter, TodoId};

use crate::error::InfraError;

/// Todo リポジトリトレイト
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// Todo を挿入し、採番された ID を含む Todo を返す
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

   /// ID で Todo を検索する
   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError>;

   /// 条件に一致する Todo を ID 昇順（挿入順）で取得する
   async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError>;

   /// 指定されたフィールドのみを更新し、更新後の Todo を返す
   ///
   /// 対象が存在しない場合は `None` を返す。
   async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>, InfraError>;

   /// Todo を削除し、削除前の値を返す
   ///
   /// 対象が存在しない場合は `None` を返す。
   async fn delete(&self, id: TodoId) -> Result<Option<Todo>, InfraError>;
}

/// todos テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct TodoRow {
   id:          i64,
   title:       String,
   description: Option<String>,
   completed:   bool,
   deadline_at: Option<DateTime<Utc>>,
}

/// 期限を保存・比較用の固定幅文字列にする
///
/// 年はドメイン側で 0〜9999 に制限されているため常に 4 桁になる。
fn deadline_text(deadline: DateTime<Utc>) -> String {
   deadline.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string()
}

impl From<TodoRow> for Todo {
   fn from(row: TodoRow) -> Self {
      Todo::from_db(
         TodoId::from_i64(row.id),
         row.title,
         row.description,
         row.completed,
         row.deadline_at,
      )
   }
}

/// SQLite 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
   pool: SqlitePool,
}

impl SqliteTodoRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: SqlitePool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         INSERT INTO todos (title, description, completed, deadline_at)
         VALUES (?, ?, ?, ?)
         RETURNING id, title, description, completed, deadline_at
         "#,
      )
      .bind(&new_todo.title)
      .bind(&new_todo.description)
      .bind(new_todo.completed)
      .bind(new_todo.deadline_at.map(deadline_text))
      .fetch_one(&self.pool)
      .await?;

      Ok(row.into())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, title, description, completed, deadline_at
         FROM todos
         WHERE id = ?
         "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      Ok(row.map(Todo::from))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(?filter))]
   async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
      let mut query = QueryBuilder::<Sqlite>::new(
         "SELECT id, title, description, completed, deadline_at FROM todos WHERE 1 = 1",
      );

      if let Some(completed) = filter.completed {
         query.push(" AND completed = ").push_bind(completed);
      }

      if let Some(cutoff) = filter.deadline_before {
         query
            .push(" AND deadline_at <= ")
            .push_bind(deadline_text(cutoff));
      }

      query.push(" ORDER BY id ASC");

      let rows = query
         .build_query_as::<TodoRow>()
         .fetch_all(&self.pool)
         .await?;

      Ok(rows.into_iter().map(Todo::from).collect())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>, InfraError> {
      let mut tx = self.pool.begin().await?;

      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         SELECT id, title, description, completed, deadline_at
         FROM todos
         WHERE id = ?
         "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&mut *tx)
      .await?;

      // 存在しない場合は tx をドロップしてロールバックする
      let Some(row) = row else {
         return Ok(None);
      };

      let current = Todo::from(row);
      if changes.is_empty() {
         tx.commit().await?;
         return Ok(Some(current));
      }

      let updated = current.with_changes(changes);

      let result = sqlx::query(
         r#"
         UPDATE todos
         SET title = ?, description = ?, completed = ?, deadline_at = ?
         WHERE id = ?
         "#,
      )
      .bind(updated.title())
      .bind(updated.description())
      .bind(updated.completed())
      .bind(updated.deadline_at().map(deadline_text))
      .bind(id.as_i64())
      .execute(&mut *tx)
      .await?;

      if result.rows_affected() != 1 {
         return Err(InfraError::row_vanished(id.as_i64()));
      }

      tx.commit().await?;

      Ok(Some(updated))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
         DELETE FROM todos
         WHERE id = ?
         RETURNING id, title, description, completed, deadline_at
         "#,
      )
      .bind(id.as_i64())
      .fetch_optional(&self.pool)
      .await?;

      Ok(row.map(Todo::from))
   }
}
