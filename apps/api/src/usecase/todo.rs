//! Todo 管理ユースケース

use std::sync::Arc;

use todo_domain::{
   clock::Clock,
   todo::{NewTodo, Todo, TodoChanges, TodoFilter, TodoId, window_cutoff},
};
use todo_infra::repository::TodoRepository;

use crate::error::ApiError;

/// Todo 一覧取得の入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTodosInput {
   /// 完了状態の一致
   pub completed:   Option<bool>,
   /// 期限ウィンドウ（現在時刻からの日数）
   pub window_days: Option<i64>,
}

/// Todo 管理ユースケース
pub struct TodoUseCaseImpl {
   repository: Arc<dyn TodoRepository>,
   clock:      Arc<dyn Clock>,
}

impl TodoUseCaseImpl {
   pub fn new(repository: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
      Self { repository, clock }
   }

   /// Todo 一覧を取得する（ID 昇順）
   ///
   /// `window_days` が指定された場合、現在時刻 + 日数 以前の期限を持つ Todo のみを返す。
   /// 期限を持たない Todo はウィンドウ検索では返らない。
   pub async fn list_todos(&self, input: ListTodosInput) -> Result<Vec<Todo>, ApiError> {
      let filter = TodoFilter {
         completed:       input.completed,
         deadline_before: input
            .window_days
            .map(|days| window_cutoff(self.clock.now(), days)),
      };

      let todos = self.repository.find_all(&filter).await?;
      Ok(todos)
   }

   /// Todo を取得する
   pub async fn get_todo(&self, id: TodoId) -> Result<Todo, ApiError> {
      self.repository
         .find_by_id(id)
         .await?
         .ok_or(ApiError::NotFound)
   }

   /// Todo を作成する
   pub async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, ApiError> {
      let todo = self.repository.insert(&new_todo).await?;
      tracing::info!(todo_id = %todo.id(), "Todo を作成しました");
      Ok(todo)
   }

   /// Todo を部分更新する
   ///
   /// 存在確認はハンドラがボディ検証より先に [`get_todo`](Self::get_todo) で行う。
   /// その後に削除された場合もここで 404 になる。
   pub async fn update_todo(&self, id: TodoId, changes: TodoChanges) -> Result<Todo, ApiError> {
      let todo = self
         .repository
         .update(id, changes)
         .await?
         .ok_or(ApiError::NotFound)?;
      tracing::info!(todo_id = %id, "Todo を更新しました");
      Ok(todo)
   }

   /// Todo を削除し、削除前の値を返す
   ///
   /// 存在しない場合はエラーではなく `None` を返す。
   pub async fn delete_todo(&self, id: TodoId) -> Result<Option<Todo>, ApiError> {
      let deleted = self.repository.delete(id).await?;
      if deleted.is_some() {
         tracing::info!(todo_id = %id, "Todo を削除しました");
      }
      Ok(deleted)
   }
}
