//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todo_domain::todo::{NewTodo, Todo, TodoChanges, TodoFilter, TodoId};

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

#[derive(Debug, Default)]
struct MockState {
   todos:   Vec<Todo>,
   last_id: i64,
}

/// ID 採番・絞り込みを SQLite 実装と同じ意味論で再現するモック
#[derive(Debug, Clone, Default)]
pub struct MockTodoRepository {
   state: Arc<Mutex<MockState>>,
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 現在保持している Todo の数
   pub fn count(&self) -> usize {
      self.state.lock().unwrap().todos.len()
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
      let mut state = self.state.lock().unwrap();
      state.last_id += 1;
      let todo = new_todo.clone().into_todo(TodoId::from_i64(state.last_id));
      state.todos.push(todo.clone());
      Ok(todo)
   }

   async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      Ok(self
         .state
         .lock()
         .unwrap()
         .todos
         .iter()
         .find(|t| t.id() == id)
         .cloned())
   }

   async fn find_all(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
      Ok(self
         .state
         .lock()
         .unwrap()
         .todos
         .iter()
         .filter(|t| filter.matches(t))
         .cloned()
         .collect())
   }

   async fn update(&self, id: TodoId, changes: TodoChanges) -> Result<Option<Todo>, InfraError> {
      let mut state = self.state.lock().unwrap();
      let Some(slot) = state.todos.iter_mut().find(|t| t.id() == id) else {
         return Ok(None);
      };
      let updated = slot.clone().with_changes(changes);
      *slot = updated.clone();
      Ok(Some(updated))
   }

   async fn delete(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
      let mut state = self.state.lock().unwrap();
      let Some(pos) = state.todos.iter().position(|t| t.id() == id) else {
         return Ok(None);
      };
      Ok(Some(state.todos.remove(pos)))
   }
}
