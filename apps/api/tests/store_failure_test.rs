//! ストア障害時の振る舞いの統合テスト
//!
//! 常に失敗するリポジトリを注入し、詳細を隠した 500 が返ることを確認する。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
   body::Body,
   http::{Method, Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use todo_api::{
   app_builder::build_app,
   handler::{ReadinessState, TodoState},
   usecase::TodoUseCaseImpl,
};
use todo_domain::{
   clock::SystemClock,
   todo::{NewTodo, Todo, TodoChanges, TodoFilter, TodoId},
};
use todo_infra::{InfraError, db, repository::TodoRepository};
use tower::ServiceExt;

struct FailingTodoRepository;

fn pool_closed() -> InfraError {
   sqlx::Error::PoolClosed.into()
}

#[async_trait]
impl TodoRepository for FailingTodoRepository {
   async fn insert(&self, _new_todo: &NewTodo) -> Result<Todo, InfraError> {
      Err(pool_closed())
   }

   async fn find_by_id(&self, _id: TodoId) -> Result<Option<Todo>, InfraError> {
      Err(pool_closed())
   }

   async fn find_all(&self, _filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
      Err(pool_closed())
   }

   async fn update(&self, _id: TodoId, _changes: TodoChanges) -> Result<Option<Todo>, InfraError> {
      Err(pool_closed())
   }

   async fn delete(&self, _id: TodoId) -> Result<Option<Todo>, InfraError> {
      Err(pool_closed())
   }
}

#[rstest]
#[case(Method::GET, "/api/v1/todos", None)]
#[case(Method::GET, "/api/v1/todos/1", None)]
#[case(Method::POST, "/api/v1/todos", Some(json!({ "title": "t" })))]
#[case(Method::PUT, "/api/v1/todos/1", Some(json!({ "title": "t" })))]
#[case(Method::DELETE, "/api/v1/todos/1", None)]
#[tokio::test]
async fn test_ストアの障害は詳細を隠して500を返す(
   #[case] method: Method,
   #[case] uri: &str,
   #[case] body: Option<Value>,
) {
   let pool = db::create_pool("sqlite::memory:").await.unwrap();
   let usecase = TodoUseCaseImpl::new(Arc::new(FailingTodoRepository), Arc::new(SystemClock));
   let app = build_app(
      Arc::new(TodoState { usecase }),
      Arc::new(ReadinessState { pool }),
   );

   let mut builder = Request::builder().method(method).uri(uri);
   let request_body = match body {
      Some(value) => {
         builder = builder.header(header::CONTENT_TYPE, "application/json");
         Body::from(value.to_string())
      }
      None => Body::empty(),
   };
   let response = app.oneshot(builder.body(request_body).unwrap()).await.unwrap();

   let status = response.status();
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   let body: Value = serde_json::from_slice(&bytes).unwrap();

   assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
   assert_eq!(body, json!({ "error": "Internal server error" }));
}
