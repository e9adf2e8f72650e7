//! # Todo ハンドラ
//!
//! Todo の CRUD と検索を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/todos` - Todo 一覧（`completed`, `window` で絞り込み）
//! - `GET /api/v1/todos/{id}` - Todo 取得
//! - `POST /api/v1/todos` - Todo 作成
//! - `PUT /api/v1/todos/{id}` - Todo 部分更新
//! - `DELETE /api/v1/todos/{id}` - Todo 削除
//!
//! ## ボディの検証順序
//!
//! | 順序 | POST | PUT |
//! |------|------|-----|
//! | 1 | JSON オブジェクトか | Todo が存在するか（404） |
//! | 2 | 許可されたフィールドのみか | JSON オブジェクトか |
//! | 3 | `title` があるか | 許可されたフィールドのみか |
//! | 4 | 各フィールドの値 | 各フィールドの値 |
//!
//! いずれかの検証に失敗した場合、ストアは一切変更されない。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Query, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use todo_domain::todo::{NewTodo, Todo, TodoChanges, parse_deadline};

use crate::{
   error::ApiError,
   extract::{JsonObject, TodoIdPath},
   usecase::{ListTodosInput, TodoUseCaseImpl},
};

/// Todo API の共有状態
pub struct TodoState {
   pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 一覧取得のクエリパラメータ
///
/// どちらも寛容に解釈し、クエリの不備でリクエストを拒否しない。
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
   /// 大文字小文字を区別せず `"true"` のときのみ完了、それ以外の値は未完了
   pub completed: Option<String>,
   /// 期限ウィンドウの日数。整数として解釈できない値は無視する
   pub window:    Option<String>,
}

impl ListTodosQuery {
   fn into_input(self) -> ListTodosInput {
      ListTodosInput {
         completed:   self
            .completed
            .map(|value| value.eq_ignore_ascii_case("true")),
         window_days: self
            .window
            .and_then(|value| value.trim().parse::<i64>().ok()),
      }
   }
}

/// Todo DTO
///
/// すべてのキーを常に出力する（値がなければ `null`）。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
   pub id:          i64,
   pub title:       String,
   pub description: Option<String>,
   pub completed:   bool,
   /// RFC 3339 形式の UTC 日時（例: `2026-01-31T09:00:00Z`）
   pub deadline_at: Option<String>,
}

impl From<&Todo> for TodoDto {
   fn from(todo: &Todo) -> Self {
      Self {
         id:          todo.id().as_i64(),
         title:       todo.title().to_string(),
         description: todo.description().map(str::to_string),
         completed:   todo.completed(),
         deadline_at: todo.deadline_at().map(format_deadline),
      }
   }
}

fn format_deadline(deadline: DateTime<Utc>) -> String {
   deadline.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// --- ボディの解釈 ---

/// ボディに指定できるフィールド
const ALLOWED_FIELDS: [&str; 4] = ["title", "description", "completed", "deadline_at"];

/// 許可リストにないキーが含まれていれば拒否する
fn reject_unknown_fields(body: &Map<String, Value>) -> Result<(), ApiError> {
   if body
      .keys()
      .any(|key| !ALLOWED_FIELDS.contains(&key.as_str()))
   {
      return Err(ApiError::InvalidField);
   }
   Ok(())
}

/// 各フィールドの値を検証し、部分更新として解釈する
///
/// - `title`: 文字列（null 不可）
/// - `description`: 文字列または null（null はクリア）
/// - `completed`: 真偽値（null 不可）
/// - `deadline_at`: ISO-8601 文字列または null（null はクリア）
fn parse_fields(body: Map<String, Value>) -> Result<TodoChanges, ApiError> {
   let mut changes = TodoChanges::default();

   for (key, value) in body {
      match key.as_str() {
         "title" => match value {
            Value::String(title) => changes.title = Some(title),
            _ => return Err(ApiError::InvalidValue("title")),
         },
         "description" => match value {
            Value::String(description) => changes.description = Some(Some(description)),
            Value::Null => changes.description = Some(None),
            _ => return Err(ApiError::InvalidValue("description")),
         },
         "completed" => match value {
            Value::Bool(completed) => changes.completed = Some(completed),
            _ => return Err(ApiError::InvalidValue("completed")),
         },
         "deadline_at" => match value {
            Value::String(raw) => {
               let deadline =
                  parse_deadline(&raw).map_err(|_| ApiError::InvalidValue("deadline_at"))?;
               changes.deadline_at = Some(Some(deadline));
            }
            Value::Null => changes.deadline_at = Some(None),
            _ => return Err(ApiError::InvalidValue("deadline_at")),
         },
         _ => return Err(ApiError::InvalidField),
      }
   }

   Ok(changes)
}

/// 作成リクエストのボディを解釈する
fn parse_create_body(body: Map<String, Value>) -> Result<NewTodo, ApiError> {
   reject_unknown_fields(&body)?;
   if !body.contains_key("title") {
      return Err(ApiError::MissingRequiredField);
   }

   let changes = parse_fields(body)?;
   let title = changes.title.ok_or(ApiError::MissingRequiredField)?;

   Ok(NewTodo {
      title,
      description: changes.description.flatten(),
      completed: changes.completed.unwrap_or(false),
      deadline_at: changes.deadline_at.flatten(),
   })
}

/// 更新リクエストのボディを解釈する
fn parse_update_body(body: Map<String, Value>) -> Result<TodoChanges, ApiError> {
   reject_unknown_fields(&body)?;
   parse_fields(body)
}

// --- ハンドラ ---

/// GET /api/v1/todos
///
/// Todo 一覧を ID 昇順で取得する。
///
/// ## クエリパラメータ
///
/// - `completed`: `true`（大文字小文字を区別しない）なら完了、それ以外は未完了のみ
/// - `window`: 現在時刻 + N 日以前の期限を持つ Todo のみ（期限なしは除外）
#[tracing::instrument(skip_all)]
pub async fn list_todos(
   State(state): State<Arc<TodoState>>,
   Query(query): Query<ListTodosQuery>,
) -> Result<impl IntoResponse, ApiError> {
   let todos = state.usecase.list_todos(query.into_input()).await?;

   let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();
   Ok((StatusCode::OK, Json(items)))
}

/// GET /api/v1/todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: Todo
/// - `404 Not Found`: Todo が見つからない
#[tracing::instrument(skip_all, fields(todo_id = %id))]
pub async fn get_todo(
   State(state): State<Arc<TodoState>>,
   TodoIdPath(id): TodoIdPath,
) -> Result<impl IntoResponse, ApiError> {
   let todo = state.usecase.get_todo(id).await?;

   Ok((StatusCode::OK, Json(TodoDto::from(&todo))))
}

/// POST /api/v1/todos
///
/// ## レスポンス
///
/// - `201 Created`: 作成された Todo
/// - `400 Bad Request`: JSON 不正、未知のフィールド、`title` なし、値の型不正
#[tracing::instrument(skip_all)]
pub async fn create_todo(
   State(state): State<Arc<TodoState>>,
   JsonObject(body): JsonObject,
) -> Result<impl IntoResponse, ApiError> {
   let new_todo = parse_create_body(body)?;

   let todo = state.usecase.create_todo(new_todo).await?;

   Ok((StatusCode::CREATED, Json(TodoDto::from(&todo))))
}

/// PUT /api/v1/todos/{id}
///
/// 指定されたフィールドのみを更新する。存在確認はボディの検証より先に行う。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の Todo
/// - `400 Bad Request`: JSON 不正、未知のフィールド、値の型不正
/// - `404 Not Found`: Todo が見つからない
#[tracing::instrument(skip_all, fields(todo_id = %id))]
pub async fn update_todo(
   State(state): State<Arc<TodoState>>,
   TodoIdPath(id): TodoIdPath,
   body: Result<JsonObject, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
   state.usecase.get_todo(id).await?;

   let JsonObject(body) = body?;
   let changes = parse_update_body(body)?;

   let todo = state.usecase.update_todo(id, changes).await?;

   Ok((StatusCode::OK, Json(TodoDto::from(&todo))))
}

/// DELETE /api/v1/todos/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 削除前の Todo。存在しない場合は `{}`
#[tracing::instrument(skip_all, fields(todo_id = %id))]
pub async fn delete_todo(
   State(state): State<Arc<TodoState>>,
   TodoIdPath(id): TodoIdPath,
) -> Result<Response, ApiError> {
   let deleted = state.usecase.delete_todo(id).await?;

   let response = match deleted {
      Some(todo) => (StatusCode::OK, Json(TodoDto::from(&todo))).into_response(),
      None => (StatusCode::OK, Json(Map::new())).into_response(),
   };
   Ok(response)
}

/// どのルートにも一致しないリクエスト
pub async fn not_found() -> ApiError {
   ApiError::NotFound
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::json;
   use todo_domain::todo::TodoId;

   use super::*;

   fn object(value: Value) -> Map<String, Value> {
      match value {
         Value::Object(map) => map,
         other => panic!("オブジェクトではありません: {other}"),
      }
   }

   fn at(s: &str) -> DateTime<Utc> {
      DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
   }

   // ===== ListTodosQuery =====

   #[rstest]
   #[case(Some("true"), Some(true))]
   #[case(Some("TRUE"), Some(true))]
   #[case(Some("True"), Some(true))]
   #[case(Some("false"), Some(false))]
   #[case(Some("yes"), Some(false))]
   #[case(Some(""), Some(false))]
   #[case(None, None)]
   fn test_completedは文字列trueのみ完了とみなす(
      #[case] raw: Option<&str>,
      #[case] expected: Option<bool>,
   ) {
      let query = ListTodosQuery {
         completed: raw.map(str::to_string),
         window:    None,
      };

      assert_eq!(query.into_input().completed, expected);
   }

   #[rstest]
   #[case(Some("7"), Some(7))]
   #[case(Some("-2"), Some(-2))]
   #[case(Some(" 3 "), Some(3))]
   #[case(Some("abc"), None)]
   #[case(Some("1.5"), None)]
   #[case(Some(""), None)]
   #[case(None, None)]
   fn test_windowは整数以外を無視する(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
      let query = ListTodosQuery {
         completed: None,
         window:    raw.map(str::to_string),
      };

      assert_eq!(query.into_input().window_days, expected);
   }

   // ===== TodoDto =====

   #[test]
   fn test_dtoはすべてのキーを出力し期限をutcで表す() {
      let todo = Todo::from_db(
         TodoId::from_i64(3),
         "Buy milk".to_string(),
         None,
         false,
         Some(at("2026-01-31T18:00:00+09:00")),
      );

      let value = serde_json::to_value(TodoDto::from(&todo)).unwrap();

      assert_eq!(
         value,
         json!({
            "id": 3,
            "title": "Buy milk",
            "description": null,
            "completed": false,
            "deadline_at": "2026-01-31T09:00:00Z"
         })
      );
   }

   #[test]
   fn test_dtoは秒未満がある場合のみ出力する() {
      let deadline = at("2026-01-31T09:00:00.250Z");

      assert_eq!(format_deadline(deadline), "2026-01-31T09:00:00.250Z");
   }

   // ===== 作成ボディ =====

   #[test]
   fn test_作成ボディはtitleのみでデフォルト値を補う() {
      let new_todo = parse_create_body(object(json!({ "title": "Buy milk" }))).unwrap();

      assert_eq!(new_todo, NewTodo::new("Buy milk"));
   }

   #[test]
   fn test_作成ボディはすべてのフィールドを解釈する() {
      let new_todo = parse_create_body(object(json!({
         "title": "Report",
         "description": "quarterly",
         "completed": true,
         "deadline_at": "2026-03-01T09:30:00"
      })))
      .unwrap();

      assert_eq!(
         new_todo,
         NewTodo {
            title:       "Report".to_string(),
            description: Some("quarterly".to_string()),
            completed:   true,
            deadline_at: Some(at("2026-03-01T09:30:00Z")),
         }
      );
   }

   #[test]
   fn test_作成ボディのnullはnoneとして扱う() {
      let new_todo = parse_create_body(object(json!({
         "title": "t",
         "description": null,
         "deadline_at": null
      })))
      .unwrap();

      assert_eq!(new_todo, NewTodo::new("t"));
   }

   #[rstest]
   #[case::未知のフィールド(json!({ "title": "t", "priority": 1 }), "Invalid fields present")]
   #[case::未知のフィールドはtitleなしより優先(json!({ "priority": 1 }), "Invalid fields present")]
   #[case::idは指定できない(json!({ "id": 5, "title": "t" }), "Invalid fields present")]
   #[case::titleなし(json!({ "description": "d" }), "Title is required")]
   #[case::空オブジェクト(json!({}), "Title is required")]
   #[case::titleなしは値の不正より優先(json!({ "completed": "yes" }), "Title is required")]
   #[case::titleがnull(json!({ "title": null }), "title")]
   #[case::titleが数値(json!({ "title": 1 }), "title")]
   #[case::descriptionが数値(json!({ "title": "t", "description": 1 }), "description")]
   #[case::completedが文字列(json!({ "title": "t", "completed": "true" }), "completed")]
   #[case::completedがnull(json!({ "title": "t", "completed": null }), "completed")]
   #[case::deadline_atが不正な文字列(json!({ "title": "t", "deadline_at": "soon" }), "deadline_at")]
   #[case::deadline_atが数値(json!({ "title": "t", "deadline_at": 20260101 }), "deadline_at")]
   fn test_作成ボディの検証エラー(#[case] body: Value, #[case] expected: &str) {
      let error = parse_create_body(object(body)).unwrap_err();

      let message = match error {
         ApiError::InvalidField => "Invalid fields present",
         ApiError::MissingRequiredField => "Title is required",
         ApiError::InvalidValue(field) => field,
         other => panic!("想定外のエラー: {other:?}"),
      };
      assert_eq!(message, expected);
   }

   // ===== 更新ボディ =====

   #[test]
   fn test_更新ボディは指定されたフィールドのみ変更対象にする() {
      let changes = parse_update_body(object(json!({ "completed": true }))).unwrap();

      assert_eq!(
         changes,
         TodoChanges {
            completed: Some(true),
            ..Default::default()
         }
      );
   }

   #[test]
   fn test_更新ボディのnullはクリアを表す() {
      let changes = parse_update_body(object(json!({
         "description": null,
         "deadline_at": null
      })))
      .unwrap();

      assert_eq!(
         changes,
         TodoChanges {
            description: Some(None),
            deadline_at: Some(None),
            ..Default::default()
         }
      );
   }

   #[test]
   fn test_更新ボディは空オブジェクトを受け付ける() {
      let changes = parse_update_body(Map::new()).unwrap();

      assert!(changes.is_empty());
   }

   #[rstest]
   #[case(json!({ "title": "t", "owner": "me" }))]
   #[case(json!({ "id": 2 }))]
   fn test_更新ボディは未知のフィールドを拒否する(#[case] body: Value) {
      let error = parse_update_body(object(body)).unwrap_err();

      assert!(matches!(error, ApiError::InvalidField));
   }

   #[test]
   fn test_更新ボディはtitleのnullを拒否する() {
      let error = parse_update_body(object(json!({ "title": null }))).unwrap_err();

      assert!(matches!(error, ApiError::InvalidValue("title")));
   }
}
