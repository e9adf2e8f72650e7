//! テスト共通ヘルパー
//!
//! インメモリ SQLite と固定時刻で組み立てたルーターに対し、
//! `tower::ServiceExt::oneshot` でリクエストを送る。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
   Router,
   body::Body,
   http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use todo_api::{
   app_builder::build_app,
   handler::{ReadinessState, TodoState},
   usecase::TodoUseCaseImpl,
};
use todo_domain::clock::FixedClock;
use todo_infra::{db, repository::SqliteTodoRepository};
use tower::ServiceExt;

/// テストで固定する現在時刻
pub const NOW: &str = "2026-01-01T00:00:00Z";

pub fn now() -> DateTime<Utc> {
   DateTime::parse_from_rfc3339(NOW)
      .expect("日時のパースに失敗")
      .with_timezone(&Utc)
}

/// インメモリ SQLite を使ったアプリケーションを構築する
pub async fn setup_app() -> Router {
   let pool = db::create_pool("sqlite::memory:")
      .await
      .expect("インメモリ DB の作成に失敗");
   db::ensure_schema(&pool)
      .await
      .expect("スキーマの作成に失敗");

   let usecase = TodoUseCaseImpl::new(
      Arc::new(SqliteTodoRepository::new(pool.clone())),
      Arc::new(FixedClock::new(now())),
   );

   build_app(
      Arc::new(TodoState { usecase }),
      Arc::new(ReadinessState { pool }),
   )
}

/// レスポンス
pub struct TestResponse {
   pub status:  StatusCode,
   pub headers: HeaderMap,
   pub body:    Value,
}

/// 任意のリクエストを送る
///
/// ボディが空の場合は `Value::Null` を返す。
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
   let response = app
      .clone()
      .oneshot(request)
      .await
      .expect("リクエストの送信に失敗");

   let status = response.status();
   let headers = response.headers().clone();
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .expect("ボディの読み込みに失敗");
   let body = if bytes.is_empty() {
      Value::Null
   } else {
      serde_json::from_slice(&bytes).expect("レスポンスが JSON ではない")
   };

   TestResponse {
      status,
      headers,
      body,
   }
}

/// ボディなしのリクエストを送る
pub async fn call(app: &Router, method: Method, uri: &str) -> TestResponse {
   let request = Request::builder()
      .method(method)
      .uri(uri)
      .body(Body::empty())
      .expect("リクエストの構築に失敗");
   send(app, request).await
}

/// JSON ボディ付きのリクエストを送る
pub async fn call_json(app: &Router, method: Method, uri: &str, body: Value) -> TestResponse {
   call_raw(app, method, uri, Some("application/json"), body.to_string()).await
}

/// Content-Type とボディを直接指定してリクエストを送る
pub async fn call_raw(
   app: &Router,
   method: Method,
   uri: &str,
   content_type: Option<&str>,
   body: impl Into<String>,
) -> TestResponse {
   let mut builder = Request::builder().method(method).uri(uri);
   if let Some(content_type) = content_type {
      builder = builder.header(header::CONTENT_TYPE, content_type);
   }
   let request = builder
      .body(Body::from(body.into()))
      .expect("リクエストの構築に失敗");
   send(app, request).await
}

/// Todo を作成し、レスポンスボディを返す
pub async fn create(app: &Router, body: Value) -> Value {
   let response = call_json(app, Method::POST, "/api/v1/todos", body).await;
   assert_eq!(response.status, StatusCode::CREATED, "作成に失敗: {}", response.body);
   response.body
}

/// レスポンスの配列から ID を取り出す
pub fn ids(body: &Value) -> Vec<i64> {
   body.as_array()
      .expect("配列ではない")
      .iter()
      .map(|todo| todo["id"].as_i64().expect("id が整数ではない"))
      .collect()
}
