//! # ルーター構築
//!
//! ハンドラ・状態・ミドルウェアを組み合わせてアプリケーションの
//! [`Router`] を構築する。`main` と統合テストの双方から使用する。
//!
//! ## ルーティング
//!
//! すべてのエンドポイントは `/api/v1` 配下に置く。
//! どのルートにも一致しないリクエストは 404 `{"error":"Todo not found"}` を返す。

use std::sync::Arc;

use axum::{Router, body::Body, routing::get};
use todo_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::handler::{
   ReadinessState,
   TodoState,
   create_todo,
   delete_todo,
   get_todo,
   health_check,
   list_todos,
   not_found,
   readiness_check,
   update_todo,
};

/// API のベースパス
pub const API_BASE_PATH: &str = "/api/v1";

/// アプリケーションのルーターを構築する
pub fn build_app(todo_state: Arc<TodoState>, readiness_state: Arc<ReadinessState>) -> Router {
   let api = Router::new()
      .route("/health", get(health_check))
      .merge(
         Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
      )
      .route("/todos", get(list_todos).post(create_todo))
      .route(
         "/todos/{id}",
         get(get_todo).put(update_todo).delete(delete_todo),
      )
      .with_state(todo_state);

   Router::new()
      .nest(API_BASE_PATH, api)
      .fallback(not_found)
      // Request ID レイヤー（下に書いたものが外側）
      // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
      // 2. TraceLayer: リクエストスパンに request_id を含める
      // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
