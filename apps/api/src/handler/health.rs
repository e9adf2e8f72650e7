//! # ヘルスチェックハンドラ
//!
//! - `/api/v1/health` - Liveness Check（常に `{"status":"ok"}` を返す）
//! - `/api/v1/health/ready` - Readiness Check（データベースへの疎通を確認する）
//!
//! レスポンス型は [`todo_shared::HealthResponse`] / [`todo_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::SqlitePool;
use todo_infra::db;
use todo_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// 疎通確認のタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
///
/// データベースや外部サービスへの接続は確認せず、
/// アプリケーション自体の起動状態のみを返す。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::ok())
}

/// Readiness Check 用の State
pub struct ReadinessState {
   pub pool: SqlitePool,
}

/// Readiness Check エンドポイント
///
/// データベースへの疎通を確認する。OK → 200、失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
   let database = check_database(&state.pool).await;

   let response =
      ReadinessResponse::from_checks(BTreeMap::from([("database".to_string(), database)]));
   let http_status = match response.status {
      ReadinessStatus::Ready => StatusCode::OK,
      ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
   };

   (http_status, Json(response))
}

/// データベースへの疎通を `SELECT 1` で確認する
async fn check_database(pool: &SqlitePool) -> CheckStatus {
   match tokio::time::timeout(CHECK_TIMEOUT, db::check_connection(pool)).await {
      Ok(Ok(())) => CheckStatus::Ok,
      Ok(Err(e)) => {
         tracing::warn!(error = %e, "readiness check: database query failed");
         CheckStatus::Error
      }
      Err(_) => {
         tracing::warn!("readiness check: database check timed out");
         CheckStatus::Error
      }
   }
}

#[cfg(test)]
mod tests {
   use axum::{Router, body::Body, http::Request, routing::get};
   use pretty_assertions::assert_eq;
   use tower::ServiceExt;

   use super::*;

   async fn call_ready(pool: SqlitePool) -> (StatusCode, serde_json::Value) {
      let app = Router::new()
         .route("/health/ready", get(readiness_check))
         .with_state(Arc::new(ReadinessState { pool }));

      let response = app
         .oneshot(
            Request::builder()
               .uri("/health/ready")
               .body(Body::empty())
               .unwrap(),
         )
         .await
         .unwrap();

      let status = response.status();
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      (status, serde_json::from_slice(&bytes).unwrap())
   }

   #[tokio::test]
   async fn test_readiness_checkは接続可能なら200を返す() {
      let pool = db::create_pool("sqlite::memory:").await.unwrap();

      let (status, body) = call_ready(pool).await;

      assert_eq!(status, StatusCode::OK);
      assert_eq!(
         body,
         serde_json::json!({ "status": "ready", "checks": { "database": "ok" } })
      );
   }

   #[tokio::test]
   async fn test_readiness_checkは接続できなければ503を返す() {
      let pool = db::create_pool("sqlite::memory:").await.unwrap();
      pool.close().await;

      let (status, body) = call_ready(pool).await;

      assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
      assert_eq!(
         body,
         serde_json::json!({ "status": "not_ready", "checks": { "database": "error" } })
      );
   }
}
