//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## レスポンス形式
//!
//! すべてのエラーは `{"error": "<メッセージ>"}` 形式の JSON で返す
//! （[`todo_shared::ErrorResponse`]）。
//!
//! | ApiError | HTTP Status | error |
//! |----------|-------------|-------|
//! | NotFound | 404 | `Todo not found` |
//! | MalformedBody | 400 | `Invalid JSON format` |
//! | InvalidField | 400 | `Invalid fields present` |
//! | MissingRequiredField | 400 | `Title is required` |
//! | InvalidValue | 400 | `Invalid value for field: <name>` |
//! | Database | 500 | `Internal server error` |
//!
//! ## エラーの階層
//!
//! ```text
//! インフラ層エラー (InfraError)
//!        ↓ #[from]
//! API エラー (ApiError)
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + JSON)
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

/// API 層で発生するエラー
///
/// ハンドラ・ユースケース・エクストラクタから返されるエラー型。
/// `IntoResponse` を実装しているため、axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// Todo が存在しない、または ID が整数でない（404）
   #[error("Todo が見つかりません")]
   NotFound,

   /// JSON オブジェクトとして解釈できないボディ（400）
   #[error("JSON の形式が不正です")]
   MalformedBody,

   /// 許可されていないフィールドを含むボディ（400）
   #[error("許可されていないフィールドが含まれています")]
   InvalidField,

   /// `title` を含まない作成リクエスト（400）
   #[error("title は必須です")]
   MissingRequiredField,

   /// フィールドの型・形式が不正（400）
   #[error("フィールドの値が不正です: {0}")]
   InvalidValue(&'static str),

   /// データベースエラー（500）
   ///
   /// 詳細はログにのみ出力し、クライアントには返さない。
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let (status, body) = match &self {
         ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::todo_not_found()),
         ApiError::MalformedBody => (StatusCode::BAD_REQUEST, ErrorResponse::invalid_json_format()),
         ApiError::InvalidField => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::invalid_fields_present(),
         ),
         ApiError::MissingRequiredField => {
            (StatusCode::BAD_REQUEST, ErrorResponse::title_is_required())
         }
         ApiError::InvalidValue(field) => {
            (StatusCode::BAD_REQUEST, ErrorResponse::invalid_value(field))
         }
         ApiError::Database(e) => {
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "データベースエラー"
            );
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
      };

      (status, Json(body)).into_response()
   }
}
