//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務（shared に axum 依存を入れない）
//! - クライアントが文字列比較するメッセージは定数として一箇所に集約する
//!
//! ## レスポンス形式
//!
//! ```json
//! { "error": "Todo not found" }
//! ```

use serde::{Deserialize, Serialize};

/// Todo が存在しない
pub const TODO_NOT_FOUND: &str = "Todo not found";
/// リクエストボディが JSON オブジェクトではない
pub const INVALID_JSON_FORMAT: &str = "Invalid JSON format";
/// 許可されていないフィールドが含まれている
pub const INVALID_FIELDS_PRESENT: &str = "Invalid fields present";
/// 作成時に title が指定されていない
pub const TITLE_IS_REQUIRED: &str = "Title is required";
/// 内部エラー（詳細はログのみ）
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// エラーレスポンス
///
/// すべてのエンドポイントで統一されたエラーレスポンス形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error: error.into(),
      }
   }

   /// 404 Not Found（Todo）
   pub fn todo_not_found() -> Self {
      Self::new(TODO_NOT_FOUND)
   }

   /// 400 Bad Request（JSON ではないボディ）
   pub fn invalid_json_format() -> Self {
      Self::new(INVALID_JSON_FORMAT)
   }

   /// 400 Bad Request（許可リスト外のフィールド）
   pub fn invalid_fields_present() -> Self {
      Self::new(INVALID_FIELDS_PRESENT)
   }

   /// 400 Bad Request（title 未指定）
   pub fn title_is_required() -> Self {
      Self::new(TITLE_IS_REQUIRED)
   }

   /// 400 Bad Request（フィールドの型・形式が不正）
   pub fn invalid_value(field: &str) -> Self {
      Self::new(format!("Invalid value for field: {field}"))
   }

   /// 500 Internal Server Error
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_SERVER_ERROR)
   }
}
