//! # リクエストエクストラクタ
//!
//! Todo API 固有の入力解釈を axum のエクストラクタとして提供する。
//! 拒否時はいずれも [`ApiError`] を返すため、レスポンス形式が統一される。
//!
//! - [`TodoIdPath`] - パスの `{id}`。10 進整数でなければ 404
//! - [`JsonObject`] - JSON オブジェクトのボディ。それ以外は 400 `Invalid JSON format`

use axum::{
   body::Bytes,
   extract::{FromRequest, FromRequestParts, Path, Request},
   http::{HeaderMap, header, request::Parts},
};
use serde_json::{Map, Value};
use todo_domain::todo::TodoId;

use crate::error::ApiError;

/// パスパラメータの Todo ID
///
/// 数字以外を含む ID はルートに一致しなかったものとして扱い、
/// メソッドによらず 404 を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoIdPath(pub TodoId);

impl<S> FromRequestParts<S> for TodoIdPath
where
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
      let Path(raw) = Path::<String>::from_request_parts(parts, state)
         .await
         .map_err(|_| ApiError::NotFound)?;

      parse_todo_id(&raw).map(Self).ok_or(ApiError::NotFound)
   }
}

/// 符号なしの 10 進数字列のみを ID として受け付ける
fn parse_todo_id(raw: &str) -> Option<TodoId> {
   if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
      return None;
   }
   raw.parse().ok()
}

/// JSON オブジェクトのリクエストボディ
///
/// 以下のいずれかに該当する場合は [`ApiError::MalformedBody`] で拒否する:
///
/// - `Content-Type` が `application/json`（または `+json` サフィックス）でない
/// - ボディが JSON として解釈できない
/// - JSON の最上位がオブジェクトでない
///
/// フィールドの検証は行わない。許可リストとの照合はハンドラの責務。
#[derive(Debug, Clone, PartialEq)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
   S: Send + Sync,
{
   type Rejection = ApiError;

   async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
      if !has_json_content_type(req.headers()) {
         return Err(ApiError::MalformedBody);
      }

      let bytes = Bytes::from_request(req, state)
         .await
         .map_err(|_| ApiError::MalformedBody)?;

      match serde_json::from_slice::<Value>(&bytes) {
         Ok(Value::Object(map)) => Ok(Self(map)),
         _ => Err(ApiError::MalformedBody),
      }
   }
}

/// `Content-Type` が JSON を示しているか
fn has_json_content_type(headers: &HeaderMap) -> bool {
   let Some(content_type) = headers
      .get(header::CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
   else {
      return false;
   };

   let mime = content_type
      .split(';')
      .next()
      .unwrap_or_default()
      .trim()
      .to_ascii_lowercase();

   mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
