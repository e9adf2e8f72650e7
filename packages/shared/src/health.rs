//! # ヘルスチェック共通型
//!
//! ヘルスチェック（liveness）と Readiness Check のレスポンス型を提供する。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ヘルスチェックレスポンス
///
/// プロセスが稼働していれば常に `{"status": "ok"}` を返す。
///
/// ## 使用例
///
/// ```
/// use todo_shared::HealthResponse;
///
/// let response = HealthResponse::ok();
/// assert_eq!(response.status, "ok");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
   /// 稼働状態（常に `"ok"`）
   pub status: String,
}

impl HealthResponse {
   pub fn ok() -> Self {
      Self {
         status: "ok".to_string(),
      }
   }
}

/// 個別チェックの結果ステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
   /// チェック成功
   Ok,
   /// チェック失敗
   Error,
}

/// Readiness 全体のステータス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
   /// 全依存先が利用可能
   Ready,
   /// 一部の依存先が利用不可
   NotReady,
}

/// Readiness Check レスポンス
///
/// 依存先（データベース）への接続状態を含むレスポンス型。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
   /// 全体のステータス
   pub status: ReadinessStatus,
   /// 個別チェック結果（キー: チェック名、値: ステータス）
   pub checks: BTreeMap<String, CheckStatus>,
}

impl ReadinessResponse {
   /// 個別チェック結果から全体ステータスを導出して構築する
   ///
   /// 1 つでも `Error` があれば `NotReady` とする。
   pub fn from_checks(checks: BTreeMap<String, CheckStatus>) -> Self {
      let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
         ReadinessStatus::Ready
      } else {
         ReadinessStatus::NotReady
      };
      Self { status, checks }
   }
}
