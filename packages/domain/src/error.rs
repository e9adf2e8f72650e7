//! # ドメイン層エラー定義
//!
//! ドメインルール違反を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗（期限日時の形式など） |
//!
//! 「Todo が存在しない」はドメインのルール違反ではないため、ここでは扱わない。
//! リポジトリが `Option` で返し、API 層が 404 に変換する。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 入力値がドメインルールに違反している場合に使用する。
   #[error("バリデーションエラー: {0}")]
   Validation(String),
}
