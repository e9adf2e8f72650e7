//! # Todo API 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, api）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換は api クレートの責務）
//!
//! ## モジュール構成
//!
//! - [`error_response`] - `{"error": "..."}` 形式のエラーレスポンス
//! - [`health`] - ヘルスチェック・Readiness のレスポンス型
//! - [`observability`] - トレーシング初期化と Request ID 生成

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
