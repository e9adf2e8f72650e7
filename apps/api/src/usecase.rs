//! # ユースケース層
//!
//! Todo API のアプリケーションロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと時刻プロバイダを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入力の解釈とレスポンス整形のみを担い、
//!   ストアの呼び出しと存在確認はユースケースに集約する
//!
//! ## モジュール構成
//!
//! - `todo`: Todo の CRUD と検索

pub mod todo;

pub use todo::{ListTodosInput, TodoUseCaseImpl};
