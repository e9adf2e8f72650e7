//! # リポジトリ実装
//!
//! リポジトリトレイトと、その SQLite 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: API 層は `Arc<dyn TodoRepository>` として受け取り、具象型に依存しない
//! - **データベース抽象化**: sqlx を使用し、SQL 方言をこのモジュールに閉じ込める
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod todo_repository;

pub use todo_repository::{SqliteTodoRepository, TodoRepository};
