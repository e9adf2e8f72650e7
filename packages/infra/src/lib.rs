//! # Todo API インフラ層
//!
//! 外部システム（リレーショナルストア）との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! ストアの詳細（SQL 方言、接続プール）をカプセル化し、API 層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite への接続プール管理とスキーマ作成
//! - **リポジトリ実装**: Todo の CRUD と検索
//! - **テスト支援**: `test-utils` feature によるインメモリモック
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プール作成・スキーマ作成・疎通確認
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと SQLite 実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_infra::{db, repository::SqliteTodoRepository};
//!
//! let pool = db::create_pool("sqlite://todo.db").await?;
//! db::ensure_schema(&pool).await?;
//! let repository = SqliteTodoRepository::new(pool);
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
