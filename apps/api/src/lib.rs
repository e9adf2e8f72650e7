//! # Todo API サーバー
//!
//! Todo を管理する最小限の REST API。
//!
//! ## アーキテクチャ
//!
//! ```text
//! HTTP リクエスト
//!     ↓
//! handler   … 入力の解釈・検証、レスポンス整形
//!     ↓
//! usecase   … ストア操作、存在確認、期限ウィンドウの計算
//!     ↓
//! TodoRepository（todo_infra）… SQLite への永続化
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - ルーターとミドルウェアの組み立て
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`extract`] - パス ID・JSON ボディのエクストラクタ
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - Todo 管理ユースケース
//!
//! ## 依存関係
//!
//! - `todo_domain`: Todo エンティティ、検索条件、期限のパース
//! - `todo_infra`: SQLite 接続とリポジトリ
//! - `todo_shared`: レスポンス型、トレーシング初期化
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todo_api::{app_builder::build_app, config::ApiConfig};
//!
//! let config = ApiConfig::from_env()?;
//! let app = build_app(todo_state, readiness_state);
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod usecase;
