//! # Todo ドメイン層
//!
//! Todo API の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つ [`todo::Todo`]
//! - **値オブジェクト**: [`todo::TodoId`]、部分更新を表す [`todo::TodoChanges`]、
//!   検索条件 [`todo::TodoFilter`]
//! - **時刻の注入**: [`clock::Clock`] により「現在時刻」に依存するロジックをテスト可能にする
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//!   ↘           ↗
//!     shared
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use todo_domain::todo::{NewTodo, TodoFilter};
//!
//! let new_todo = NewTodo::new("Buy milk");
//! assert!(!new_todo.completed);
//!
//! let filter = TodoFilter {
//!    completed: Some(true),
//!    ..Default::default()
//! };
//! assert!(!filter.matches(&new_todo.into_todo(todo_domain::todo::TodoId::from_i64(1))));
//! ```

pub mod clock;
pub mod error;
pub mod todo;

pub use error::DomainError;
