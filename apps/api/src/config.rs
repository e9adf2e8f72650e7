//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。開発環境では `.env` ファイルも利用できる
//! （読み込みは `main` で `dotenvy` が行う）。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `TODO_API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `TODO_API_PORT` | No | `3000` | ポート番号 |
//! | `DATABASE_URL` | No | `sqlite://todo.db` | SQLite 接続 URL |
//!
//! ログ関連（`LOG_FORMAT`, `RUST_LOG`）は `todo_shared::observability` が読み込む。

use std::env;

use thiserror::Error;

/// バインドアドレスのデフォルト値
const DEFAULT_HOST: &str = "0.0.0.0";
/// ポート番号のデフォルト値
const DEFAULT_PORT: u16 = 3000;
/// 接続 URL のデフォルト値（カレントディレクトリの `todo.db`）
const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   /// 値の形式が不正
   #[error("環境変数 {name} の値が不正です: {value:?}")]
   InvalidValue { name: &'static str, value: String },
}

/// Todo API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
   /// バインドアドレス（例: `0.0.0.0`, `127.0.0.1`）
   pub host:         String,
   /// ポート番号
   pub port:         u16,
   /// SQLite 接続 URL（例: `sqlite://todo.db`, `sqlite::memory:`）
   pub database_url: String,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   ///
   /// 未設定の項目はデフォルト値を使用する。
   /// ポート番号が数値として解釈できない場合はエラーを返す。
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の値の取得元から設定を構築する
   fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let port = match lookup("TODO_API_PORT") {
         Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
               name: "TODO_API_PORT",
               value,
            })?,
         None => DEFAULT_PORT,
      };

      Ok(Self {
         host: lookup("TODO_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
         port,
         database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
      })
   }
}
