//! # インフラ層エラー定義
//!
//! SQLite ストアへのアクセスで発生するエラー。
//!
//! [`InfraError`] は種別 [`InfraErrorKind`] と、生成時点の [`SpanTrace`] を持つ。
//! リポジトリのメソッドは `#[tracing::instrument]` でスパンを張っているため、
//! ログに出力したときにどの操作で失敗したかを辿れる。
//!
//! ```text
//! sqlx::Error ──From──▶ InfraError { kind: Database, span_trace }
//! ```

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Debug, Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// SQL の実行失敗、接続断、プールのクローズなど
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// 同一トランザクション内で読み出した行が更新時に消えていた
   #[error("Todo の行が更新中に失われました: id={id}")]
   RowVanished { id: i64 },
}

impl InfraError {
   fn capture(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   pub fn row_vanished(id: i64) -> Self {
      Self::capture(InfraErrorKind::RowVanished { id })
   }

   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// 生成時点のスパン情報
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      std::error::Error::source(&self.kind)
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      Self::capture(InfraErrorKind::Database(source))
   }
}
