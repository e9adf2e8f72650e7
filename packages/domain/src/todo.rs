//! # Todo（タスク）
//!
//! API が管理する唯一のエンティティ。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Todo`] | Todo | 永続化されたタスク |
//! | [`TodoId`] | Todo ID | ストアが採番する整数 ID。作成後は不変 |
//! | [`NewTodo`] | 作成入力 | ID 採番前の Todo |
//! | [`TodoChanges`] | 部分更新 | 指定されたフィールドのみを置き換える差分 |
//! | [`TodoFilter`] | 検索条件 | 完了状態・期限の上限による絞り込み |
//!
//! ## 部分更新の表現
//!
//! null 許容フィールド（`description`, `deadline_at`）は `Option<Option<T>>` で表す:
//!
//! | 値 | 意味 |
//! |----|------|
//! | `None` | 未指定（既存値を維持） |
//! | `Some(None)` | null を指定（値をクリア） |
//! | `Some(Some(v))` | 値を置き換え |
//!
//! `title` と `completed` は null を取らないため `Option<T>` で表す。

use std::{num::ParseIntError, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Todo ID（一意識別子）
///
/// ストアの自動採番で払い出される。削除済みの ID が再利用されることはない。
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
   /// 既存の整数値から Todo ID を作成する
   pub fn from_i64(id: i64) -> Self {
      Self(id)
   }

   /// 内部の整数値を取得する
   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

impl FromStr for TodoId {
   type Err = ParseIntError;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      s.parse::<i64>().map(Self)
   }
}

/// Todo エンティティ
///
/// # 不変条件
///
/// - `id` は作成後に変化しない
/// - `title` は常に存在する（null にならない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
   id:          TodoId,
   title:       String,
   description: Option<String>,
   completed:   bool,
   deadline_at: Option<DateTime<Utc>>,
}

impl Todo {
   /// 永続化済みの値から復元する
   pub fn from_db(
      id: TodoId,
      title: String,
      description: Option<String>,
      completed: bool,
      deadline_at: Option<DateTime<Utc>>,
   ) -> Self {
      Self {
         id,
         title,
         description,
         completed,
         deadline_at,
      }
   }

   pub fn id(&self) -> TodoId {
      self.id
   }

   pub fn title(&self) -> &str {
      &self.title
   }

   pub fn description(&self) -> Option<&str> {
      self.description.as_deref()
   }

   pub fn completed(&self) -> bool {
      self.completed
   }

   pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
      self.deadline_at
   }

   /// 部分更新を適用した新しい Todo を返す
   ///
   /// 指定されたフィールドのみ置き換え、`id` と未指定フィールドは維持する。
   pub fn with_changes(self, changes: TodoChanges) -> Self {
      Self {
         id:          self.id,
         title:       changes.title.unwrap_or(self.title),
         description: changes.description.unwrap_or(self.description),
         completed:   changes.completed.unwrap_or(self.completed),
         deadline_at: changes.deadline_at.unwrap_or(self.deadline_at),
      }
   }
}

/// Todo 作成の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
   pub title:       String,
   pub description: Option<String>,
   pub completed:   bool,
   pub deadline_at: Option<DateTime<Utc>>,
}

impl NewTodo {
   /// タイトルのみを指定して作成入力を作る（`completed` は false）
   pub fn new(title: impl Into<String>) -> Self {
      Self {
         title:       title.into(),
         description: None,
         completed:   false,
         deadline_at: None,
      }
   }

   /// 採番された ID と組み合わせて Todo を作る
   pub fn into_todo(self, id: TodoId) -> Todo {
      Todo::from_db(
         id,
         self.title,
         self.description,
         self.completed,
         self.deadline_at,
      )
   }
}

/// Todo の部分更新
///
/// モジュールドキュメントの「部分更新の表現」を参照。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
   pub title:       Option<String>,
   pub description: Option<Option<String>>,
   pub completed:   Option<bool>,
   pub deadline_at: Option<Option<DateTime<Utc>>>,
}

impl TodoChanges {
   /// 変更対象のフィールドが 1 つもないか
   pub fn is_empty(&self) -> bool {
      self.title.is_none()
         && self.description.is_none()
         && self.completed.is_none()
         && self.deadline_at.is_none()
   }
}

/// Todo の検索条件
///
/// 指定された条件はすべて AND で結合される。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
   /// 完了状態の一致
   pub completed:       Option<bool>,
   /// 期限の上限（この日時以前の期限を持つ Todo のみ）
   ///
   /// 期限を持たない Todo は比較が成立しないため除外される。
   pub deadline_before: Option<DateTime<Utc>>,
}

impl TodoFilter {
   /// Todo が条件を満たすか判定する
   ///
   /// SQL 実装と同じ意味論をインメモリで提供する（モックリポジトリ用）。
   pub fn matches(&self, todo: &Todo) -> bool {
      if self.completed.is_some_and(|wanted| todo.completed() != wanted) {
         return false;
      }

      if let Some(cutoff) = self.deadline_before {
         return todo.deadline_at().is_some_and(|deadline| deadline <= cutoff);
      }

      true
   }
}

/// 期限ウィンドウの上限日時を計算する
///
/// `now + days 日` を返す。範囲外になる場合は表現可能な最大値・最小値に丸める。
pub fn window_cutoff(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
   let cutoff = TimeDelta::try_days(days).and_then(|delta| now.checked_add_signed(delta));

   match cutoff {
      Some(cutoff) => cutoff.clamp(min_deadline(), max_deadline()),
      None if days.is_positive() => max_deadline(),
      None => min_deadline(),
   }
}

/// 期限として扱える最小日時（0000-01-01T00:00:00Z）
fn min_deadline() -> DateTime<Utc> {
   NaiveDate::from_ymd_opt(0, 1, 1)
      .unwrap_or(NaiveDate::MIN)
      .and_time(NaiveTime::MIN)
      .and_utc()
}

/// 期限として扱える最大日時（9999-12-31T23:59:59Z）
fn max_deadline() -> DateTime<Utc> {
   NaiveDate::from_ymd_opt(9999, 12, 31)
      .and_then(|date| date.and_hms_opt(23, 59, 59))
      .unwrap_or(NaiveDateTime::MAX)
      .and_utc()
}

/// ISO-8601 形式のタイムゾーンなし日時フォーマット
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// ISO-8601 文字列を期限日時としてパースする
///
/// # 受理する形式
///
/// - オフセット付き RFC 3339（`2026-01-31T09:00:00+09:00`, `...Z`）
/// - タイムゾーンなし日時（`2026-01-31T09:00:00`, `2026-01-31 09:00:00.5`）
/// - 日付のみ（`2026-01-31`、0 時として扱う）
///
/// タイムゾーンなしの値は UTC として解釈する。年は 0〜9999 に限る。
pub fn parse_deadline(value: &str) -> Result<DateTime<Utc>, DomainError> {
   let parsed = DateTime::parse_from_rfc3339(value)
      .map(|dt| dt.with_timezone(&Utc))
      .ok()
      .or_else(|| {
         NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|naive| naive.and_utc())
      })
      .or_else(|| {
         NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
      })
      .ok_or_else(|| {
         DomainError::Validation(format!("期限日時の形式が不正です: {value}"))
      })?;

   if !(0..=9999).contains(&parsed.year()) {
      return Err(DomainError::Validation(format!(
         "期限日時が範囲外です: {value}"
      )));
   }

   Ok(parsed)
}
