//! # 時刻プロバイダ
//!
//! 期限ウィンドウの基準時刻を外から差し替えるための抽象。
//! 本番は [`SystemClock`]、テストは [`FixedClock`] を使う。

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// OS の現在時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 常に同じ時刻を返す
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self(now)
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.0
   }
}
