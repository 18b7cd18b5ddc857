//! Wall-clock abstraction so timestamp capture can be driven from tests

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of ISO-8601 timestamps
pub trait Clock: Send + Sync {
  /// Current instant in UTC
  fn now(&self) -> DateTime<Utc>;

  /// Current instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`
  fn now_iso(&self) -> String {
    iso_timestamp(self.now())
  }
}

/// Production clock using actual system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

/// Millisecond-precision UTC timestamp with a `Z` suffix
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
