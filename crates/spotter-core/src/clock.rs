//! Injectable time source.
//!
//! Every operation that reasons about "now" (booking cutoffs, the
//! cancellation window, term validation) receives its timestamp from a
//! [`Clock`] rather than calling `Utc::now()` inline, so the whole engine is
//! testable with pinned time.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock pinned to a fixed instant; test helper.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> { self.0 }
}
