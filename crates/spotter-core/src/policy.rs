//! Cancellation policy — the time-window rule protecting a trainer's
//! schedule.
//!
//! Pure; no side effects. The store evaluates it inside the cancel-booking
//! transaction with the caller-supplied `now`.

use chrono::{DateTime, Duration, Utc};

/// Decides whether a client may still cancel an enrollment.
///
/// Cancellation is permitted only while `start_at - now >= window`; exactly
/// at or inside the window it is refused.
#[derive(Debug, Clone, Copy)]
pub struct CancellationPolicy {
  window_min: i64,
}

impl Default for CancellationPolicy {
  fn default() -> Self { Self { window_min: 60 } }
}

impl CancellationPolicy {
  pub fn with_window_min(window_min: i64) -> Self { Self { window_min } }

  pub fn window(&self) -> Duration { Duration::minutes(self.window_min) }

  /// The last instant at which cancellation is still allowed.
  pub fn deadline(&self, start_at: DateTime<Utc>) -> DateTime<Utc> {
    start_at - self.window()
  }

  pub fn can_cancel(
    &self,
    now: DateTime<Utc>,
    start_at: DateTime<Utc>,
  ) -> bool {
    start_at - now >= self.window()
  }
}
