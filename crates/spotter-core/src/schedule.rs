//! Weekly schedule projection — the read model shared by trainer and
//! client views.
//!
//! Storage is UTC throughout; the viewer's local week boundary arrives as
//! a `DateTime<FixedOffset>` (their Monday 00:00), and conversion to local
//! day-of-week and time-of-day happens only here, at the read edge. The
//! projection is pure and deterministic: same inputs, same output, in the
//! same order.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  enrollment::EnrollmentStatus,
  policy::CancellationPolicy,
  term::{Term, TermKind, TermStatus},
};

/// How the viewer relates to a projected term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewerRole {
  Trainer,
  Client,
}

/// One term as it appears in a viewer's week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEvent {
  pub term_id:     Uuid,
  pub program_id:  Option<Uuid>,
  pub kind:        TermKind,
  /// Monday = 0 .. Sunday = 6, in the viewer's local week.
  pub day:         u8,
  pub starts_local: NaiveTime,
  pub ends_local:  NaiveTime,
  pub role:        ViewerRole,
  pub status:      TermStatus,
  /// Whether the viewer could still cancel their booking right now.
  pub cancelable:  bool,
}

/// A term paired with the viewer's own enrollment status on it, if any.
/// The raw material the store hands to [`project_week`].
#[derive(Debug, Clone)]
pub struct WeekSource {
  pub term:       Term,
  pub enrollment: Option<EnrollmentStatus>,
}

/// Build the weekly view for `owner_id` over `[week_start, week_start + 7d)`.
///
/// Rows outside the window or invisible to the owner (neither their own
/// term nor one they are enrolled in) are skipped, so callers may pass a
/// coarse superset.
pub fn project_week(
  owner_id: Uuid,
  week_start: DateTime<FixedOffset>,
  rows: &[WeekSource],
  policy: &CancellationPolicy,
  now: DateTime<Utc>,
) -> Vec<WeeklyEvent> {
  let offset = *week_start.offset();
  let window_start = week_start.with_timezone(&Utc);
  let window_end = window_start + Duration::days(7);

  let mut events: Vec<(DateTime<Utc>, WeeklyEvent)> = rows
    .iter()
    .filter(|row| {
      row.term.start_at >= window_start && row.term.start_at < window_end
    })
    .filter_map(|row| {
      let term = &row.term;
      let role = if term.trainer_id == owner_id {
        ViewerRole::Trainer
      } else if row.enrollment.is_some() {
        ViewerRole::Client
      } else {
        return None;
      };

      let local_start = term.start_at.with_timezone(&offset);
      let local_end = term.end_at().with_timezone(&offset);
      let day = (local_start.date_naive() - week_start.date_naive())
        .num_days()
        .clamp(0, 6) as u8;

      let cancelable = role == ViewerRole::Client
        && row.enrollment == Some(EnrollmentStatus::Confirmed)
        && term.status == TermStatus::Scheduled
        && policy.can_cancel(now, term.start_at);

      Some((term.start_at, WeeklyEvent {
        term_id: term.term_id,
        program_id: term.program_id,
        kind: term.kind,
        day,
        starts_local: local_start.time(),
        ends_local: local_end.time(),
        role,
        status: term.status,
        cancelable,
      }))
    })
    .collect();

  // Deterministic order: start instant, then id as the tie-breaker.
  events.sort_by_key(|(start_at, e)| (*start_at, e.term_id));
  events.into_iter().map(|(_, e)| e).collect()
}
