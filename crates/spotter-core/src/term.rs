//! Term — a bookable (or trainer-only) training time slot.
//!
//! Status is tagged, never a pair of booleans, so a term that is both
//! canceled and completed is unrepresentable. All transitions go through
//! guarded methods; the store persists whatever those methods accept and
//! nothing else.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Whether a term is a one-on-one slot or a group class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
  Individual,
  Group,
}

/// Lifecycle state of a term. `Canceled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermStatus {
  Scheduled,
  Canceled,
  Completed,
}

impl TermStatus {
  pub fn is_terminal(self) -> bool { !matches!(self, Self::Scheduled) }
}

/// A scheduled training slot owned by a single trainer.
///
/// `enrolled_count` is maintained exclusively by the store's capacity
/// guard; nothing in this crate ever writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
  pub term_id:        Uuid,
  pub trainer_id:     Uuid,
  /// Catalog program attached by the trainer; absent until assigned.
  pub program_id:     Option<Uuid>,
  pub kind:           TermKind,
  pub start_at:       DateTime<Utc>,
  pub duration_min:   u32,
  pub capacity:       u32,
  pub enrolled_count: u32,
  pub status:         TermStatus,
  pub created_at:     DateTime<Utc>,
}

impl Term {
  pub fn end_at(&self) -> DateTime<Utc> {
    self.start_at + Duration::minutes(i64::from(self.duration_min))
  }

  pub fn is_full(&self) -> bool { self.enrolled_count >= self.capacity }

  /// Whether a booking may still attach: the term must be scheduled and
  /// must not have started yet.
  pub fn ensure_bookable(&self, now: DateTime<Utc>) -> Result<()> {
    if self.status.is_terminal() || self.start_at <= now {
      return Err(Error::TermClosed(self.term_id));
    }
    Ok(())
  }

  /// Trainer-side cancellation. Terminal states reject.
  pub fn cancel(&mut self) -> Result<()> {
    if self.status.is_terminal() {
      return Err(Error::AlreadyTerminal(self.term_id));
    }
    self.status = TermStatus::Canceled;
    Ok(())
  }

  /// Completion via the workout recorder. Distinguishes "already finished"
  /// from "canceled" so callers can report the right conflict.
  pub fn complete(&mut self) -> Result<()> {
    match self.status {
      TermStatus::Scheduled => {
        self.status = TermStatus::Completed;
        Ok(())
      }
      TermStatus::Completed => Err(Error::AlreadyCompleted(self.term_id)),
      TermStatus::Canceled => Err(Error::TermClosed(self.term_id)),
    }
  }

  /// Attach (or replace) the catalog program. Allowed only while the term
  /// is still scheduled; existing enrollments are not re-validated.
  pub fn assign_program(&mut self, program_id: Uuid) -> Result<()> {
    if self.status.is_terminal() {
      return Err(Error::AlreadyTerminal(self.term_id));
    }
    self.program_id = Some(program_id);
    Ok(())
  }
}

/// Input to [`crate::store::ScheduleStore::create_term`].
/// `term_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTerm {
  pub trainer_id:   Uuid,
  pub kind:         TermKind,
  pub start_at:     DateTime<Utc>,
  pub duration_min: u32,
  pub capacity:     u32,
}

impl NewTerm {
  /// Shape and range checks; nothing is persisted when this fails.
  pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
    if self.start_at < now {
      return Err(Error::StartInPast(self.start_at));
    }
    if self.duration_min == 0 {
      return Err(Error::InvalidDuration);
    }
    if self.capacity == 0 {
      return Err(Error::InvalidCapacity);
    }
    if self.kind == TermKind::Individual && self.capacity != 1 {
      return Err(Error::IndividualCapacity(self.capacity));
    }
    Ok(())
  }
}
