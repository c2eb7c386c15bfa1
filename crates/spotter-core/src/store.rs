//! The `ScheduleStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `spotter-store-sqlite`). The API crate depends on this abstraction, not
//! on any concrete backend. Every mutating method is one short, bounded
//! transaction on the backend; no method performs external I/O.

use std::future::Future;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  enrollment::{Rating, TermEnrollment},
  program::{AssignmentStatus, ProgramAssignment},
  schedule::WeeklyEvent,
  term::{NewTerm, Term, TermKind, TermStatus},
  workout::SetLog,
};

// ─── Query and summary types ─────────────────────────────────────────────────

/// Filters for [`ScheduleStore::list_terms`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermQuery {
  /// Inclusive lower bound on `start_at`.
  pub from:   Option<DateTime<Utc>>,
  /// Exclusive upper bound on `start_at`.
  pub to:     Option<DateTime<Utc>>,
  pub kind:   Option<TermKind>,
  pub status: Option<TermStatus>,
}

/// Whether a scheduled term still has room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
  Free,
  Full,
}

/// A term annotated for a specific viewer: whether they hold a confirmed
/// enrollment, and whether any room is left.
#[derive(Debug, Clone, Serialize)]
pub struct TermSummary {
  pub term:        Term,
  pub is_enrolled: bool,
  pub slot:        SlotStatus,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Spotter schedule store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (tokio with `axum`). The associated error
/// must convert into [`crate::Error`] so transports can classify every
/// failure by [`crate::ErrorKind`].
pub trait ScheduleStore: Send + Sync {
  type Error: std::error::Error
    + Into<crate::Error>
    + Send
    + Sync
    + 'static;

  // ── Terms ─────────────────────────────────────────────────────────────

  /// Validate and persist a new scheduled term.
  fn create_term(
    &self,
    input: NewTerm,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Term, Self::Error>> + Send + '_;

  /// Retrieve a term by id. Returns `None` if not found.
  fn get_term(
    &self,
    term_id: Uuid,
  ) -> impl Future<Output = Result<Option<Term>, Self::Error>> + Send + '_;

  /// List terms matching `query`, annotated for `viewer_id`.
  fn list_terms<'a>(
    &'a self,
    query: &'a TermQuery,
    viewer_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TermSummary>, Self::Error>> + Send + 'a;

  /// Cancel a term. Only the owning trainer may do this; every confirmed
  /// enrollment cascades to canceled-by-trainer in the same transaction.
  /// Returns the clients whose enrollments were cascaded.
  fn cancel_term(
    &self,
    term_id: Uuid,
    trainer_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + '_;

  /// Attach a catalog program to a term. Owner-checked; rejected once the
  /// term is terminal. Existing enrollments are not re-validated.
  fn assign_program(
    &self,
    term_id: Uuid,
    trainer_id: Uuid,
    program_id: Uuid,
  ) -> impl Future<Output = Result<Term, Self::Error>> + Send + '_;

  // ── Enrollment ────────────────────────────────────────────────────────

  /// Book `client_id` onto a term. One transaction: term lookup, closed
  /// check, duplicate check, atomic capacity reservation, enrollment
  /// insert. A failure after the reservation rolls the whole thing back —
  /// capacity never leaks.
  fn book(
    &self,
    term_id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<TermEnrollment, Self::Error>> + Send + '_;

  /// Cancel the client's confirmed enrollment, subject to the cancellation
  /// window. Frees the reserved capacity immediately.
  fn cancel_booking(
    &self,
    term_id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<TermEnrollment, Self::Error>> + Send + '_;

  // ── Read models ───────────────────────────────────────────────────────

  /// Project the owner's week starting at the viewer-local `week_start`.
  /// Pure read; calling twice with unchanged state yields identical
  /// output.
  fn weekly_schedule(
    &self,
    owner_id: Uuid,
    week_start: DateTime<FixedOffset>,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<WeeklyEvent>, Self::Error>> + Send + '_;

  // ── Session completion ────────────────────────────────────────────────

  /// Finish the term's workout for `client_id`: persist all set logs,
  /// complete the enrollment with `attended_at = ended_at`, and complete
  /// the term — atomically. A term can be finished once.
  fn finish_workout(
    &self,
    term_id: Uuid,
    client_id: Uuid,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    logs: Vec<SetLog>,
  ) -> impl Future<Output = Result<TermEnrollment, Self::Error>> + Send + '_;

  /// All set logs recorded for a term, in insertion order.
  fn exercise_logs(
    &self,
    term_id: Uuid,
  ) -> impl Future<Output = Result<Vec<SetLog>, Self::Error>> + Send + '_;

  // ── Rating ────────────────────────────────────────────────────────────

  /// Rate a completed enrollment, once. Re-rating fails with
  /// `AlreadyRated`; the original rating is never overwritten.
  fn rate(
    &self,
    term_id: Uuid,
    trainer_id: Uuid,
    client_id: Uuid,
    rating: Rating,
    feedback: Option<String>,
  ) -> impl Future<Output = Result<TermEnrollment, Self::Error>> + Send + '_;

  /// Completed enrollments for the term that still lack a rating — the
  /// trainer's pending-ratings queue.
  fn unrated(
    &self,
    term_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TermEnrollment>, Self::Error>> + Send + '_;

  // ── Program assignments ───────────────────────────────────────────────

  /// Put a client on a catalog program (status starts active).
  fn assign_program_to_client(
    &self,
    program_id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> impl Future<Output = Result<ProgramAssignment, Self::Error>> + Send + '_;

  /// Move an assignment to a new status (pause, complete, cancel).
  fn set_assignment_status(
    &self,
    assignment_id: Uuid,
    status: AssignmentStatus,
  ) -> impl Future<Output = Result<ProgramAssignment, Self::Error>> + Send + '_;

  /// All assignments for a client, newest first.
  fn client_assignments(
    &self,
    client_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ProgramAssignment>, Self::Error>> + Send + '_;
}
