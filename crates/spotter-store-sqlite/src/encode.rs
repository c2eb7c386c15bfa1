//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 UTC strings, so lexicographic
//! comparison in SQL matches chronological order. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use spotter_core::{
  enrollment::{EnrollmentStatus, Rating, TermEnrollment},
  program::{AssignmentStatus, ProgramAssignment},
  term::{Term, TermKind, TermStatus},
  workout::SetLog,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {s:?}: {e}")))
}

// ─── TermKind ────────────────────────────────────────────────────────────────

pub fn encode_term_kind(k: TermKind) -> &'static str {
  match k {
    TermKind::Individual => "individual",
    TermKind::Group => "group",
  }
}

pub fn decode_term_kind(s: &str) -> Result<TermKind> {
  match s {
    "individual" => Ok(TermKind::Individual),
    "group" => Ok(TermKind::Group),
    other => Err(Error::Decode(format!("unknown term kind: {other:?}"))),
  }
}

// ─── TermStatus ──────────────────────────────────────────────────────────────

pub fn encode_term_status(s: TermStatus) -> &'static str {
  match s {
    TermStatus::Scheduled => "scheduled",
    TermStatus::Canceled => "canceled",
    TermStatus::Completed => "completed",
  }
}

pub fn decode_term_status(s: &str) -> Result<TermStatus> {
  match s {
    "scheduled" => Ok(TermStatus::Scheduled),
    "canceled" => Ok(TermStatus::Canceled),
    "completed" => Ok(TermStatus::Completed),
    other => Err(Error::Decode(format!("unknown term status: {other:?}"))),
  }
}

// ─── EnrollmentStatus ────────────────────────────────────────────────────────

pub fn encode_enrollment_status(s: EnrollmentStatus) -> &'static str {
  match s {
    EnrollmentStatus::Confirmed => "confirmed",
    EnrollmentStatus::CanceledByClient => "canceled_by_client",
    EnrollmentStatus::CanceledByTrainer => "canceled_by_trainer",
    EnrollmentStatus::Completed => "completed",
  }
}

pub fn decode_enrollment_status(s: &str) -> Result<EnrollmentStatus> {
  match s {
    "confirmed" => Ok(EnrollmentStatus::Confirmed),
    "canceled_by_client" => Ok(EnrollmentStatus::CanceledByClient),
    "canceled_by_trainer" => Ok(EnrollmentStatus::CanceledByTrainer),
    "completed" => Ok(EnrollmentStatus::Completed),
    other => {
      Err(Error::Decode(format!("unknown enrollment status: {other:?}")))
    }
  }
}

// ─── AssignmentStatus ────────────────────────────────────────────────────────

pub fn encode_assignment_status(s: AssignmentStatus) -> &'static str {
  match s {
    AssignmentStatus::Active => "active",
    AssignmentStatus::Paused => "paused",
    AssignmentStatus::Completed => "completed",
    AssignmentStatus::Canceled => "canceled",
  }
}

pub fn decode_assignment_status(s: &str) -> Result<AssignmentStatus> {
  match s {
    "active" => Ok(AssignmentStatus::Active),
    "paused" => Ok(AssignmentStatus::Paused),
    "completed" => Ok(AssignmentStatus::Completed),
    "canceled" => Ok(AssignmentStatus::Canceled),
    other => {
      Err(Error::Decode(format!("unknown assignment status: {other:?}")))
    }
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `terms` row.
pub struct RawTerm {
  pub term_id:        String,
  pub trainer_id:     String,
  pub program_id:     Option<String>,
  pub kind:           String,
  pub start_at:       String,
  pub duration_min:   i64,
  pub capacity:       i64,
  pub enrolled_count: i64,
  pub status:         String,
  pub created_at:     String,
}

impl RawTerm {
  pub fn into_term(self) -> Result<Term> {
    Ok(Term {
      term_id:        decode_uuid(&self.term_id)?,
      trainer_id:     decode_uuid(&self.trainer_id)?,
      program_id:     self.program_id.as_deref().map(decode_uuid).transpose()?,
      kind:           decode_term_kind(&self.kind)?,
      start_at:       decode_dt(&self.start_at)?,
      duration_min:   self.duration_min as u32,
      capacity:       self.capacity as u32,
      enrolled_count: self.enrolled_count as u32,
      status:         decode_term_status(&self.status)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `enrollments` row.
pub struct RawEnrollment {
  pub enrollment_id: String,
  pub term_id:       String,
  pub client_id:     String,
  pub status:        String,
  pub rating:        Option<i64>,
  pub feedback:      Option<String>,
  pub attended_at:   Option<String>,
  pub created_at:    String,
}

impl RawEnrollment {
  pub fn into_enrollment(self) -> Result<TermEnrollment> {
    let rating = self
      .rating
      .map(|r| Rating::new(r as u8))
      .transpose()
      .map_err(Error::Core)?;

    Ok(TermEnrollment {
      enrollment_id: decode_uuid(&self.enrollment_id)?,
      term_id:       decode_uuid(&self.term_id)?,
      client_id:     decode_uuid(&self.client_id)?,
      status:        decode_enrollment_status(&self.status)?,
      rating,
      feedback:      self.feedback,
      attended_at:   self.attended_at.as_deref().map(decode_dt).transpose()?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `program_assignments` row.
pub struct RawAssignment {
  pub assignment_id: String,
  pub program_id:    String,
  pub client_id:     String,
  pub status:        String,
  pub assigned_at:   String,
}

impl RawAssignment {
  pub fn into_assignment(self) -> Result<ProgramAssignment> {
    Ok(ProgramAssignment {
      assignment_id: decode_uuid(&self.assignment_id)?,
      program_id:    decode_uuid(&self.program_id)?,
      client_id:     decode_uuid(&self.client_id)?,
      status:        decode_assignment_status(&self.status)?,
      assigned_at:   decode_dt(&self.assigned_at)?,
    })
  }
}

/// Raw values read directly from an `exercise_logs` row.
pub struct RawLog {
  pub exercise_id:    String,
  pub set_number:     i64,
  pub planned_reps:   Option<i64>,
  pub actual_reps:    i64,
  pub planned_weight: Option<f64>,
  pub actual_weight:  f64,
}

impl RawLog {
  pub fn into_log(self) -> Result<SetLog> {
    Ok(SetLog {
      exercise_id:    decode_uuid(&self.exercise_id)?,
      set_number:     self.set_number as u32,
      planned_reps:   self.planned_reps.map(|r| r as u32),
      actual_reps:    self.actual_reps as u32,
      planned_weight: self.planned_weight,
      actual_weight:  self.actual_weight,
    })
  }
}
