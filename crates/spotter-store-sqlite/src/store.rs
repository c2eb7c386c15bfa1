//! [`SqliteStore`] — the SQLite implementation of [`ScheduleStore`].
//!
//! Every mutating method runs as one immediate transaction inside a single
//! `conn.call` closure: checks, the capacity guard, and the row writes
//! either all commit or all roll back. Domain failures are threaded out of
//! the closure as values so the transaction drops (and rolls back) before
//! the error surfaces.

use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use rusqlite::{Connection, OptionalExtension as _, TransactionBehavior};
use uuid::Uuid;

use spotter_core::{
  enrollment::{EnrollmentStatus, Rating, TermEnrollment},
  policy::CancellationPolicy,
  program::{AssignmentStatus, ProgramAssignment},
  schedule::{self, WeekSource, WeeklyEvent},
  store::{ScheduleStore, SlotStatus, TermQuery, TermSummary},
  term::{NewTerm, Term, TermStatus},
  workout::{self, SetLog},
  Error as CoreError,
};

use crate::{
  capacity,
  encode::{
    decode_enrollment_status, decode_uuid, encode_assignment_status,
    encode_dt, encode_enrollment_status, encode_term_kind,
    encode_term_status, encode_uuid, RawAssignment, RawEnrollment, RawLog,
    RawTerm,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Spotter schedule store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  policy: CancellationPolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, policy: CancellationPolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, policy: CancellationPolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Replace the default 60-minute cancellation window.
  pub fn with_policy(mut self, policy: CancellationPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn policy(&self) -> CancellationPolicy { self.policy }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

const TERM_COLS: &str = "term_id, trainer_id, program_id, kind, start_at, \
                         duration_min, capacity, enrolled_count, status, \
                         created_at";

/// Qualified variant for joins where column names collide.
const TERM_COLS_QUALIFIED: &str =
  "terms.term_id, terms.trainer_id, terms.program_id, terms.kind, \
   terms.start_at, terms.duration_min, terms.capacity, \
   terms.enrolled_count, terms.status, terms.created_at";

const ENROLLMENT_COLS: &str = "enrollment_id, term_id, client_id, status, \
                               rating, feedback, attended_at, created_at";

fn term_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTerm> {
  Ok(RawTerm {
    term_id:        row.get(0)?,
    trainer_id:     row.get(1)?,
    program_id:     row.get(2)?,
    kind:           row.get(3)?,
    start_at:       row.get(4)?,
    duration_min:   row.get(5)?,
    capacity:       row.get(6)?,
    enrolled_count: row.get(7)?,
    status:         row.get(8)?,
    created_at:     row.get(9)?,
  })
}

fn enrollment_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<RawEnrollment> {
  Ok(RawEnrollment {
    enrollment_id: row.get(0)?,
    term_id:       row.get(1)?,
    client_id:     row.get(2)?,
    status:        row.get(3)?,
    rating:        row.get(4)?,
    feedback:      row.get(5)?,
    attended_at:   row.get(6)?,
    created_at:    row.get(7)?,
  })
}

fn query_term(
  conn: &Connection,
  term_id: &str,
) -> rusqlite::Result<Option<RawTerm>> {
  conn
    .query_row(
      &format!("SELECT {TERM_COLS} FROM terms WHERE term_id = ?1"),
      rusqlite::params![term_id],
      term_from_row,
    )
    .optional()
}

fn query_confirmed_enrollment(
  conn: &Connection,
  term_id: &str,
  client_id: &str,
) -> rusqlite::Result<Option<RawEnrollment>> {
  conn
    .query_row(
      &format!(
        "SELECT {ENROLLMENT_COLS} FROM enrollments
         WHERE term_id = ?1 AND client_id = ?2 AND status = 'confirmed'"
      ),
      rusqlite::params![term_id, client_id],
      enrollment_from_row,
    )
    .optional()
}

/// Lift a decode failure into the closure's error channel.
fn db_err(e: Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}

// ─── ScheduleStore impl ──────────────────────────────────────────────────────

impl ScheduleStore for SqliteStore {
  type Error = Error;

  // ── Terms ─────────────────────────────────────────────────────────────

  async fn create_term(
    &self,
    input: NewTerm,
    now: DateTime<Utc>,
  ) -> Result<Term> {
    input.validate(now).map_err(Error::Core)?;

    let term = Term {
      term_id:        Uuid::new_v4(),
      trainer_id:     input.trainer_id,
      program_id:     None,
      kind:           input.kind,
      start_at:       input.start_at,
      duration_min:   input.duration_min,
      capacity:       input.capacity,
      enrolled_count: 0,
      status:         TermStatus::Scheduled,
      created_at:     now,
    };

    let id_str      = encode_uuid(term.term_id);
    let trainer_str = encode_uuid(term.trainer_id);
    let kind_str    = encode_term_kind(term.kind).to_owned();
    let start_str   = encode_dt(term.start_at);
    let status_str  = encode_term_status(term.status).to_owned();
    let created_str = encode_dt(term.created_at);
    let duration    = i64::from(term.duration_min);
    let cap         = i64::from(term.capacity);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO terms (
             term_id, trainer_id, kind, start_at, duration_min,
             capacity, enrolled_count, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8)",
          rusqlite::params![
            id_str,
            trainer_str,
            kind_str,
            start_str,
            duration,
            cap,
            status_str,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(term)
  }

  async fn get_term(&self, term_id: Uuid) -> Result<Option<Term>> {
    let id_str = encode_uuid(term_id);

    let raw: Option<RawTerm> = self
      .conn
      .call(move |conn| Ok(query_term(conn, &id_str)?))
      .await?;

    raw.map(RawTerm::into_term).transpose()
  }

  async fn list_terms(
    &self,
    query: &TermQuery,
    viewer_id: Uuid,
  ) -> Result<Vec<TermSummary>> {
    let viewer_str = encode_uuid(viewer_id);
    let from_str   = query.from.map(encode_dt);
    let to_str     = query.to.map(encode_dt);
    let kind_str   = query.kind.map(encode_term_kind).map(str::to_owned);
    let status_str = query.status.map(encode_term_status).map(str::to_owned);

    let raws: Vec<(RawTerm, bool)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TERM_COLS},
                  EXISTS (
                    SELECT 1 FROM enrollments e
                    WHERE e.term_id = terms.term_id
                      AND e.client_id = ?1
                      AND e.status = 'confirmed'
                  ) AS is_enrolled
           FROM terms
           WHERE (?2 IS NULL OR start_at >= ?2)
             AND (?3 IS NULL OR start_at <  ?3)
             AND (?4 IS NULL OR kind = ?4)
             AND (?5 IS NULL OR status = ?5)
           ORDER BY start_at, term_id"
        ))?;

        let rows = stmt
          .query_map(
            rusqlite::params![
              viewer_str,
              from_str,
              to_str,
              kind_str,
              status_str,
            ],
            |row| Ok((term_from_row(row)?, row.get::<_, bool>(10)?)),
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(raw, is_enrolled)| {
        let term = raw.into_term()?;
        let slot = if term.is_full() { SlotStatus::Full } else { SlotStatus::Free };
        Ok(TermSummary { term, is_enrolled, slot })
      })
      .collect()
  }

  async fn cancel_term(
    &self,
    term_id: Uuid,
    trainer_id: Uuid,
  ) -> Result<Vec<Uuid>> {
    let id_str      = encode_uuid(term_id);
    let trainer_str = encode_uuid(trainer_id);

    let out: spotter_core::Result<Vec<String>> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(raw) = query_term(&tx, &id_str)? else {
          return Ok(Err(CoreError::TermNotFound(term_id)));
        };
        let mut term = raw.into_term().map_err(db_err)?;

        if term.trainer_id != trainer_id {
          return Ok(Err(CoreError::NotOwner {
            term: term_id,
            trainer: trainer_id,
          }));
        }
        if let Err(e) = term.cancel() {
          return Ok(Err(e));
        }

        // Collect the clients being cascaded out, for the event sink.
        let mut stmt = tx.prepare(
          "SELECT client_id FROM enrollments
           WHERE term_id = ?1 AND status = 'confirmed'
           ORDER BY created_at",
        )?;
        let affected = stmt
          .query_map(rusqlite::params![id_str], |row| row.get::<_, String>(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        drop(stmt);

        tx.execute(
          "UPDATE enrollments SET status = 'canceled_by_trainer'
           WHERE term_id = ?1 AND status = 'confirmed'",
          rusqlite::params![id_str],
        )?;
        tx.execute(
          "UPDATE terms SET status = ?2 WHERE term_id = ?1",
          rusqlite::params![id_str, encode_term_status(term.status)],
        )?;
        capacity::clear(&tx, &id_str)?;

        tx.commit()?;
        Ok(Ok(affected))
      })
      .await?;

    out
      .map_err(Error::Core)?
      .iter()
      .map(|s| decode_uuid(s))
      .collect()
  }

  async fn assign_program(
    &self,
    term_id: Uuid,
    trainer_id: Uuid,
    program_id: Uuid,
  ) -> Result<Term> {
    let id_str      = encode_uuid(term_id);
    let program_str = encode_uuid(program_id);

    let out: spotter_core::Result<(Term, Vec<String>)> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(raw) = query_term(&tx, &id_str)? else {
          return Ok(Err(CoreError::TermNotFound(term_id)));
        };
        let mut term = raw.into_term().map_err(db_err)?;

        if term.trainer_id != trainer_id {
          return Ok(Err(CoreError::NotOwner {
            term: term_id,
            trainer: trainer_id,
          }));
        }
        if let Err(e) = term.assign_program(program_id) {
          return Ok(Err(e));
        }

        tx.execute(
          "UPDATE terms SET program_id = ?2 WHERE term_id = ?1",
          rusqlite::params![id_str, program_str],
        )?;

        // Soft rule: enrolled clients should hold an active assignment for
        // the program. Violations are reported, not rejected.
        let mut stmt = tx.prepare(
          "SELECT e.client_id FROM enrollments e
           WHERE e.term_id = ?1 AND e.status = 'confirmed'
             AND NOT EXISTS (
               SELECT 1 FROM program_assignments a
               WHERE a.client_id = e.client_id
                 AND a.program_id = ?2
                 AND a.status = 'active'
             )",
        )?;
        let missing = stmt
          .query_map(rusqlite::params![id_str, program_str], |row| {
            row.get::<_, String>(0)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        drop(stmt);

        tx.commit()?;
        Ok(Ok((term, missing)))
      })
      .await?;

    let (term, missing) = out.map_err(Error::Core)?;
    for client in &missing {
      tracing::warn!(
        term = %term.term_id,
        program = %program_id,
        %client,
        "enrolled client has no active assignment for program"
      );
    }
    Ok(term)
  }

  // ── Enrollment ────────────────────────────────────────────────────────

  async fn book(
    &self,
    term_id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> Result<TermEnrollment> {
    let id_str     = encode_uuid(term_id);
    let client_str = encode_uuid(client_id);
    let now_str    = encode_dt(now);

    let out: spotter_core::Result<TermEnrollment> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(raw) = query_term(&tx, &id_str)? else {
          return Ok(Err(CoreError::TermNotFound(term_id)));
        };
        let term = raw.into_term().map_err(db_err)?;

        if let Err(e) = term.ensure_bookable(now) {
          return Ok(Err(e));
        }
        if query_confirmed_enrollment(&tx, &id_str, &client_str)?.is_some() {
          return Ok(Err(CoreError::AlreadyEnrolled {
            term:   term_id,
            client: client_id,
          }));
        }

        // Atomic compare-and-increment; a false here means the last slot
        // went to someone else.
        if !capacity::try_reserve(&tx, &id_str)? {
          return Ok(Err(CoreError::Full(term_id)));
        }

        let enrollment = TermEnrollment {
          enrollment_id: Uuid::new_v4(),
          term_id,
          client_id,
          status:        EnrollmentStatus::Confirmed,
          rating:        None,
          feedback:      None,
          attended_at:   None,
          created_at:    now,
        };

        tx.execute(
          "INSERT INTO enrollments (
             enrollment_id, term_id, client_id, status, created_at
           ) VALUES (?1, ?2, ?3, 'confirmed', ?4)",
          rusqlite::params![
            encode_uuid(enrollment.enrollment_id),
            id_str,
            client_str,
            now_str,
          ],
        )?;

        tx.commit()?;
        Ok(Ok(enrollment))
      })
      .await?;

    out.map_err(Error::Core)
  }

  async fn cancel_booking(
    &self,
    term_id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> Result<TermEnrollment> {
    let id_str     = encode_uuid(term_id);
    let client_str = encode_uuid(client_id);
    let policy     = self.policy;

    let out: spotter_core::Result<TermEnrollment> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(raw) = query_term(&tx, &id_str)? else {
          return Ok(Err(CoreError::TermNotFound(term_id)));
        };
        let term = raw.into_term().map_err(db_err)?;

        let Some(raw) = query_confirmed_enrollment(&tx, &id_str, &client_str)?
        else {
          return Ok(Err(CoreError::NotEnrolled {
            term:   term_id,
            client: client_id,
          }));
        };
        let mut enrollment = raw.into_enrollment().map_err(db_err)?;

        if !policy.can_cancel(now, term.start_at) {
          return Ok(Err(CoreError::CancellationWindowClosed {
            term:     term_id,
            deadline: policy.deadline(term.start_at),
          }));
        }
        if let Err(e) = enrollment.cancel_by_client() {
          return Ok(Err(e));
        }

        tx.execute(
          "UPDATE enrollments SET status = ?2 WHERE enrollment_id = ?1",
          rusqlite::params![
            encode_uuid(enrollment.enrollment_id),
            encode_enrollment_status(enrollment.status),
          ],
        )?;
        // The freed slot is available again immediately.
        capacity::release(&tx, &id_str)?;

        tx.commit()?;
        Ok(Ok(enrollment))
      })
      .await?;

    out.map_err(Error::Core)
  }

  // ── Read models ───────────────────────────────────────────────────────

  async fn weekly_schedule(
    &self,
    owner_id: Uuid,
    week_start: DateTime<FixedOffset>,
    now: DateTime<Utc>,
  ) -> Result<Vec<WeeklyEvent>> {
    let owner_str = encode_uuid(owner_id);
    let from_str  = encode_dt(week_start.with_timezone(&Utc));
    let to_str =
      encode_dt(week_start.with_timezone(&Utc) + chrono::Duration::days(7));

    let raws: Vec<(RawTerm, Option<String>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TERM_COLS_QUALIFIED}, e.status AS viewer_status
           FROM terms
           LEFT JOIN enrollments e
             ON e.term_id = terms.term_id
            AND e.client_id = ?1
            AND e.status IN ('confirmed', 'completed')
           WHERE (terms.trainer_id = ?1 OR e.enrollment_id IS NOT NULL)
             AND terms.start_at >= ?2
             AND terms.start_at <  ?3"
        ))?;

        let rows = stmt
          .query_map(
            rusqlite::params![owner_str, from_str, to_str],
            |row| {
              Ok((term_from_row(row)?, row.get::<_, Option<String>>(10)?))
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let rows: Vec<WeekSource> = raws
      .into_iter()
      .map(|(raw, status)| {
        Ok(WeekSource {
          term:       raw.into_term()?,
          enrollment: status
            .as_deref()
            .map(decode_enrollment_status)
            .transpose()?,
        })
      })
      .collect::<Result<_>>()?;

    Ok(schedule::project_week(
      owner_id,
      week_start,
      &rows,
      &self.policy,
      now,
    ))
  }

  // ── Session completion ────────────────────────────────────────────────

  async fn finish_workout(
    &self,
    term_id: Uuid,
    client_id: Uuid,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    logs: Vec<SetLog>,
  ) -> Result<TermEnrollment> {
    workout::validate_logs(&logs).map_err(Error::Core)?;

    let id_str      = encode_uuid(term_id);
    let client_str  = encode_uuid(client_id);
    let started_str = encode_dt(started_at);
    let ended_str   = encode_dt(ended_at);

    let out: spotter_core::Result<TermEnrollment> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(raw) = query_term(&tx, &id_str)? else {
          return Ok(Err(CoreError::TermNotFound(term_id)));
        };
        let mut term = raw.into_term().map_err(db_err)?;

        if let Err(e) = term.complete() {
          return Ok(Err(e));
        }

        let Some(raw) = query_confirmed_enrollment(&tx, &id_str, &client_str)?
        else {
          return Ok(Err(CoreError::NotEnrolled {
            term:   term_id,
            client: client_id,
          }));
        };
        let mut enrollment = raw.into_enrollment().map_err(db_err)?;
        if let Err(e) = enrollment.complete(ended_at) {
          return Ok(Err(e));
        }

        for log in &logs {
          tx.execute(
            "INSERT INTO exercise_logs (
               log_id, term_id, client_id, exercise_id, set_number,
               planned_reps, actual_reps, planned_weight, actual_weight
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
              encode_uuid(Uuid::new_v4()),
              id_str,
              client_str,
              encode_uuid(log.exercise_id),
              i64::from(log.set_number),
              log.planned_reps.map(i64::from),
              i64::from(log.actual_reps),
              log.planned_weight,
              log.actual_weight,
            ],
          )?;
        }

        tx.execute(
          "UPDATE enrollments SET status = ?2, attended_at = ?3
           WHERE enrollment_id = ?1",
          rusqlite::params![
            encode_uuid(enrollment.enrollment_id),
            encode_enrollment_status(enrollment.status),
            ended_str,
          ],
        )?;
        tx.execute(
          "UPDATE terms
           SET status = ?2, session_started_at = ?3, session_ended_at = ?4
           WHERE term_id = ?1",
          rusqlite::params![
            id_str,
            encode_term_status(term.status),
            started_str,
            ended_str,
          ],
        )?;

        tx.commit()?;
        Ok(Ok(enrollment))
      })
      .await?;

    out.map_err(Error::Core)
  }

  async fn exercise_logs(&self, term_id: Uuid) -> Result<Vec<SetLog>> {
    let id_str = encode_uuid(term_id);

    let raws: Vec<RawLog> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT exercise_id, set_number, planned_reps, actual_reps,
                  planned_weight, actual_weight
           FROM exercise_logs
           WHERE term_id = ?1
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], |row| {
            Ok(RawLog {
              exercise_id:    row.get(0)?,
              set_number:     row.get(1)?,
              planned_reps:   row.get(2)?,
              actual_reps:    row.get(3)?,
              planned_weight: row.get(4)?,
              actual_weight:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLog::into_log).collect()
  }

  // ── Rating ────────────────────────────────────────────────────────────

  async fn rate(
    &self,
    term_id: Uuid,
    trainer_id: Uuid,
    client_id: Uuid,
    rating: Rating,
    feedback: Option<String>,
  ) -> Result<TermEnrollment> {
    let id_str     = encode_uuid(term_id);
    let client_str = encode_uuid(client_id);

    let out: spotter_core::Result<TermEnrollment> = self
      .conn
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(raw) = query_term(&tx, &id_str)? else {
          return Ok(Err(CoreError::TermNotFound(term_id)));
        };
        let term = raw.into_term().map_err(db_err)?;

        if term.trainer_id != trainer_id {
          return Ok(Err(CoreError::NotOwner {
            term: term_id,
            trainer: trainer_id,
          }));
        }

        // Latest enrollment for this client on this term; earlier canceled
        // rows are history, not rating targets.
        let raw = tx
          .query_row(
            &format!(
              "SELECT {ENROLLMENT_COLS} FROM enrollments
               WHERE term_id = ?1 AND client_id = ?2
               ORDER BY created_at DESC, enrollment_id DESC
               LIMIT 1"
            ),
            rusqlite::params![id_str, client_str],
            enrollment_from_row,
          )
          .optional()?;
        let Some(raw) = raw else {
          return Ok(Err(CoreError::NotEnrolled {
            term:   term_id,
            client: client_id,
          }));
        };
        let mut enrollment = raw.into_enrollment().map_err(db_err)?;

        if let Err(e) = enrollment.rate(rating, feedback) {
          return Ok(Err(e));
        }

        tx.execute(
          "UPDATE enrollments SET rating = ?2, feedback = ?3
           WHERE enrollment_id = ?1",
          rusqlite::params![
            encode_uuid(enrollment.enrollment_id),
            i64::from(rating.value()),
            enrollment.feedback,
          ],
        )?;

        tx.commit()?;
        Ok(Ok(enrollment))
      })
      .await?;

    out.map_err(Error::Core)
  }

  async fn unrated(&self, term_id: Uuid) -> Result<Vec<TermEnrollment>> {
    let id_str = encode_uuid(term_id);

    let raws: Vec<RawEnrollment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ENROLLMENT_COLS} FROM enrollments
           WHERE term_id = ?1 AND status = 'completed' AND rating IS NULL
           ORDER BY created_at, enrollment_id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], enrollment_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEnrollment::into_enrollment).collect()
  }

  // ── Program assignments ───────────────────────────────────────────────

  async fn assign_program_to_client(
    &self,
    program_id: Uuid,
    client_id: Uuid,
    now: DateTime<Utc>,
  ) -> Result<ProgramAssignment> {
    let assignment = ProgramAssignment {
      assignment_id: Uuid::new_v4(),
      program_id,
      client_id,
      status: AssignmentStatus::Active,
      assigned_at: now,
    };

    let id_str       = encode_uuid(assignment.assignment_id);
    let program_str  = encode_uuid(program_id);
    let client_str   = encode_uuid(client_id);
    let status_str   = encode_assignment_status(assignment.status).to_owned();
    let assigned_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO program_assignments (
             assignment_id, program_id, client_id, status, assigned_at
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_str,
            program_str,
            client_str,
            status_str,
            assigned_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(assignment)
  }

  async fn set_assignment_status(
    &self,
    assignment_id: Uuid,
    status: AssignmentStatus,
  ) -> Result<ProgramAssignment> {
    let id_str     = encode_uuid(assignment_id);
    let status_str = encode_assignment_status(status).to_owned();

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE program_assignments SET status = ?2 WHERE assignment_id = ?1",
          rusqlite::params![id_str, status_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        conn
          .query_row(
            "SELECT assignment_id, program_id, client_id, status, assigned_at
             FROM program_assignments WHERE assignment_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawAssignment {
                assignment_id: row.get(0)?,
                program_id:    row.get(1)?,
                client_id:     row.get(2)?,
                status:        row.get(3)?,
                assigned_at:   row.get(4)?,
              })
            },
          )
          .optional()
          .map_err(Into::into)
      })
      .await?;

    raw
      .ok_or(Error::Core(CoreError::AssignmentNotFound(assignment_id)))?
      .into_assignment()
  }

  async fn client_assignments(
    &self,
    client_id: Uuid,
  ) -> Result<Vec<ProgramAssignment>> {
    let client_str = encode_uuid(client_id);

    let raws: Vec<RawAssignment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT assignment_id, program_id, client_id, status, assigned_at
           FROM program_assignments
           WHERE client_id = ?1
           ORDER BY assigned_at DESC, assignment_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![client_str], |row| {
            Ok(RawAssignment {
              assignment_id: row.get(0)?,
              program_id:    row.get(1)?,
              client_id:     row.get(2)?,
              status:        row.get(3)?,
              assigned_at:   row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }
}
