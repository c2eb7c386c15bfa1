//! SQL schema for the Spotter SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS terms (
    term_id            TEXT PRIMARY KEY,
    trainer_id         TEXT NOT NULL,
    program_id         TEXT,
    kind               TEXT NOT NULL,   -- 'individual' | 'group'
    start_at           TEXT NOT NULL,   -- ISO 8601 UTC
    duration_min       INTEGER NOT NULL CHECK (duration_min > 0),
    capacity           INTEGER NOT NULL CHECK (capacity > 0),
    enrolled_count     INTEGER NOT NULL DEFAULT 0
                       CHECK (enrolled_count >= 0 AND enrolled_count <= capacity),
    status             TEXT NOT NULL DEFAULT 'scheduled',
                       -- 'scheduled' | 'canceled' | 'completed'
    session_started_at TEXT,
    session_ended_at   TEXT,
    created_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS enrollments (
    enrollment_id TEXT PRIMARY KEY,
    term_id       TEXT NOT NULL REFERENCES terms(term_id),
    client_id     TEXT NOT NULL,
    status        TEXT NOT NULL,
                  -- 'confirmed' | 'canceled_by_client'
                  -- | 'canceled_by_trainer' | 'completed'
    rating        INTEGER CHECK (rating BETWEEN 1 AND 10),
    feedback      TEXT,
    attended_at   TEXT,
    created_at    TEXT NOT NULL
);

-- Store-level backstop for the in-process invariant: at most one
-- confirmed enrollment per (term, client). Cancellations keep their rows,
-- so history survives re-booking.
CREATE UNIQUE INDEX IF NOT EXISTS enrollments_confirmed_uniq
    ON enrollments(term_id, client_id) WHERE status = 'confirmed';

-- Written once, by finish_workout, in the same transaction that completes
-- the term. Never updated.
CREATE TABLE IF NOT EXISTS exercise_logs (
    log_id         TEXT PRIMARY KEY,
    term_id        TEXT NOT NULL REFERENCES terms(term_id),
    client_id      TEXT NOT NULL,
    exercise_id    TEXT NOT NULL,
    set_number     INTEGER NOT NULL CHECK (set_number > 0),
    planned_reps   INTEGER,
    actual_reps    INTEGER NOT NULL,
    planned_weight REAL,
    actual_weight  REAL NOT NULL,
    UNIQUE (term_id, exercise_id, set_number)
);

CREATE TABLE IF NOT EXISTS program_assignments (
    assignment_id TEXT PRIMARY KEY,
    program_id    TEXT NOT NULL,
    client_id     TEXT NOT NULL,
    status        TEXT NOT NULL DEFAULT 'active',
                  -- 'active' | 'paused' | 'completed' | 'canceled'
    assigned_at   TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS terms_trainer_idx      ON terms(trainer_id);
CREATE INDEX IF NOT EXISTS terms_start_idx        ON terms(start_at);
CREATE INDEX IF NOT EXISTS enrollments_term_idx   ON enrollments(term_id);
CREATE INDEX IF NOT EXISTS enrollments_client_idx ON enrollments(client_id);
CREATE INDEX IF NOT EXISTS logs_term_idx          ON exercise_logs(term_id);
CREATE INDEX IF NOT EXISTS assignments_client_idx ON program_assignments(client_id);

PRAGMA user_version = 1;
";
