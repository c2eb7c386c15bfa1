//! Program assignments — the link between a catalog program and a client.
//!
//! Program content (exercises, set/rep templates) lives in an external
//! catalog and is referenced by id only. Assignments exist so the trainer
//! can attach a program a client is actually on to a term; that rule is
//! soft and enforced at assignment time, never retroactively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
  Active,
  Paused,
  Completed,
  Canceled,
}

/// Binds a catalog program to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramAssignment {
  pub assignment_id: Uuid,
  pub program_id:    Uuid,
  pub client_id:     Uuid,
  pub status:        AssignmentStatus,
  pub assigned_at:   DateTime<Utc>,
}

impl ProgramAssignment {
  pub fn is_active(&self) -> bool {
    self.status == AssignmentStatus::Active
  }
}
