//! Workout set logs — the per-exercise record captured when a session is
//! finished.
//!
//! Logs are validated as a whole submission before anything is persisted;
//! the store then writes them together with the enrollment and term
//! completion in one transaction.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// One performed set of one exercise. Planned figures come from the
/// program template and may be absent for ad-hoc work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLog {
  pub exercise_id:    Uuid,
  pub set_number:     u32,
  pub planned_reps:   Option<u32>,
  pub actual_reps:    u32,
  pub planned_weight: Option<f64>,
  pub actual_weight:  f64,
}

/// Reject zero set numbers and duplicate (exercise, set) pairs within a
/// single submission.
pub fn validate_logs(logs: &[SetLog]) -> Result<()> {
  let mut seen: HashSet<(Uuid, u32)> = HashSet::with_capacity(logs.len());
  for log in logs {
    if log.set_number == 0 {
      return Err(Error::InvalidSetNumber(log.exercise_id));
    }
    if !seen.insert((log.exercise_id, log.set_number)) {
      return Err(Error::DuplicateSet {
        exercise: log.exercise_id,
        set:      log.set_number,
      });
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn set(exercise_id: Uuid, set_number: u32) -> SetLog {
    SetLog {
      exercise_id,
      set_number,
      planned_reps: Some(8),
      actual_reps: 8,
      planned_weight: Some(60.0),
      actual_weight: 62.5,
    }
  }

  #[test]
  fn accepts_distinct_sets() {
    let squat = Uuid::new_v4();
    let bench = Uuid::new_v4();
    let logs = vec![set(squat, 1), set(squat, 2), set(bench, 1)];
    assert!(validate_logs(&logs).is_ok());
  }

  #[test]
  fn same_set_number_across_exercises_is_fine() {
    let logs = vec![set(Uuid::new_v4(), 1), set(Uuid::new_v4(), 1)];
    assert!(validate_logs(&logs).is_ok());
  }

  #[test]
  fn rejects_duplicate_set_within_exercise() {
    let squat = Uuid::new_v4();
    let logs = vec![set(squat, 1), set(squat, 1)];
    let err = validate_logs(&logs).unwrap_err();
    assert!(
      matches!(err, Error::DuplicateSet { exercise, set } if exercise == squat && set == 1)
    );
  }

  #[test]
  fn rejects_zero_set_number() {
    let logs = vec![set(Uuid::new_v4(), 0)];
    assert!(matches!(
      validate_logs(&logs),
      Err(Error::InvalidSetNumber(_))
    ));
  }

  #[test]
  fn empty_submission_is_valid() {
    assert!(validate_logs(&[]).is_ok());
  }
}
