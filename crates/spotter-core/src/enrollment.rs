//! TermEnrollment — a client's claim on a term.
//!
//! Cancellation never mutates an old enrollment back to life: re-booking
//! after a cancellation creates a new row, preserving history. At most one
//! `Confirmed` enrollment exists per (term, client) at any time; the store
//! backs this up with a partial unique index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Lifecycle state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
  Confirmed,
  CanceledByClient,
  CanceledByTrainer,
  Completed,
}

/// A trainer's 1–10 score for a completed session, validated at
/// construction so out-of-range values never reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
  pub fn new(value: u8) -> Result<Self> {
    if (1..=10).contains(&value) {
      Ok(Self(value))
    } else {
      Err(Error::RatingOutOfRange(value))
    }
  }

  pub fn value(self) -> u8 { self.0 }
}

/// A client's claim on a term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermEnrollment {
  pub enrollment_id: Uuid,
  pub term_id:       Uuid,
  pub client_id:     Uuid,
  pub status:        EnrollmentStatus,
  pub rating:        Option<Rating>,
  pub feedback:      Option<String>,
  pub attended_at:   Option<DateTime<Utc>>,
  pub created_at:    DateTime<Utc>,
}

impl TermEnrollment {
  fn ensure_confirmed(&self) -> Result<()> {
    if self.status != EnrollmentStatus::Confirmed {
      return Err(Error::NotEnrolled {
        term:   self.term_id,
        client: self.client_id,
      });
    }
    Ok(())
  }

  /// The owning client withdraws. Window enforcement is the caller's job;
  /// this guards only the state machine.
  pub fn cancel_by_client(&mut self) -> Result<()> {
    self.ensure_confirmed()?;
    self.status = EnrollmentStatus::CanceledByClient;
    Ok(())
  }

  /// Cascade path for trainer-side term cancellation.
  pub fn cancel_by_trainer(&mut self) -> Result<()> {
    self.ensure_confirmed()?;
    self.status = EnrollmentStatus::CanceledByTrainer;
    Ok(())
  }

  /// Session-finish path; records when the client attended.
  pub fn complete(&mut self, attended_at: DateTime<Utc>) -> Result<()> {
    self.ensure_confirmed()?;
    self.status = EnrollmentStatus::Completed;
    self.attended_at = Some(attended_at);
    Ok(())
  }

  /// Attach the trainer's rating. Only a completed enrollment can be
  /// rated, and only once — re-rating is rejected, not overwritten.
  pub fn rate(
    &mut self,
    rating: Rating,
    feedback: Option<String>,
  ) -> Result<()> {
    if self.status != EnrollmentStatus::Completed {
      return Err(Error::NotCompleted {
        term:   self.term_id,
        client: self.client_id,
      });
    }
    if self.rating.is_some() {
      return Err(Error::AlreadyRated {
        term:   self.term_id,
        client: self.client_id,
      });
    }
    self.rating = Some(rating);
    self.feedback = feedback;
    Ok(())
  }
}
