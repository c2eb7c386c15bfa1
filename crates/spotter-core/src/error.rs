//! Error types for `spotter-core`.
//!
//! Every failure carries an [`ErrorKind`] so transports can map it to an
//! appropriate surface (HTTP status, retry decision) without matching on
//! individual variants.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Broad classification of a domain failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Bad shape or range; rejected before anything is persisted.
  Validation,
  /// Expected contention; recoverable by the caller picking another slot.
  Conflict,
  /// Stale or unknown reference.
  NotFound,
  /// Actor lacks rights over the term or enrollment.
  Authorization,
  /// Storage or serialization failure; retriable at the transport layer.
  Storage,
}

#[derive(Debug, Error)]
pub enum Error {
  // ── Validation ────────────────────────────────────────────────────────
  #[error("term start {0} is in the past")]
  StartInPast(DateTime<Utc>),

  #[error("term duration must be positive")]
  InvalidDuration,

  #[error("term capacity must be positive")]
  InvalidCapacity,

  #[error("individual terms must have capacity 1, got {0}")]
  IndividualCapacity(u32),

  #[error("rating must be within 1..=10, got {0}")]
  RatingOutOfRange(u8),

  #[error("set number must be positive for exercise {0}")]
  InvalidSetNumber(Uuid),

  #[error("duplicate set {set} for exercise {exercise}")]
  DuplicateSet { exercise: Uuid, set: u32 },

  // ── Conflict ──────────────────────────────────────────────────────────
  #[error("term {0} is full")]
  Full(Uuid),

  #[error("client {client} is already enrolled in term {term}")]
  AlreadyEnrolled { term: Uuid, client: Uuid },

  #[error("term {0} is canceled or completed")]
  TermClosed(Uuid),

  #[error("term {0} is already in a terminal state")]
  AlreadyTerminal(Uuid),

  #[error("term {0} is already completed")]
  AlreadyCompleted(Uuid),

  #[error("enrollment of client {client} in term {term} is already rated")]
  AlreadyRated { term: Uuid, client: Uuid },

  #[error("enrollment of client {client} in term {term} is not completed")]
  NotCompleted { term: Uuid, client: Uuid },

  #[error("cancellation window for term {term} closed at {deadline}")]
  CancellationWindowClosed { term: Uuid, deadline: DateTime<Utc> },

  // ── NotFound ──────────────────────────────────────────────────────────
  #[error("term not found: {0}")]
  TermNotFound(Uuid),

  #[error("client {client} has no confirmed enrollment in term {term}")]
  NotEnrolled { term: Uuid, client: Uuid },

  #[error("program assignment not found: {0}")]
  AssignmentNotFound(Uuid),

  // ── Authorization ─────────────────────────────────────────────────────
  #[error("trainer {trainer} does not own term {term}")]
  NotOwner { term: Uuid, trainer: Uuid },

  // ── Infra ─────────────────────────────────────────────────────────────
  #[error("storage error: {0}")]
  Storage(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::StartInPast(_)
      | Self::InvalidDuration
      | Self::InvalidCapacity
      | Self::IndividualCapacity(_)
      | Self::RatingOutOfRange(_)
      | Self::InvalidSetNumber(_)
      | Self::DuplicateSet { .. } => ErrorKind::Validation,

      Self::Full(_)
      | Self::AlreadyEnrolled { .. }
      | Self::TermClosed(_)
      | Self::AlreadyTerminal(_)
      | Self::AlreadyCompleted(_)
      | Self::AlreadyRated { .. }
      | Self::NotCompleted { .. }
      | Self::CancellationWindowClosed { .. } => ErrorKind::Conflict,

      Self::TermNotFound(_)
      | Self::NotEnrolled { .. }
      | Self::AssignmentNotFound(_) => ErrorKind::NotFound,

      Self::NotOwner { .. } => ErrorKind::Authorization,

      Self::Storage(_) | Self::Serialization(_) => ErrorKind::Storage,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
