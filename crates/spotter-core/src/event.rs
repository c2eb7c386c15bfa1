//! Domain events for the external audit/notification sink.
//!
//! Events describe state changes that already committed. Emission happens
//! after the transaction, out-of-band, and is infallible from the caller's
//! point of view — a sink outage must never block or roll back a booking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomainEvent {
  Booked {
    term_id:       Uuid,
    client_id:     Uuid,
    enrollment_id: Uuid,
  },
  BookingCanceled {
    term_id:   Uuid,
    client_id: Uuid,
  },
  TermCanceled {
    term_id:    Uuid,
    trainer_id: Uuid,
    /// Clients whose confirmed enrollments were cascaded out.
    affected:   Vec<Uuid>,
  },
  SessionCompleted {
    term_id:   Uuid,
    client_id: Uuid,
    ended_at:  DateTime<Utc>,
  },
  Rated {
    term_id:   Uuid,
    client_id: Uuid,
    rating:    u8,
  },
}

/// Downstream consumer of domain events. Delivery semantics are at-least-
/// once; sinks own their own retry and buffering.
pub trait EventSink: Send + Sync {
  fn emit(&self, event: &DomainEvent);
}

/// Sink that records events on the tracing pipeline. The default wiring
/// when no external notifier is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
  fn emit(&self, event: &DomainEvent) {
    match serde_json::to_string(event) {
      Ok(payload) => tracing::info!(target: "spotter::events", %payload, "domain event"),
      Err(err) => {
        tracing::warn!(target: "spotter::events", %err, "unserializable domain event");
      }
    }
  }
}
