//! JSON REST API for Spotter.
//!
//! Exposes an axum [`Router`] backed by any
//! [`spotter_core::store::ScheduleStore`]. Authentication is the caller's
//! responsibility: every operation names its acting principal explicitly
//! (`trainer_id` / `client_id` / `viewer_id`) and this layer trusts it, per
//! the upstream identity service contract.
//!
//! Domain events are emitted here, after the store call returns — that is,
//! after the transaction committed — so a sink outage can never block or
//! roll back a booking.

pub mod assignments;
pub mod bookings;
pub mod error;
pub mod ratings;
pub mod schedule;
pub mod terms;
pub mod workouts;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use spotter_core::{clock::Clock, event::EventSink, store::ScheduleStore};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_cancel_window_min() -> i64 { 60 }

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Minimum lead time, in minutes, for client cancellations.
  #[serde(default = "default_cancel_window_min")]
  pub cancel_window_min: i64,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub clock:  Arc<dyn Clock>,
  pub events: Arc<dyn EventSink>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      clock:  Arc::clone(&self.clock),
      events: Arc::clone(&self.events),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router
where
  S: ScheduleStore + 'static,
{
  Router::new()
    // Terms
    .route("/terms", get(terms::list::<S>).post(terms::create::<S>))
    .route("/terms/{id}", get(terms::get_one::<S>))
    .route("/terms/{id}/cancel", post(terms::cancel::<S>))
    .route("/terms/{id}/program", post(terms::assign_program::<S>))
    // Enrollment
    .route("/terms/{id}/book", post(bookings::book::<S>))
    .route("/terms/{id}/cancel-booking", post(bookings::cancel::<S>))
    // Session completion
    .route("/terms/{id}/finish", post(workouts::finish::<S>))
    .route("/terms/{id}/logs", get(workouts::logs::<S>))
    // Rating
    .route("/terms/{id}/unrated", get(ratings::unrated::<S>))
    .route("/terms/{id}/rate", post(ratings::rate::<S>))
    // Read models
    .route("/schedule", get(schedule::weekly::<S>))
    // Program assignments
    .route(
      "/assignments",
      get(assignments::list::<S>).post(assignments::create::<S>),
    )
    .route("/assignments/{id}/status", post(assignments::set_status::<S>))
    .with_state(state)
}
