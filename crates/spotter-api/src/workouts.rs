//! Handlers for session completion and the recorded set logs.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/terms/:id/finish` | Body: [`FinishBody`]; completes the term |
//! | `GET`  | `/terms/:id/logs` | Set logs in insertion order |

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use spotter_core::{
  enrollment::TermEnrollment,
  event::DomainEvent,
  store::ScheduleStore,
  workout::SetLog,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct FinishBody {
  pub client_id:  Uuid,
  pub started_at: DateTime<Utc>,
  pub ended_at:   DateTime<Utc>,
  pub logs:       Vec<SetLog>,
}

/// `POST /terms/:id/finish`
pub async fn finish<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<FinishBody>,
) -> Result<Json<TermEnrollment>, ApiError>
where
  S: ScheduleStore,
{
  let enrollment = state
    .store
    .finish_workout(id, body.client_id, body.started_at, body.ended_at, body.logs)
    .await
    .map_err(ApiError::from_store)?;

  state.events.emit(&DomainEvent::SessionCompleted {
    term_id:   id,
    client_id: body.client_id,
    ended_at:  body.ended_at,
  });

  Ok(Json(enrollment))
}

/// `GET /terms/:id/logs`
pub async fn logs<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<SetLog>>, ApiError>
where
  S: ScheduleStore,
{
  let logs = state
    .store
    .exercise_logs(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(logs))
}
