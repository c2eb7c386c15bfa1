//! Handlers for post-completion rating.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/terms/:id/unrated` | Completed enrollments lacking a rating |
//! | `POST` | `/terms/:id/rate` | Body: [`RateBody`]; rejects re-rating |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use spotter_core::{
  enrollment::{Rating, TermEnrollment},
  event::DomainEvent,
  store::ScheduleStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct RateBody {
  pub trainer_id: Uuid,
  pub client_id:  Uuid,
  pub rating:     u8,
  pub feedback:   Option<String>,
}

/// `POST /terms/:id/rate`
pub async fn rate<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<RateBody>,
) -> Result<Json<TermEnrollment>, ApiError>
where
  S: ScheduleStore,
{
  let rating = Rating::new(body.rating)?;

  let enrollment = state
    .store
    .rate(id, body.trainer_id, body.client_id, rating, body.feedback)
    .await
    .map_err(ApiError::from_store)?;

  state.events.emit(&DomainEvent::Rated {
    term_id:   id,
    client_id: body.client_id,
    rating:    rating.value(),
  });

  Ok(Json(enrollment))
}

/// `GET /terms/:id/unrated`
pub async fn unrated<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<TermEnrollment>>, ApiError>
where
  S: ScheduleStore,
{
  let pending = state
    .store
    .unrated(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(pending))
}
