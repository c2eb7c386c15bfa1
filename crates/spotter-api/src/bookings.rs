//! Handlers for booking and booking cancellation.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/terms/:id/book` | Body: `{"client_id":"..."}`; 201 + enrollment |
//! | `POST` | `/terms/:id/cancel-booking` | Body: `{"client_id":"..."}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use spotter_core::{
  enrollment::TermEnrollment, event::DomainEvent, store::ScheduleStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct BookingBody {
  pub client_id: Uuid,
}

/// `POST /terms/:id/book`
pub async fn book<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<BookingBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ScheduleStore,
{
  let enrollment = state
    .store
    .book(id, body.client_id, state.clock.now())
    .await
    .map_err(ApiError::from_store)?;

  state.events.emit(&DomainEvent::Booked {
    term_id:       id,
    client_id:     body.client_id,
    enrollment_id: enrollment.enrollment_id,
  });

  Ok((StatusCode::CREATED, Json(enrollment)))
}

/// `POST /terms/:id/cancel-booking`
pub async fn cancel<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<BookingBody>,
) -> Result<Json<TermEnrollment>, ApiError>
where
  S: ScheduleStore,
{
  let enrollment = state
    .store
    .cancel_booking(id, body.client_id, state.clock.now())
    .await
    .map_err(ApiError::from_store)?;

  state.events.emit(&DomainEvent::BookingCanceled {
    term_id:   id,
    client_id: body.client_id,
  });

  Ok(Json(enrollment))
}
