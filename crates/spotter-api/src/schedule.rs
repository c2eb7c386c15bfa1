//! Handler for the weekly schedule read model.
//!
//! `week_start` is the viewer's local Monday 00:00 as an RFC 3339 timestamp
//! with offset (e.g. `2025-06-02T00:00:00+02:00`); that single value
//! carries both the week boundary and the zone used for day-of-week and
//! time-of-day conversion.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use spotter_core::{schedule::WeeklyEvent, store::ScheduleStore};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct WeeklyParams {
  pub owner_id:   Uuid,
  pub week_start: DateTime<FixedOffset>,
}

/// `GET /schedule?owner_id=<uuid>&week_start=<rfc3339>`
pub async fn weekly<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<WeeklyParams>,
) -> Result<Json<Vec<WeeklyEvent>>, ApiError>
where
  S: ScheduleStore,
{
  let events = state
    .store
    .weekly_schedule(params.owner_id, params.week_start, state.clock.now())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(events))
}
