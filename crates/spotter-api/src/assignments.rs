//! Program assignment handlers.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use serde::Deserialize;
use spotter_core::{
  program::{AssignmentStatus, ProgramAssignment},
  store::ScheduleStore,
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub program_id: Uuid,
  pub client_id:  Uuid,
}

/// `POST /assignments`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<ProgramAssignment>), ApiError>
where
  S: ScheduleStore,
{
  let assignment = state
    .store
    .assign_program_to_client(body.program_id, body.client_id, state.clock.now())
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(assignment)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub client_id: Uuid,
}

/// `GET /assignments?client_id=…`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ProgramAssignment>>, ApiError>
where
  S: ScheduleStore,
{
  let assignments = state
    .store
    .client_assignments(params.client_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(assignments))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: AssignmentStatus,
}

/// `POST /assignments/:id/status`
pub async fn set_status<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<StatusBody>,
) -> Result<Json<ProgramAssignment>, ApiError>
where
  S: ScheduleStore,
{
  let assignment = state
    .store
    .set_assignment_status(id, body.status)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(assignment))
}
