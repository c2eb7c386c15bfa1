//! Handlers for `/terms` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/terms` | `?viewer_id` required; optional `from`, `to`, `kind`, `status` |
//! | `POST` | `/terms` | Body: [`spotter_core::term::NewTerm`]; returns 201 + term |
//! | `GET`  | `/terms/:id` | 404 if not found |
//! | `POST` | `/terms/:id/cancel` | Body: `{"trainer_id":"..."}`; cascades enrollments |
//! | `POST` | `/terms/:id/program` | Body: `{"trainer_id":"...","program_id":"..."}` |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use spotter_core::{
  event::DomainEvent,
  store::{ScheduleStore, TermQuery, TermSummary},
  term::{NewTerm, Term, TermKind, TermStatus},
};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Whose enrollment flag to compute.
  pub viewer_id: Uuid,
  pub from:      Option<DateTime<Utc>>,
  pub to:        Option<DateTime<Utc>>,
  pub kind:      Option<TermKind>,
  pub status:    Option<TermStatus>,
}

/// `GET /terms?viewer_id=<uuid>[&from=..&to=..&kind=..&status=..]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<TermSummary>>, ApiError>
where
  S: ScheduleStore,
{
  let query = TermQuery {
    from:   params.from,
    to:     params.to,
    kind:   params.kind,
    status: params.status,
  };
  let terms = state
    .store
    .list_terms(&query, params.viewer_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(terms))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /terms`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewTerm>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ScheduleStore,
{
  let term = state
    .store
    .create_term(body, state.clock.now())
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(term)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /terms/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Term>, ApiError>
where
  S: ScheduleStore,
{
  let term = state
    .store
    .get_term(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(spotter_core::Error::TermNotFound(id))?;
  Ok(Json(term))
}

// ─── Cancel ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CancelBody {
  pub trainer_id: Uuid,
}

/// `POST /terms/:id/cancel`
pub async fn cancel<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CancelBody>,
) -> Result<Json<serde_json::Value>, ApiError>
where
  S: ScheduleStore,
{
  let affected = state
    .store
    .cancel_term(id, body.trainer_id)
    .await
    .map_err(ApiError::from_store)?;

  state.events.emit(&DomainEvent::TermCanceled {
    term_id:    id,
    trainer_id: body.trainer_id,
    affected:   affected.clone(),
  });

  Ok(Json(json!({ "ok": true, "affected": affected })))
}

// ─── Assign program ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AssignProgramBody {
  pub trainer_id: Uuid,
  pub program_id: Uuid,
}

/// `POST /terms/:id/program`
pub async fn assign_program<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AssignProgramBody>,
) -> Result<Json<Term>, ApiError>
where
  S: ScheduleStore,
{
  let term = state
    .store
    .assign_program(id, body.trainer_id, body.program_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(term))
}
