//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every store failure converts into the core error first, then maps by
//! [`ErrorKind`]: conflicts are 409s the client can recover from (pick
//! another slot), permission problems are 403s, and only storage failures
//! surface as 500s — and are the only class logged as errors.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use spotter_core::{Error as DomainError, ErrorKind};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] DomainError);

impl ApiError {
  /// Convert a store-layer failure through the core taxonomy.
  pub fn from_store<E: Into<DomainError>>(err: E) -> Self {
    Self(err.into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match self.0.kind() {
      ErrorKind::Validation => StatusCode::BAD_REQUEST,
      ErrorKind::NotFound => StatusCode::NOT_FOUND,
      ErrorKind::Conflict => StatusCode::CONFLICT,
      ErrorKind::Authorization => StatusCode::FORBIDDEN,
      ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
      tracing::error!(error = %self.0, "storage failure");
    }

    (status, Json(json!({ "error": self.0.to_string() }))).into_response()
  }
}
