//! Error type for `spotter-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] spotter_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("stored value could not be decoded: {0}")]
  Decode(String),
}

/// Collapse into the core taxonomy: domain failures pass through, anything
/// infrastructural becomes a `Storage` error.
impl From<Error> for spotter_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      other => spotter_core::Error::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
