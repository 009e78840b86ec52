//! Error type for `folio-store-sqlite`.

use folio_core::{ErrorKind, store::Classify};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] folio_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column could not be decoded back into a domain value.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("profile not found")]
  ProfileNotFound,

  #[error("email {0:?} is already in use")]
  DuplicateEmail(String),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::Core(e) => e.kind(),
      Self::ProfileNotFound => ErrorKind::NotFound,
      Self::DuplicateEmail(_) => ErrorKind::Conflict,
      Self::Database(_) | Self::Json(_) | Self::Uuid(_) | Self::Decode(_) => {
        ErrorKind::Storage
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
