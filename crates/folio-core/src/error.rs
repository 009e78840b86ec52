//! Error types for `folio-core`.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// The stable, language-neutral classification of every failure the service
/// can report. Serialised as the `kind` field of API error bodies.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
  /// No profile exists yet.
  NotFound,
  /// A required field is missing, empty or of the wrong type.
  Validation,
  /// A uniqueness constraint (the profile email) would be violated.
  Conflict,
  /// The underlying store failed.
  Storage,
}

/// Implemented by every error type that can cross the API boundary.
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("profile not found")]
  ProfileNotFound,

  #[error("validation failed: {0}")]
  Validation(String),

  #[error("email {0:?} is already in use")]
  DuplicateEmail(String),
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::ProfileNotFound => ErrorKind::NotFound,
      Self::Validation(_) => ErrorKind::Validation,
      Self::DuplicateEmail(_) => ErrorKind::Conflict,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
