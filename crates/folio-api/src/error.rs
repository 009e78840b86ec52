//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the API as `{"kind": "...", "message": "..."}` where
//! `kind` is a [`folio_core::ErrorKind`]. Store errors are classified, never
//! serialised raw.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use folio_core::{ErrorKind, store::Classify};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn profile_not_found() -> Self { Self::NotFound("profile not found".into()) }

  /// Classify a store error by its [`ErrorKind`].
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match e.kind() {
      ErrorKind::NotFound => Self::NotFound(e.to_string()),
      ErrorKind::Validation => Self::Validation(e.to_string()),
      ErrorKind::Conflict => Self::Conflict(e.to_string()),
      ErrorKind::Storage => Self::Store(Box::new(e)),
    }
  }
}

impl Classify for ApiError {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound(_) => ErrorKind::NotFound,
      Self::Validation(_) => ErrorKind::Validation,
      Self::Conflict(_) => ErrorKind::Conflict,
      Self::Store(_) => ErrorKind::Storage,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { Self::Validation(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { Self::Validation(r.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self { Self::Validation(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let kind = self.kind();
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "storage failure".to_string())
      }
    };
    (status, Json(json!({ "kind": kind, "message": message }))).into_response()
  }
}
