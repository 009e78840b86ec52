//! Handlers for `/skills` endpoints.
//!
//! | Method   | Path              | Notes |
//! |----------|-------------------|-------|
//! | `GET`    | `/skills`         | 404 if no profile exists |
//! | `POST`   | `/skills`         | Body: `{"skill":"Rust"}`; adding a present value is a no-op |
//! | `DELETE` | `/skills/{skill}` | Idempotent |

use std::sync::Arc;

use axum::{Json, extract::State};
use folio_core::store::ProfileStore;
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{AppJson, AppPath},
  profile::require_profile,
};

/// `GET /skills`
pub async fn list<S: ProfileStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError> {
  let profile = require_profile(store.as_ref()).await?;
  Ok(Json(profile.skills))
}

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub skill: String,
}

/// `POST /skills`
pub async fn add<S: ProfileStore>(
  State(store): State<Arc<S>>,
  AppJson(body): AppJson<AddBody>,
) -> Result<Json<Vec<String>>, ApiError> {
  let skills = store
    .add_skill(body.skill)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(skills))
}

/// `DELETE /skills/{skill}`
pub async fn remove<S: ProfileStore>(
  State(store): State<Arc<S>>,
  AppPath(skill): AppPath<String>,
) -> Result<Json<Vec<String>>, ApiError> {
  let skills = store
    .remove_skill(skill)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(skills))
}
