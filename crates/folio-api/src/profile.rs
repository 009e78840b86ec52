//! Handlers for `/profile` endpoints.
//!
//! | Method         | Path             | Notes |
//! |----------------|------------------|-------|
//! | `GET`          | `/profile`       | 404 if no profile exists |
//! | `POST` / `PUT` | `/profile`       | Body: [`ProfileInput`]; create or replace present fields |
//! | `PATCH`        | `/profile/basic` | Body: [`BasicInfo`]; name, email, links only |
//! | `DELETE`       | `/profile`       | Idempotent |

use std::sync::Arc;

use axum::{Json, extract::State};
use folio_core::{
  profile::{BasicInfo, Profile, ProfileInput},
  store::ProfileStore,
};
use serde_json::{Value, json};

use crate::{error::ApiError, extract::AppJson};

/// Load the profile or fail with not-found.
pub(crate) async fn require_profile<S: ProfileStore>(store: &S) -> Result<Profile, ApiError> {
  store
    .get_profile()
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(ApiError::profile_not_found)
}

/// `GET /profile`
pub async fn get_one<S: ProfileStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Profile>, ApiError> {
  Ok(Json(require_profile(store.as_ref()).await?))
}

/// `POST /profile` and `PUT /profile`
pub async fn upsert<S: ProfileStore>(
  State(store): State<Arc<S>>,
  AppJson(input): AppJson<ProfileInput>,
) -> Result<Json<Profile>, ApiError> {
  let profile = store
    .replace_or_create(input)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(profile))
}

/// `PATCH /profile/basic`
pub async fn update_basic<S: ProfileStore>(
  State(store): State<Arc<S>>,
  AppJson(fields): AppJson<BasicInfo>,
) -> Result<Json<Profile>, ApiError> {
  let profile = store
    .update_basic(fields)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(profile))
}

/// `DELETE /profile`
pub async fn delete<S: ProfileStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError> {
  store.delete_profile().await.map_err(ApiError::from_store)?;
  tracing::info!("profile deleted");
  Ok(Json(json!({ "message": "Profile deleted successfully" })))
}
