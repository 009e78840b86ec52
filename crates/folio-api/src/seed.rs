//! Handler for `POST /seed`: replace whatever profile exists with the fixed
//! sample.

use std::sync::Arc;

use axum::{Json, extract::State};
use folio_core::{seed::sample_profile, store::ProfileStore};
use serde_json::{Value, json};

use crate::error::ApiError;

/// Delete the current profile, if any, and install the sample profile.
///
/// Not atomic: readers may see no profile between the delete and the insert,
/// and a failed insert leaves none behind.
pub async fn reseed<S: ProfileStore>(store: &S) -> Result<(), S::Error> {
  store.delete_profile().await?;
  store.replace_or_create(sample_profile()).await?;
  tracing::info!("profile seeded with sample data");
  Ok(())
}

/// `POST /seed`
pub async fn handler<S: ProfileStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError> {
  reseed(store.as_ref()).await.map_err(ApiError::from_store)?;
  Ok(Json(json!({ "message": "Database seeded successfully" })))
}
