//! Handlers shared by the three entry collections.
//!
//! Mounted once per [`Entry`] type under `/{collection}`:
//!
//! | Method   | Path                 | Notes |
//! |----------|----------------------|-------|
//! | `GET`    | `/{collection}`      | 404 if no profile exists |
//! | `POST`   | `/{collection}`      | Body: the entry input; returns the whole collection |
//! | `PUT`    | `/{collection}/{id}` | Replace in place; unknown ids leave the collection unchanged |
//! | `DELETE` | `/{collection}/{id}` | Idempotent |

use std::sync::Arc;

use axum::{Json, extract::State};
use folio_core::{entry::Entry, store::ProfileStore};
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{AppJson, AppPath},
  profile::require_profile,
};

/// `GET /{collection}`
pub async fn list<S, E>(State(store): State<Arc<S>>) -> Result<Json<Vec<E>>, ApiError>
where
  S: ProfileStore,
  E: Entry,
{
  let profile = require_profile(store.as_ref()).await?;
  Ok(Json(E::of(&profile).to_vec()))
}

/// `POST /{collection}`
pub async fn add<S, E>(
  State(store): State<Arc<S>>,
  AppJson(input): AppJson<E::Input>,
) -> Result<Json<Vec<E>>, ApiError>
where
  S: ProfileStore,
  E: Entry,
{
  let entries = store
    .append_entry::<E>(input)
    .await
    .map_err(ApiError::from_store)?;
  tracing::debug!(collection = %E::COLLECTION, len = entries.len(), "appended entry");
  Ok(Json(entries))
}

/// `PUT /{collection}/{id}`
pub async fn update<S, E>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<Uuid>,
  AppJson(input): AppJson<E::Input>,
) -> Result<Json<Vec<E>>, ApiError>
where
  S: ProfileStore,
  E: Entry,
{
  let entries = store
    .replace_entry::<E>(id, input)
    .await
    .map_err(ApiError::from_store)?;
  tracing::debug!(collection = %E::COLLECTION, %id, "replaced entry");
  Ok(Json(entries))
}

/// `DELETE /{collection}/{id}`
pub async fn remove<S, E>(
  State(store): State<Arc<S>>,
  AppPath(id): AppPath<Uuid>,
) -> Result<Json<Vec<E>>, ApiError>
where
  S: ProfileStore,
  E: Entry,
{
  let entries = store
    .remove_entry::<E>(id)
    .await
    .map_err(ApiError::from_store)?;
  tracing::debug!(collection = %E::COLLECTION, %id, "removed entry");
  Ok(Json(entries))
}
