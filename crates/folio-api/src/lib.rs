//! JSON REST API for Folio.
//!
//! Exposes an axum [`Router`] backed by any [`folio_core::store::ProfileStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(store.clone()))
//! ```

pub mod entries;
pub mod error;
pub mod extract;
pub mod profile;
pub mod search;
pub mod seed;
pub mod skills;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post, put},
};
use folio_core::{
  entry::{Education, Entry, Project, WorkExperience},
  store::ProfileStore,
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ProfileStore + 'static,
{
  Router::new()
    // Profile
    .route(
      "/profile",
      get(profile::get_one::<S>)
        .post(profile::upsert::<S>)
        .put(profile::upsert::<S>)
        .delete(profile::delete::<S>),
    )
    .route("/profile/basic", patch(profile::update_basic::<S>))
    // Entry collections
    .merge(entry_routes::<S, Education>())
    .merge(entry_routes::<S, Project>())
    .merge(entry_routes::<S, WorkExperience>())
    // Skills
    .route("/skills", get(skills::list::<S>).post(skills::add::<S>))
    .route("/skills/{skill}", axum::routing::delete(skills::remove::<S>))
    // Search
    .route("/search", get(search::general::<S>))
    .route("/search/projects", get(search::projects_by_skill::<S>))
    .route("/search/skills/top", get(search::top_skills::<S>))
    // Seed
    .route("/seed", post(seed::handler::<S>))
    .fallback(unknown_route)
    .with_state(store)
}

/// Unmatched paths get the same error body as every other failure.
async fn unknown_route() -> ApiError { ApiError::NotFound("no such route".into()) }

/// `/{collection}` and `/{collection}/{id}` for one entry type.
fn entry_routes<S, E>() -> Router<Arc<S>>
where
  S: ProfileStore + 'static,
  E: Entry,
{
  let base = format!("/{}", E::COLLECTION);
  let item = format!("{base}/{{id}}");
  Router::new()
    .route(&base, get(entries::list::<S, E>).post(entries::add::<S, E>))
    .route(
      &item,
      put(entries::update::<S, E>).delete(entries::remove::<S, E>),
    )
}
