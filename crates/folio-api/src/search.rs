//! Handlers for `/search` endpoints.
//!
//! | Method | Path                  | Notes |
//! |--------|-----------------------|-------|
//! | `GET`  | `/search?q=`          | Substring search; `q` required |
//! | `GET`  | `/search/projects?skill=` | Projects tagged with `skill`; `skill` required |
//! | `GET`  | `/search/skills/top`  | Ten most frequent skill names |

use std::sync::Arc;

use axum::{Json, extract::State};
use folio_core::{
  entry::Project,
  query::{self, SearchResults, TOP_SKILLS_LIMIT},
  store::ProfileStore,
};
use serde::Deserialize;

use crate::{error::ApiError, extract::AppQuery, profile::require_profile};

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
  value
    .filter(|v| !v.is_empty())
    .ok_or_else(|| ApiError::Validation(format!("query parameter `{name}` is required")))
}

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  pub q: Option<String>,
}

/// `GET /search?q=<text>`
pub async fn general<S: ProfileStore>(
  State(store): State<Arc<S>>,
  AppQuery(params): AppQuery<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
  let q = required(params.q, "q")?;
  let profile = require_profile(store.as_ref()).await?;
  Ok(Json(query::search(&profile, &q)))
}

#[derive(Debug, Deserialize, Default)]
pub struct SkillParams {
  pub skill: Option<String>,
}

/// `GET /search/projects?skill=<skill>`
pub async fn projects_by_skill<S: ProfileStore>(
  State(store): State<Arc<S>>,
  AppQuery(params): AppQuery<SkillParams>,
) -> Result<Json<Vec<Project>>, ApiError> {
  let skill = required(params.skill, "skill")?;
  let profile = require_profile(store.as_ref()).await?;
  Ok(Json(query::projects_with_skill(&profile, &skill)))
}

/// `GET /search/skills/top`
pub async fn top_skills<S: ProfileStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError> {
  let profile = require_profile(store.as_ref()).await?;
  Ok(Json(query::top_skills(&profile, TOP_SKILLS_LIMIT)))
}
