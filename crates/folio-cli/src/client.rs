//! Async HTTP client wrapping the folio JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use folio_core::{
  entry::{Collection, Entry, Project},
  profile::{BasicInfo, Profile},
  query::SearchResults,
};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

/// Async HTTP client for the folio JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: Url,
}

/// Body of every non-2xx API response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  kind:    String,
  message: String,
}

impl ApiClient {
  pub fn new(base_url: &str) -> Result<Self> {
    let base_url =
      Url::parse(base_url).with_context(|| format!("invalid server URL {base_url:?}"))?;
    if base_url.cannot_be_a_base() {
      return Err(anyhow!("server URL {base_url} cannot be a base"));
    }
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url })
  }

  /// `{base}/api/{segments...}` with each segment percent-encoded.
  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().push("api").extend(segments);
    }
    url
  }

  /// Turn a non-2xx response into an error carrying the API's message.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    match resp.json::<ErrorBody>().await {
      Ok(body) => Err(anyhow!("{what} → {status} {}: {}", body.kind, body.message)),
      Err(_) => Err(anyhow!("{what} → {status}")),
    }
  }

  // ── Profile ───────────────────────────────────────────────────────────────

  /// `GET /api/profile`; `None` when no profile exists.
  pub async fn get_profile(&self) -> Result<Option<Profile>> {
    let resp = self
      .client
      .get(self.url(&["profile"]))
      .send()
      .await
      .context("GET /profile failed")?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let resp = Self::check(resp, "GET /profile").await?;
    resp.json().await.context("deserialising profile")
  }

  /// `PATCH /api/profile/basic`
  pub async fn update_basic(&self, fields: &BasicInfo) -> Result<Profile> {
    let resp = self
      .client
      .patch(self.url(&["profile", "basic"]))
      .json(fields)
      .send()
      .await
      .context("PATCH /profile/basic failed")?;
    let resp = Self::check(resp, "PATCH /profile/basic").await?;
    resp.json().await.context("deserialising profile")
  }

  /// `POST /api/seed`
  pub async fn seed(&self) -> Result<()> {
    let resp = self
      .client
      .post(self.url(&["seed"]))
      .send()
      .await
      .context("POST /seed failed")?;
    Self::check(resp, "POST /seed").await?;
    Ok(())
  }

  // ── Entries & skills ──────────────────────────────────────────────────────

  /// `POST /api/{collection}`
  pub async fn add_entry<E: Entry>(&self, input: &E::Input) -> Result<Vec<E>> {
    let collection = E::COLLECTION;
    let resp = self
      .client
      .post(self.url(&[collection.as_ref()]))
      .json(input)
      .send()
      .await
      .with_context(|| format!("POST /{collection} failed"))?;
    let resp = Self::check(resp, &format!("POST /{collection}")).await?;
    resp.json().await.with_context(|| format!("deserialising {collection}"))
  }

  /// `PUT /api/{collection}/{id}`
  pub async fn update_entry<E: Entry>(&self, id: Uuid, input: &E::Input) -> Result<Vec<E>> {
    let collection = E::COLLECTION;
    let id = id.to_string();
    let resp = self
      .client
      .put(self.url(&[collection.as_ref(), &id]))
      .json(input)
      .send()
      .await
      .with_context(|| format!("PUT /{collection}/{id} failed"))?;
    let resp = Self::check(resp, &format!("PUT /{collection}/{id}")).await?;
    resp.json().await.with_context(|| format!("deserialising {collection}"))
  }

  /// `DELETE /api/{collection}/{id}`
  pub async fn delete_entry(&self, collection: Collection, id: Uuid) -> Result<()> {
    let id = id.to_string();
    let resp = self
      .client
      .delete(self.url(&[collection.as_ref(), &id]))
      .send()
      .await
      .with_context(|| format!("DELETE /{collection}/{id} failed"))?;
    Self::check(resp, &format!("DELETE /{collection}/{id}")).await?;
    Ok(())
  }

  /// `POST /api/skills`
  pub async fn add_skill(&self, skill: &str) -> Result<Vec<String>> {
    let resp = self
      .client
      .post(self.url(&["skills"]))
      .json(&json!({ "skill": skill }))
      .send()
      .await
      .context("POST /skills failed")?;
    let resp = Self::check(resp, "POST /skills").await?;
    resp.json().await.context("deserialising skills")
  }

  /// `DELETE /api/skills/{skill}`
  pub async fn delete_skill(&self, skill: &str) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&["skills", skill]))
      .send()
      .await
      .context("DELETE /skills failed")?;
    Self::check(resp, "DELETE /skills").await?;
    Ok(())
  }

  // ── Search ────────────────────────────────────────────────────────────────

  /// `GET /api/search?q=<query>`
  pub async fn search(&self, query: &str) -> Result<SearchResults> {
    let resp = self
      .client
      .get(self.url(&["search"]))
      .query(&[("q", query)])
      .send()
      .await
      .context("GET /search failed")?;
    let resp = Self::check(resp, "GET /search").await?;
    resp.json().await.context("deserialising search results")
  }

  /// `GET /api/search/projects?skill=<skill>`
  pub async fn projects_with_skill(&self, skill: &str) -> Result<Vec<Project>> {
    let resp = self
      .client
      .get(self.url(&["search", "projects"]))
      .query(&[("skill", skill)])
      .send()
      .await
      .context("GET /search/projects failed")?;
    let resp = Self::check(resp, "GET /search/projects").await?;
    resp.json().await.context("deserialising projects")
  }

  /// `GET /api/search/skills/top`
  pub async fn top_skills(&self) -> Result<Vec<String>> {
    let resp = self
      .client
      .get(self.url(&["search", "skills", "top"]))
      .send()
      .await
      .context("GET /search/skills/top failed")?;
    let resp = Self::check(resp, "GET /search/skills/top").await?;
    resp.json().await.context("deserialising top skills")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn urls_are_rooted_under_api_and_encoded() {
    let client = ApiClient::new("http://localhost:5000/").unwrap();
    assert_eq!(
      client.url(&["skills", "Data Analysis"]).as_str(),
      "http://localhost:5000/api/skills/Data%20Analysis"
    );
    assert_eq!(
      client.url(&["search", "skills", "top"]).as_str(),
      "http://localhost:5000/api/search/skills/top"
    );
  }

  #[test]
  fn rejects_non_base_urls() {
    assert!(ApiClient::new("mailto:someone@example.com").is_err());
    assert!(ApiClient::new("not a url").is_err());
  }
}
