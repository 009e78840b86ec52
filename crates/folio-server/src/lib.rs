//! HTTP server assembly for Folio.
//!
//! Wraps [`folio_api::api_router`] under `/api`, adds the `/health` endpoint and
//! the HTTP middleware, and owns the runtime configuration.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, Router, routing::get};
use folio_api::seed::reseed;
use folio_core::store::ProfileStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `FOLIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// Path to the SQLite database file.
  pub database_url:  PathBuf,
  /// Install the sample profile at startup when none exists.
  #[serde(default = "default_seed_on_empty")]
  pub seed_on_empty: bool,
}

fn default_host() -> String { "0.0.0.0".into() }

fn default_port() -> u16 { 5000 }

fn default_seed_on_empty() -> bool { true }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ProfileStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", folio_api::api_router(store))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
}

async fn health() -> Json<Value> {
  Json(json!({ "status": "OK", "message": "Server is running" }))
}

// ─── Startup ──────────────────────────────────────────────────────────────────

/// Seed the sample profile if the store holds none. Returns whether seeding
/// ran.
pub async fn seed_if_empty<S: ProfileStore>(store: &S) -> Result<bool, S::Error> {
  if store.get_profile().await?.is_some() {
    return Ok(false);
  }
  reseed(store).await?;
  Ok(true)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use folio_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  async fn store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().await.unwrap())
  }

  async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
      .oneshot(Request::get(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn health_reports_ok() {
    let (status, body) = get_json(app(store().await), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "OK", "message": "Server is running" }));
  }

  #[tokio::test]
  async fn api_is_nested() {
    let store = store().await;
    seed_if_empty(store.as_ref()).await.unwrap();
    let (status, body) = get_json(app(store), "/api/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "John Doe");
  }

  #[tokio::test]
  async fn seed_if_empty_keeps_existing_profile() {
    let store = store().await;
    assert!(seed_if_empty(store.as_ref()).await.unwrap());
    store.add_skill("Rust".into()).await.unwrap();
    assert!(!seed_if_empty(store.as_ref()).await.unwrap());
    let profile = store.get_profile().await.unwrap().unwrap();
    assert!(profile.skills.contains(&"Rust".to_string()));
  }

  #[tokio::test]
  async fn cors_allows_any_origin() {
    let resp = app(store().await)
      .oneshot(
        Request::get("/health")
          .header(header::ORIGIN, "http://localhost:3000")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );
  }

  #[test]
  fn config_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("database_url", "/tmp/folio.db")
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 5000);
    assert!(cfg.seed_on_empty);
  }
}
