//! Router tests driven through `tower::ServiceExt::oneshot` against an
//! in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Method, Request, StatusCode, header},
};
use folio_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  api_router(Arc::new(store))
}

async fn seeded_app() -> Router {
  let app = app().await;
  let (status, _) = send(&app, Method::POST, "/seed", None).await;
  assert_eq!(status, StatusCode::OK);
  app
}

async fn send(
  app: &Router,
  method: Method,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut req = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      req = req.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app
    .clone()
    .oneshot(req.body(body).unwrap())
    .await
    .unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
  send(app, Method::GET, uri, None).await
}

// ─── Routing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_routes_use_the_error_body() {
  let app = seeded_app().await;
  for (method, uri) in [
    (Method::GET, "/nope"),
    (Method::DELETE, "/skills/"),
    (Method::GET, "/projects/extra/segments"),
  ] {
    let (status, body) = send(&app, method, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    assert_eq!(body["kind"], "not_found", "{uri}");
    assert_eq!(body["message"], "no such route", "{uri}");
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_profile_is_not_found_with_kind() {
  let app = app().await;
  let (status, body) = get(&app, "/profile").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["kind"], "not_found");
  assert!(body["message"].is_string());
}

#[tokio::test]
async fn seed_then_get_profile() {
  let app = app().await;
  let (status, body) = send(&app, Method::POST, "/seed", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Database seeded successfully");

  let (status, profile) = get(&app, "/profile").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(profile["name"], "John Doe");
  assert_eq!(profile["email"], "john.doe@example.com");
  assert_eq!(profile["projects"].as_array().unwrap().len(), 3);
  assert_eq!(profile["work"][1]["endDate"], "2020-05-31");
  assert!(profile["education"][0]["id"].is_string());
}

#[tokio::test]
async fn reseed_replaces_existing_profile() {
  let app = seeded_app().await;
  send(&app, Method::POST, "/skills", Some(json!({ "skill": "Rust" }))).await;
  send(&app, Method::POST, "/seed", None).await;
  let (_, skills) = get(&app, "/skills").await;
  assert_eq!(skills.as_array().unwrap().len(), 6);
  assert!(!skills.as_array().unwrap().contains(&json!("Rust")));
}

#[tokio::test]
async fn reseed_works_with_or_without_a_profile() {
  use folio_core::store::ProfileStore as _;

  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  crate::seed::reseed(&store).await.unwrap();
  let first = store.get_profile().await.unwrap().expect("seeded");
  crate::seed::reseed(&store).await.unwrap();
  let second = store.get_profile().await.unwrap().expect("reseeded");
  assert_eq!(first.name, second.name);
  assert_eq!(first.projects.len(), second.projects.len());
}

#[tokio::test]
async fn create_requires_name_and_email() {
  let app = app().await;
  let (status, body) =
    send(&app, Method::POST, "/profile", Some(json!({ "name": "Ada" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["kind"], "validation");

  let (status, _) = get(&app, "/profile").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_creates_and_then_replaces_present_fields() {
  let app = app().await;
  let (status, created) = send(
    &app,
    Method::PUT,
    "/profile",
    Some(json!({ "name": "Ada", "email": "ada@example.com", "skills": ["Rust"] })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(created["skills"], json!(["Rust"]));

  let (status, replaced) = send(
    &app,
    Method::PUT,
    "/profile",
    Some(json!({ "name": "Ada Lovelace" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(replaced["name"], "Ada Lovelace");
  assert_eq!(replaced["email"], "ada@example.com");
  assert_eq!(replaced["skills"], json!(["Rust"]));
}

#[tokio::test]
async fn patch_basic_leaves_collections_alone() {
  let app = seeded_app().await;
  let (status, profile) = send(
    &app,
    Method::PATCH,
    "/profile/basic",
    Some(json!({
      "name": "Jane Doe",
      "email": "jane@example.com",
      "links": { "github": "https://github.com/jane" }
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(profile["name"], "Jane Doe");
  assert_eq!(profile["links"]["github"], "https://github.com/jane");
  assert_eq!(profile["projects"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn patch_basic_without_profile_is_not_found() {
  let app = app().await;
  let (status, _) = send(
    &app,
    Method::PATCH,
    "/profile/basic",
    Some(json!({ "name": "Jane", "email": "jane@example.com" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_profile_then_get_is_not_found() {
  let app = seeded_app().await;
  let (status, body) = send(&app, Method::DELETE, "/profile", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["message"], "Profile deleted successfully");

  let (status, body) = get(&app, "/profile").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(body["kind"], "not_found");

  // Deleting again is still fine.
  let (status, _) = send(&app, Method::DELETE, "/profile", None).await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
  let app = app().await;
  let req = Request::builder()
    .method(Method::POST)
    .uri("/profile")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ─── Entries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_update_remove_project() {
  let app = seeded_app().await;
  let (status, projects) = send(
    &app,
    Method::POST,
    "/projects",
    Some(json!({
      "title": "Folio",
      "description": "Portfolio backend",
      "skills": ["Rust"],
      "links": {}
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  let projects = projects.as_array().unwrap().clone();
  assert_eq!(projects.len(), 4);
  let id = projects[3]["id"].as_str().unwrap().to_owned();

  let (status, updated) = send(
    &app,
    Method::PUT,
    &format!("/projects/{id}"),
    Some(json!({
      "title": "Folio v2",
      "description": "Portfolio backend",
      "skills": ["Rust", "SQLite"],
      "links": {}
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated[3]["title"], "Folio v2");
  assert_eq!(updated[3]["id"], id.as_str());

  let (status, remaining) =
    send(&app, Method::DELETE, &format!("/projects/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(remaining.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn work_accepts_timestamp_dates() {
  let app = seeded_app().await;
  let (status, work) = send(
    &app,
    Method::POST,
    "/work",
    Some(json!({
      "company": "Acme",
      "position": "Engineer",
      "description": "Built things",
      "startDate": "2021-01-01T00:00:00.000Z"
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(work[2]["startDate"], "2021-01-01");
  assert!(work[2]["endDate"].is_null());
}

#[tokio::test]
async fn invalid_entry_is_rejected() {
  let app = seeded_app().await;
  let (status, body) = send(
    &app,
    Method::POST,
    "/education",
    Some(json!({
      "institution": "",
      "degree": "BSc",
      "field": "Maths",
      "startYear": 2010
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["kind"], "validation");

  let (_, education) = get(&app, "/education").await;
  assert_eq!(education.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_entry_id_is_a_validation_error() {
  let app = seeded_app().await;
  let (status, body) = send(&app, Method::DELETE, "/work/not-a-uuid", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn unknown_entry_id_leaves_collection_unchanged() {
  let app = seeded_app().await;
  let (_, before) = get(&app, "/work").await;
  let (status, after) = send(
    &app,
    Method::DELETE,
    "/work/00000000-0000-4000-8000-000000000000",
    None,
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(before, after);
}

#[tokio::test]
async fn entries_without_profile_are_not_found() {
  let app = app().await;
  let (status, _) = get(&app, "/education").await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _) = send(
    &app,
    Method::POST,
    "/education",
    Some(json!({
      "institution": "MIT",
      "degree": "BSc",
      "field": "CS",
      "startYear": 2010
    })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Skills ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn skills_add_is_idempotent_and_remove_decodes_path() {
  let app = seeded_app().await;
  let (_, skills) =
    send(&app, Method::POST, "/skills", Some(json!({ "skill": "Rust" }))).await;
  assert_eq!(skills.as_array().unwrap().len(), 7);
  let (_, skills) =
    send(&app, Method::POST, "/skills", Some(json!({ "skill": "Rust" }))).await;
  assert_eq!(skills.as_array().unwrap().len(), 7);

  let (status, skills) = send(&app, Method::DELETE, "/skills/Node.js", None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(!skills.as_array().unwrap().contains(&json!("Node.js")));

  send(&app, Method::POST, "/skills", Some(json!({ "skill": "Data Analysis" })))
    .await;
  let (_, skills) =
    send(&app, Method::DELETE, "/skills/Data%20Analysis", None).await;
  assert!(!skills.as_array().unwrap().contains(&json!("Data Analysis")));
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_requires_q() {
  let app = seeded_app().await;
  for uri in ["/search", "/search?q="] {
    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    assert_eq!(body["kind"], "validation");
  }
}

#[tokio::test]
async fn search_react() {
  let app = seeded_app().await;
  let (status, results) = get(&app, "/search?q=react").await;
  assert_eq!(status, StatusCode::OK);
  assert!(results["profile"]["name"].is_null());
  assert_eq!(results["profile"]["skills"], json!(["React"]));
  assert_eq!(results["projects"].as_array().unwrap().len(), 3);
  let work = results["work"].as_array().unwrap();
  assert_eq!(work.len(), 1);
  assert_eq!(work[0]["company"], "StartUp Co");
}

#[tokio::test]
async fn search_matching_name_returns_it() {
  let app = seeded_app().await;
  let (_, results) = get(&app, "/search?q=doe").await;
  assert_eq!(results["profile"]["name"], "John Doe");
}

#[tokio::test]
async fn projects_by_skill_is_case_insensitive() {
  let app = seeded_app().await;
  let (status, projects) = get(&app, "/search/projects?skill=python").await;
  assert_eq!(status, StatusCode::OK);
  let projects = projects.as_array().unwrap();
  assert_eq!(projects.len(), 1);
  assert_eq!(projects[0]["title"], "Data Visualization Dashboard");

  let (status, _) = get(&app, "/search/projects").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn top_skills_ranks_react_first() {
  let app = seeded_app().await;
  let (status, top) = get(&app, "/search/skills/top").await;
  assert_eq!(status, StatusCode::OK);
  let top = top.as_array().unwrap();
  assert_eq!(top.len(), 10);
  assert_eq!(top[0], "React");
  assert_eq!(top[1], "Node.js");
}

#[tokio::test]
async fn search_without_profile_is_not_found() {
  let app = app().await;
  let (status, _) = get(&app, "/search?q=react").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Error mapping ───────────────────────────────────────────────────────────

async fn error_body(err: crate::ApiError) -> (StatusCode, Value) {
  use axum::response::IntoResponse as _;
  let resp = err.into_response();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict() {
  let err = folio_store_sqlite::error::Error::DuplicateEmail("a@example.com".into());
  let (status, body) = error_body(crate::ApiError::from_store(err)).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert_eq!(body["kind"], "conflict");
  assert!(body["message"].as_str().unwrap().contains("a@example.com"));
}

#[tokio::test]
async fn storage_failures_hide_details() {
  let err = folio_store_sqlite::error::Error::Decode("bad links column".into());
  let (status, body) = error_body(crate::ApiError::from_store(err)).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body, json!({ "kind": "storage", "message": "storage failure" }));
}
