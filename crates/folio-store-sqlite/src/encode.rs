//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, links and entry bodies as
//! compact JSON, UUIDs as hyphenated lowercase strings.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use folio_core::{
  entry::{Collection, Education, Entry, Project, WorkExperience},
  profile::{Links, Profile},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(e.to_string()))
}

// ─── Links ───────────────────────────────────────────────────────────────────

pub fn encode_links(links: &Links) -> Result<String> {
  Ok(serde_json::to_string(links)?)
}

pub fn decode_links(s: &str) -> Result<Links> { Ok(serde_json::from_str(s)?) }

// ─── Entries ─────────────────────────────────────────────────────────────────

/// An entry ready for insertion: identifier plus JSON body.
pub struct EncodedEntry {
  pub entry_id:  String,
  pub body_json: String,
}

pub fn encode_entry<E: Entry>(entry: &E) -> Result<EncodedEntry> {
  Ok(EncodedEntry {
    entry_id:  encode_uuid(entry.id()),
    body_json: serde_json::to_string(entry)?,
  })
}

/// Assign identifiers to a whole replacement collection. A caller-supplied
/// identifier is honoured unless it already appeared earlier in `inputs`.
pub fn encode_replacement<E: Entry>(inputs: Vec<E::Input>) -> Result<Vec<EncodedEntry>> {
  let mut seen = std::collections::HashSet::new();
  inputs
    .into_iter()
    .map(|input| {
      let id = E::requested_id(&input)
        .filter(|id| seen.insert(*id))
        .unwrap_or_else(|| {
          let fresh = Uuid::new_v4();
          seen.insert(fresh);
          fresh
        });
      encode_entry(&E::from_input(id, input))
    })
    .collect()
}

pub fn decode_entries<E: Entry>(bodies: &[String]) -> Result<Vec<E>> {
  bodies
    .iter()
    .map(|b| serde_json::from_str(b).map_err(Error::from))
    .collect()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `profiles` row plus its skills and entries.
pub struct RawProfile {
  pub name:       String,
  pub email:      String,
  pub links_json: String,
  pub created_at: String,
  pub updated_at: String,
  /// Skill values in position order.
  pub skills:     Vec<String>,
  /// `(collection, body_json)` pairs, in position order within a collection.
  pub entries:    Vec<(String, String)>,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<Profile> {
    let mut education: Vec<Education> = Vec::new();
    let mut projects: Vec<Project> = Vec::new();
    let mut work: Vec<WorkExperience> = Vec::new();

    for (collection, body) in &self.entries {
      let collection = Collection::from_str(collection)
        .map_err(|_| Error::Decode(format!("unknown collection: {collection:?}")))?;
      match collection {
        Collection::Education => education.push(serde_json::from_str(body)?),
        Collection::Projects => projects.push(serde_json::from_str(body)?),
        Collection::Work => work.push(serde_json::from_str(body)?),
      }
    }

    Ok(Profile {
      name: self.name,
      email: self.email,
      links: decode_links(&self.links_json)?,
      skills: self.skills,
      education,
      projects,
      work,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
