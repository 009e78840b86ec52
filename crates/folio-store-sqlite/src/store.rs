//! [`SqliteStore`]: the SQLite implementation of [`ProfileStore`].
//!
//! Every operation runs as one closure on the connection's dedicated thread,
//! inside one SQLite transaction. That serialises the read-modify-write of
//! each mutation against every other call on the same store.

use std::path::Path;

use chrono::Utc;
use folio_core::{
  entry::{Collection, Education, Entry, Project, WorkExperience},
  profile::{BasicInfo, Profile, ProfileInput, dedup_skills},
  store::ProfileStore,
  validate::{Checker, Validate as _},
};
use rusqlite::{OptionalExtension as _, Transaction};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    EncodedEntry, RawProfile, decode_entries, encode_dt, encode_entry, encode_links,
    encode_replacement, encode_uuid,
  },
  schema::SCHEMA,
};

/// The well-known key of the one profile row.
pub const PROFILE_KEY: &str = "default";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Folio profile store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run raw SQL against the underlying connection.
  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Transaction helpers ─────────────────────────────────────────────────────
//
// These run on the database thread, inside `Connection::call`.

fn profile_exists(tx: &Transaction<'_>) -> rusqlite::Result<bool> {
  Ok(
    tx.query_row(
      "SELECT 1 FROM profiles WHERE profile_key = ?1",
      [PROFILE_KEY],
      |_| Ok(()),
    )
    .optional()?
    .is_some(),
  )
}

fn touch(tx: &Transaction<'_>, now: &str) -> rusqlite::Result<()> {
  tx.execute(
    "UPDATE profiles SET updated_at = ?1 WHERE profile_key = ?2",
    rusqlite::params![now, PROFILE_KEY],
  )?;
  Ok(())
}

fn read_entries(tx: &Transaction<'_>, collection: &str) -> rusqlite::Result<Vec<String>> {
  let mut stmt = tx.prepare(
    "SELECT body_json FROM entries
     WHERE profile_key = ?1 AND collection = ?2
     ORDER BY position",
  )?;
  let rows = stmt
    .query_map(rusqlite::params![PROFILE_KEY, collection], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;
  Ok(rows)
}

fn read_skills(tx: &Transaction<'_>) -> rusqlite::Result<Vec<String>> {
  let mut stmt = tx.prepare(
    "SELECT value FROM skills WHERE profile_key = ?1 ORDER BY position",
  )?;
  let rows = stmt
    .query_map([PROFILE_KEY], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;
  Ok(rows)
}

fn read_profile(tx: &Transaction<'_>) -> rusqlite::Result<Option<RawProfile>> {
  let head = tx
    .query_row(
      "SELECT name, email, links_json, created_at, updated_at
       FROM profiles WHERE profile_key = ?1",
      [PROFILE_KEY],
      |row| {
        Ok(RawProfile {
          name:       row.get(0)?,
          email:      row.get(1)?,
          links_json: row.get(2)?,
          created_at: row.get(3)?,
          updated_at: row.get(4)?,
          skills:     Vec::new(),
          entries:    Vec::new(),
        })
      },
    )
    .optional()?;

  let Some(mut raw) = head else {
    return Ok(None);
  };

  raw.skills = read_skills(tx)?;

  let mut stmt = tx.prepare(
    "SELECT collection, body_json FROM entries
     WHERE profile_key = ?1
     ORDER BY collection, position",
  )?;
  raw.entries = stmt
    .query_map([PROFILE_KEY], |row| Ok((row.get(0)?, row.get(1)?)))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(Some(raw))
}

fn write_entries(
  tx: &Transaction<'_>,
  collection: &str,
  rows: &[EncodedEntry],
) -> rusqlite::Result<()> {
  tx.execute(
    "DELETE FROM entries WHERE profile_key = ?1 AND collection = ?2",
    rusqlite::params![PROFILE_KEY, collection],
  )?;
  let mut stmt = tx.prepare(
    "INSERT INTO entries (entry_id, profile_key, collection, position, body_json)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for (position, row) in (1_i64..).zip(rows) {
    stmt.execute(rusqlite::params![
      row.entry_id,
      PROFILE_KEY,
      collection,
      position,
      row.body_json,
    ])?;
  }
  Ok(())
}

fn write_skills(tx: &Transaction<'_>, skills: &[String]) -> rusqlite::Result<()> {
  tx.execute("DELETE FROM skills WHERE profile_key = ?1", [PROFILE_KEY])?;
  let mut stmt = tx.prepare(
    "INSERT INTO skills (profile_key, position, value) VALUES (?1, ?2, ?3)",
  )?;
  for (position, skill) in (1_i64..).zip(skills) {
    stmt.execute(rusqlite::params![PROFILE_KEY, position, skill])?;
  }
  Ok(())
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

/// Turn a uniqueness failure on a statement writing `profiles.email` into
/// [`Error::DuplicateEmail`]; other failures stay database errors.
fn guard_email(
  result: rusqlite::Result<usize>,
  email: Option<&str>,
) -> rusqlite::Result<Result<usize>> {
  match result {
    Ok(n) => Ok(Ok(n)),
    Err(e) if is_unique_violation(&e) => Ok(Err(Error::DuplicateEmail(
      email.unwrap_or_default().to_owned(),
    ))),
    Err(e) => Err(e),
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  // ── Profile ───────────────────────────────────────────────────────────────

  async fn get_profile(&self) -> Result<Option<Profile>> {
    let raw = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let raw = read_profile(&tx)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn replace_or_create(&self, input: ProfileInput) -> Result<Profile> {
    input.validate()?;
    let create_check = input.validate_for_create().map_err(Error::from);

    let links_json = input.links.as_ref().map(encode_links).transpose()?;
    let skills = input.skills.map(dedup_skills);

    let mut replacements: Vec<(String, Vec<EncodedEntry>)> = Vec::new();
    if let Some(education) = input.education {
      replacements.push((
        Collection::Education.to_string(),
        encode_replacement::<Education>(education)?,
      ));
    }
    if let Some(projects) = input.projects {
      replacements.push((
        Collection::Projects.to_string(),
        encode_replacement::<Project>(projects)?,
      ));
    }
    if let Some(work) = input.work {
      replacements.push((
        Collection::Work.to_string(),
        encode_replacement::<WorkExperience>(work)?,
      ));
    }

    let name = input.name;
    let email = input.email;
    let now = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let written = if profile_exists(&tx)? {
          guard_email(
            tx.execute(
              "UPDATE profiles SET
                 name       = COALESCE(?1, name),
                 email      = COALESCE(?2, email),
                 links_json = COALESCE(?3, links_json),
                 updated_at = ?4
               WHERE profile_key = ?5",
              rusqlite::params![name, email, links_json, now, PROFILE_KEY],
            ),
            email.as_deref(),
          )?
        } else {
          if let Err(e) = create_check {
            return Ok(Err(e));
          }
          guard_email(
            tx.execute(
              "INSERT INTO profiles
                 (profile_key, name, email, links_json, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
              rusqlite::params![
                PROFILE_KEY,
                name.as_deref().unwrap_or_default(),
                email.as_deref().unwrap_or_default(),
                links_json.as_deref().unwrap_or("{}"),
                now,
              ],
            ),
            email.as_deref(),
          )?
        };
        if let Err(e) = written {
          return Ok(Err(e));
        }

        for (collection, rows) in &replacements {
          write_entries(&tx, collection, rows)?;
        }
        if let Some(skills) = &skills {
          write_skills(&tx, skills)?;
        }

        let raw = read_profile(&tx)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    raw.ok_or(Error::ProfileNotFound)?.into_profile()
  }

  async fn update_basic(&self, fields: BasicInfo) -> Result<Profile> {
    fields.validate()?;
    let links_json = fields.links.as_ref().map(encode_links).transpose()?;
    let BasicInfo { name, email, .. } = fields;
    let now = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !profile_exists(&tx)? {
          return Ok(Err(Error::ProfileNotFound));
        }

        let written = guard_email(
          tx.execute(
            "UPDATE profiles SET
               name       = COALESCE(?1, name),
               email      = COALESCE(?2, email),
               links_json = COALESCE(?3, links_json),
               updated_at = ?4
             WHERE profile_key = ?5",
            rusqlite::params![name, email, links_json, now, PROFILE_KEY],
          ),
          email.as_deref(),
        )?;
        if let Err(e) = written {
          return Ok(Err(e));
        }

        let raw = read_profile(&tx)?;
        tx.commit()?;
        Ok(Ok(raw))
      })
      .await??;

    raw.ok_or(Error::ProfileNotFound)?.into_profile()
  }

  async fn delete_profile(&self) -> Result<()> {
    // Entries and skills go with it via ON DELETE CASCADE.
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM profiles WHERE profile_key = ?1", [PROFILE_KEY])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Entries ───────────────────────────────────────────────────────────────

  async fn append_entry<E: Entry>(&self, input: E::Input) -> Result<Vec<E>> {
    input.validate()?;
    let entry = encode_entry(&E::from_input(Uuid::new_v4(), input))?;
    let collection = E::COLLECTION.to_string();
    let now = encode_dt(Utc::now());

    let bodies = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !profile_exists(&tx)? {
          return Ok(Err(Error::ProfileNotFound));
        }

        tx.execute(
          "INSERT INTO entries (entry_id, profile_key, collection, position, body_json)
           VALUES (
             ?1, ?2, ?3,
             (SELECT COALESCE(MAX(position), 0) + 1 FROM entries
              WHERE profile_key = ?2 AND collection = ?3),
             ?4
           )",
          rusqlite::params![entry.entry_id, PROFILE_KEY, collection, entry.body_json],
        )?;
        touch(&tx, &now)?;

        let bodies = read_entries(&tx, &collection)?;
        tx.commit()?;
        Ok(Ok(bodies))
      })
      .await??;

    decode_entries(&bodies)
  }

  async fn replace_entry<E: Entry>(&self, id: Uuid, input: E::Input) -> Result<Vec<E>> {
    input.validate()?;
    let entry = encode_entry(&E::from_input(id, input))?;
    let collection = E::COLLECTION.to_string();
    let now = encode_dt(Utc::now());

    let bodies = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !profile_exists(&tx)? {
          return Ok(Err(Error::ProfileNotFound));
        }

        // An unknown id matches no row and leaves the collection as it was.
        let changed = tx.execute(
          "UPDATE entries SET body_json = ?1
           WHERE profile_key = ?2 AND collection = ?3 AND entry_id = ?4",
          rusqlite::params![entry.body_json, PROFILE_KEY, collection, entry.entry_id],
        )?;
        if changed > 0 {
          touch(&tx, &now)?;
        }

        let bodies = read_entries(&tx, &collection)?;
        tx.commit()?;
        Ok(Ok(bodies))
      })
      .await??;

    decode_entries(&bodies)
  }

  async fn remove_entry<E: Entry>(&self, id: Uuid) -> Result<Vec<E>> {
    let entry_id = encode_uuid(id);
    let collection = E::COLLECTION.to_string();
    let now = encode_dt(Utc::now());

    let bodies = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !profile_exists(&tx)? {
          return Ok(Err(Error::ProfileNotFound));
        }

        let changed = tx.execute(
          "DELETE FROM entries
           WHERE profile_key = ?1 AND collection = ?2 AND entry_id = ?3",
          rusqlite::params![PROFILE_KEY, collection, entry_id],
        )?;
        if changed > 0 {
          touch(&tx, &now)?;
        }

        let bodies = read_entries(&tx, &collection)?;
        tx.commit()?;
        Ok(Ok(bodies))
      })
      .await??;

    decode_entries(&bodies)
  }

  // ── Skills ────────────────────────────────────────────────────────────────

  async fn add_skill(&self, skill: String) -> Result<Vec<String>> {
    Checker::new("skill").require("skill", &skill).finish()?;
    let now = encode_dt(Utc::now());

    let skills = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !profile_exists(&tx)? {
          return Ok(Err(Error::ProfileNotFound));
        }

        // UNIQUE (profile_key, value) makes a repeat add a no-op.
        let changed = tx.execute(
          "INSERT OR IGNORE INTO skills (profile_key, position, value)
           VALUES (
             ?1,
             (SELECT COALESCE(MAX(position), 0) + 1 FROM skills WHERE profile_key = ?1),
             ?2
           )",
          rusqlite::params![PROFILE_KEY, skill],
        )?;
        if changed > 0 {
          touch(&tx, &now)?;
        }

        let skills = read_skills(&tx)?;
        tx.commit()?;
        Ok(Ok(skills))
      })
      .await??;

    Ok(skills)
  }

  async fn remove_skill(&self, skill: String) -> Result<Vec<String>> {
    let now = encode_dt(Utc::now());

    let skills = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if !profile_exists(&tx)? {
          return Ok(Err(Error::ProfileNotFound));
        }

        let changed = tx.execute(
          "DELETE FROM skills WHERE profile_key = ?1 AND value = ?2",
          rusqlite::params![PROFILE_KEY, skill],
        )?;
        if changed > 0 {
          touch(&tx, &now)?;
        }

        let skills = read_skills(&tx)?;
        tx.commit()?;
        Ok(Ok(skills))
      })
      .await??;

    Ok(skills)
  }
}
