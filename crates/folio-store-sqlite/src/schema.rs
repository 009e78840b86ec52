//! SQL schema for the Folio SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- At most one row, under a well-known key.
CREATE TABLE IF NOT EXISTS profiles (
    profile_key TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    links_json  TEXT NOT NULL DEFAULT '{}',
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC
    updated_at  TEXT NOT NULL    -- RFC 3339 UTC; bumped by every mutation
);

-- Education, project and work entries embedded in a profile.
CREATE TABLE IF NOT EXISTS entries (
    entry_id    TEXT NOT NULL,
    profile_key TEXT NOT NULL REFERENCES profiles(profile_key) ON DELETE CASCADE,
    collection  TEXT NOT NULL,   -- 'education' | 'projects' | 'work'
    position    INTEGER NOT NULL,
    body_json   TEXT NOT NULL,   -- the full serialised entry
    PRIMARY KEY (profile_key, collection, entry_id)
);

-- The profile-level skill set; insertion order kept in `position`.
CREATE TABLE IF NOT EXISTS skills (
    profile_key TEXT NOT NULL REFERENCES profiles(profile_key) ON DELETE CASCADE,
    position    INTEGER NOT NULL,
    value       TEXT NOT NULL,
    UNIQUE (profile_key, value)
);

CREATE INDEX IF NOT EXISTS entries_order_idx ON entries(profile_key, collection, position);
CREATE INDEX IF NOT EXISTS skills_order_idx  ON skills(profile_key, position);

PRAGMA user_version = 1;
";
