//! The `ProfileStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `folio-store-sqlite`).
//! Higher layers (`folio-api`, `folio-server`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

pub use crate::error::Classify;
use crate::{
  entry::Entry,
  profile::{BasicInfo, Profile, ProfileInput},
};

/// Abstraction over the single-profile aggregate store.
///
/// There is at most one profile. Every mutation targets that one document and
/// is applied atomically; there is no cross-call locking, so the last writer
/// wins for conflicting replacements.
///
/// Mutations other than [`ProfileStore::replace_or_create`] and
/// [`ProfileStore::delete_profile`] fail with a not-found error when no
/// profile exists. Entry and skill mutations that match nothing are silent
/// no-ops returning the unchanged collection.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Profile ───────────────────────────────────────────────────────────

  /// The current profile, or `None` if none has been created. Absence is
  /// never an error.
  fn get_profile(
    &self,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// Create the profile, or replace the top-level fields present in `input`.
  ///
  /// Fails with a conflict error if the email is already taken.
  fn replace_or_create(
    &self,
    input: ProfileInput,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Update only name, email and links.
  fn update_basic(
    &self,
    fields: BasicInfo,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Remove the profile and everything embedded in it. Idempotent.
  fn delete_profile(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Entries ───────────────────────────────────────────────────────────

  /// Validate `input`, assign it a fresh identifier and append it to the end
  /// of its collection. Returns the full updated collection.
  fn append_entry<E: Entry>(
    &self,
    input: E::Input,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Replace the entry with identifier `id` in place, keeping its position
  /// and identifier. Returns the full updated collection.
  fn replace_entry<E: Entry>(
    &self,
    id: Uuid,
    input: E::Input,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  /// Remove the entry with identifier `id`. Returns the full updated
  /// collection.
  fn remove_entry<E: Entry>(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Vec<E>, Self::Error>> + Send + '_;

  // ── Skills ────────────────────────────────────────────────────────────

  /// Add `skill` unless an identical value is already present. Returns the
  /// full skill list.
  fn add_skill(
    &self,
    skill: String,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Remove every occurrence of `skill`. Returns the full skill list.
  fn remove_skill(
    &self,
    skill: String,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
