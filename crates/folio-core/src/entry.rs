//! Entries: the elements of the profile's three embedded collections.
//!
//! Education, projects and work history share one shape: an identifier
//! assigned by the store plus a typed body. [`Entry`] captures that shape so
//! stores and API handlers are written once for all three collections.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{
  Result,
  profile::Profile,
  validate::{Checker, Validate},
};

// ─── Collection ──────────────────────────────────────────────────────────────

/// Names one of the embedded entry collections. The string form is the
/// discriminant stored alongside each entry.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
  Education,
  Projects,
  Work,
}

// ─── Entry trait ─────────────────────────────────────────────────────────────

/// An element of one of the profile's embedded collections.
pub trait Entry:
  Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// The caller-supplied body used to create or replace an entry.
  type Input: Validate
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static;

  const COLLECTION: Collection;

  fn id(&self) -> Uuid;

  /// Build the stored entry from its input. `id` always wins over any
  /// identifier carried by the input.
  fn from_input(id: Uuid, input: Self::Input) -> Self;

  /// The identifier a caller attached to an input, if any. Only honoured by
  /// whole-profile replacement; appends always assign a fresh identifier.
  fn requested_id(input: &Self::Input) -> Option<Uuid>;

  /// This entry type's collection within `profile`.
  fn of(profile: &Profile) -> &[Self];
}

// ─── Education ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
  pub id:          Uuid,
  pub institution: String,
  pub degree:      String,
  pub field:       String,
  pub start_year:  i32,
  /// Not required to be after `start_year`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_year:    Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationInput {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:          Option<Uuid>,
  pub institution: String,
  pub degree:      String,
  pub field:       String,
  pub start_year:  i32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_year:    Option<i32>,
}

impl Validate for EducationInput {
  fn validate(&self) -> Result<()> {
    Checker::new("education")
      .require("institution", &self.institution)
      .require("degree", &self.degree)
      .require("field", &self.field)
      .finish()
  }
}

impl Entry for Education {
  type Input = EducationInput;

  const COLLECTION: Collection = Collection::Education;

  fn id(&self) -> Uuid { self.id }

  fn from_input(id: Uuid, input: EducationInput) -> Self {
    Self {
      id,
      institution: input.institution,
      degree:      input.degree,
      field:       input.field,
      start_year:  input.start_year,
      end_year:    input.end_year,
    }
  }

  fn requested_id(input: &EducationInput) -> Option<Uuid> { input.id }

  fn of(profile: &Profile) -> &[Self] { &profile.education }
}

// ─── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub github: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub demo:   Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  /// Free-form tags; repeats are allowed and need not appear in the
  /// profile-level skill list.
  #[serde(default)]
  pub skills:      Vec<String>,
  #[serde(default)]
  pub links:       ProjectLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:          Option<Uuid>,
  pub title:       String,
  pub description: String,
  #[serde(default)]
  pub skills:      Vec<String>,
  #[serde(default)]
  pub links:       ProjectLinks,
}

impl Validate for ProjectInput {
  fn validate(&self) -> Result<()> {
    Checker::new("project")
      .require("title", &self.title)
      .require("description", &self.description)
      .finish()
  }
}

impl Entry for Project {
  type Input = ProjectInput;

  const COLLECTION: Collection = Collection::Projects;

  fn id(&self) -> Uuid { self.id }

  fn from_input(id: Uuid, input: ProjectInput) -> Self {
    Self {
      id,
      title:       input.title,
      description: input.description,
      skills:      input.skills,
      links:       input.links,
    }
  }

  fn requested_id(input: &ProjectInput) -> Option<Uuid> { input.id }

  fn of(profile: &Profile) -> &[Self] { &profile.projects }
}

// ─── Work experience ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
  pub id:          Uuid,
  pub company:     String,
  pub position:    String,
  pub description: String,
  #[serde(deserialize_with = "crate::date::deserialize")]
  pub start_date:  NaiveDate,
  /// `None` means this is the current position.
  #[serde(
    default,
    deserialize_with = "crate::date::deserialize_opt",
    skip_serializing_if = "Option::is_none"
  )]
  pub end_date:    Option<NaiveDate>,
}

impl WorkExperience {
  pub fn is_current(&self) -> bool { self.end_date.is_none() }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkInput {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:          Option<Uuid>,
  pub company:     String,
  pub position:    String,
  pub description: String,
  #[serde(deserialize_with = "crate::date::deserialize")]
  pub start_date:  NaiveDate,
  #[serde(
    default,
    deserialize_with = "crate::date::deserialize_opt",
    skip_serializing_if = "Option::is_none"
  )]
  pub end_date:    Option<NaiveDate>,
}

impl Validate for WorkInput {
  fn validate(&self) -> Result<()> {
    Checker::new("work")
      .require("company", &self.company)
      .require("position", &self.position)
      .require("description", &self.description)
      .finish()
  }
}

impl Entry for WorkExperience {
  type Input = WorkInput;

  const COLLECTION: Collection = Collection::Work;

  fn id(&self) -> Uuid { self.id }

  fn from_input(id: Uuid, input: WorkInput) -> Self {
    Self {
      id,
      company:     input.company,
      position:    input.position,
      description: input.description,
      start_date:  input.start_date,
      end_date:    input.end_date,
    }
  }

  fn requested_id(input: &WorkInput) -> Option<Uuid> { input.id }

  fn of(profile: &Profile) -> &[Self] { &profile.work }
}
