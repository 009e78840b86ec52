//! The profile aggregate: the single document the service manages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  entry::{Education, EducationInput, Project, ProjectInput, WorkExperience, WorkInput},
  validate::{Checker, Validate},
};

/// External profile links. No format validation beyond "is a string".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub github:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub linkedin:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub portfolio: Option<String>,
}

/// The aggregate root. Exactly one exists once the service has been seeded;
/// its embedded collections live and die with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub name:       String,
  /// Unique across the store.
  pub email:      String,
  #[serde(default)]
  pub links:      Links,
  /// Deduplicated by exact value; insertion order preserved.
  #[serde(default)]
  pub skills:     Vec<String>,
  #[serde(default)]
  pub education:  Vec<Education>,
  #[serde(default)]
  pub projects:   Vec<Project>,
  #[serde(default)]
  pub work:       Vec<WorkExperience>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Body of a create-or-replace call.
///
/// Every field is optional: present fields replace the stored value
/// wholesale, absent fields keep it. Creating a profile requires `name` and
/// `email`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
  pub name:      Option<String>,
  pub email:     Option<String>,
  pub links:     Option<Links>,
  pub skills:    Option<Vec<String>>,
  pub education: Option<Vec<EducationInput>>,
  pub projects:  Option<Vec<ProjectInput>>,
  pub work:      Option<Vec<WorkInput>>,
}

impl ProfileInput {
  /// Additional checks when this input would create the profile.
  pub fn validate_for_create(&self) -> Result<()> {
    Checker::new("profile")
      .require_present("name", self.name.as_ref())
      .require_present("email", self.email.as_ref())
      .nested(self.validate())
      .finish()
  }
}

impl Validate for ProfileInput {
  fn validate(&self) -> Result<()> {
    let mut checker = Checker::new("profile");
    checker
      .require_if_present("name", self.name.as_deref())
      .require_if_present("email", self.email.as_deref());
    for skill in self.skills.iter().flatten() {
      checker.require("skills[]", skill);
    }
    for e in self.education.iter().flatten() {
      checker.nested(e.validate());
    }
    for p in self.projects.iter().flatten() {
      checker.nested(p.validate());
    }
    for w in self.work.iter().flatten() {
      checker.nested(w.validate());
    }
    checker.finish()
  }
}

/// Body of a basic-info update: only these three top-level fields, embedded
/// collections untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
  pub name:  Option<String>,
  pub email: Option<String>,
  pub links: Option<Links>,
}

impl Validate for BasicInfo {
  fn validate(&self) -> Result<()> {
    Checker::new("profile")
      .require_if_present("name", self.name.as_deref())
      .require_if_present("email", self.email.as_deref())
      .finish()
  }
}

/// Deduplicate skills by exact value, keeping the first occurrence.
pub fn dedup_skills(skills: Vec<String>) -> Vec<String> {
  let mut seen = std::collections::HashSet::new();
  skills
    .into_iter()
    .filter(|s| seen.insert(s.clone()))
    .collect()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn create_requires_name_and_email() {
    let input = ProfileInput { name: Some("Jane".into()), ..Default::default() };
    assert!(input.validate().is_ok());
    let err = input.validate_for_create().unwrap_err();
    assert!(err.to_string().contains("email"), "{err}");
  }

  #[test]
  fn nested_entry_problems_surface() {
    let input: ProfileInput = serde_json::from_value(json!({
      "name": "Jane",
      "email": "jane@example.com",
      "projects": [{ "title": "", "description": "d" }]
    }))
    .unwrap();
    let err = input.validate_for_create().unwrap_err();
    assert!(err.to_string().contains("title"), "{err}");
  }

  #[test]
  fn basic_info_rejects_empty_name() {
    let basic = BasicInfo { name: Some(String::new()), ..Default::default() };
    assert!(basic.validate().is_err());
    assert!(BasicInfo::default().validate().is_ok());
  }

  #[test]
  fn dedup_keeps_first_occurrence_and_case() {
    let skills = vec!["Go".into(), "Rust".into(), "Go".into(), "go".into()];
    assert_eq!(dedup_skills(skills), vec!["Go", "Rust", "go"]);
  }
}
