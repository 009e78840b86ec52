//! Read-only queries over a profile: the skill-scoped project filter, the
//! top-skills ranking and the general keyword search.
//!
//! All matching is plain case-insensitive string comparison. There is no
//! tokenisation, stemming or relevance scoring.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  entry::{Education, Project, WorkExperience},
  profile::Profile,
};

/// Number of skills returned by [`top_skills`] at the API boundary.
pub const TOP_SKILLS_LIMIT: usize = 10;

// ─── Skill-scoped project filter ─────────────────────────────────────────────

/// Projects tagged with `skill`, compared case-insensitively and exactly (not
/// by substring). Collection order is preserved.
pub fn projects_with_skill(profile: &Profile, skill: &str) -> Vec<Project> {
  let wanted = skill.to_lowercase();
  profile
    .projects
    .iter()
    .filter(|p| p.skills.iter().any(|s| s.to_lowercase() == wanted))
    .cloned()
    .collect()
}

// ─── Top skills ──────────────────────────────────────────────────────────────

/// Rank skills by how often they occur across the profile skill list and
/// every project's skill list, highest first, keeping at most `limit`.
///
/// Each profile-level skill counts once; each project tag occurrence counts
/// once, repeats included. Counting is case-sensitive. Ties keep the order in
/// which the skills were first seen: profile skills first, then projects in
/// collection order.
pub fn top_skills(profile: &Profile, limit: usize) -> Vec<String> {
  let mut tally: Vec<(&str, usize)> = Vec::new();
  let mut index: HashMap<&str, usize> = HashMap::new();

  let occurrences = profile
    .skills
    .iter()
    .chain(profile.projects.iter().flat_map(|p| p.skills.iter()));

  for skill in occurrences {
    match index.get(skill.as_str()) {
      Some(&i) => tally[i].1 += 1,
      None => {
        index.insert(skill.as_str(), tally.len());
        tally.push((skill.as_str(), 1));
      }
    }
  }

  // `sort_by` is stable, so equal counts stay in first-seen order.
  tally.sort_by(|a, b| b.1.cmp(&a.1));
  tally
    .into_iter()
    .take(limit)
    .map(|(skill, _)| skill.to_owned())
    .collect()
}

// ─── Keyword search ──────────────────────────────────────────────────────────

/// Profile-level part of [`SearchResults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMatches {
  /// The profile name if it matched, otherwise `null` on the wire.
  pub name:      Option<String>,
  pub skills:    Vec<String>,
  pub education: Vec<Education>,
}

/// Four independently filtered views of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
  pub profile:  ProfileMatches,
  pub projects: Vec<Project>,
  pub work:     Vec<WorkExperience>,
}

impl SearchResults {
  pub fn is_empty(&self) -> bool {
    self.profile.name.is_none()
      && self.profile.skills.is_empty()
      && self.profile.education.is_empty()
      && self.projects.is_empty()
      && self.work.is_empty()
  }
}

/// Case-insensitive substring search over the searchable text of `profile`.
/// An entry is included whole if any of its searchable fields match.
pub fn search(profile: &Profile, query: &str) -> SearchResults {
  let needle = query.to_lowercase();
  let hit = |text: &str| text.to_lowercase().contains(&needle);

  SearchResults {
    profile:  ProfileMatches {
      name:      hit(&profile.name).then(|| profile.name.clone()),
      skills:    profile.skills.iter().filter(|s| hit(s)).cloned().collect(),
      education: profile
        .education
        .iter()
        .filter(|e| hit(&e.institution) || hit(&e.degree) || hit(&e.field))
        .cloned()
        .collect(),
    },
    projects: profile
      .projects
      .iter()
      .filter(|p| {
        hit(&p.title) || hit(&p.description) || p.skills.iter().any(|s| hit(s))
      })
      .cloned()
      .collect(),
    work:     profile
      .work
      .iter()
      .filter(|w| hit(&w.company) || hit(&w.position) || hit(&w.description))
      .cloned()
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use uuid::Uuid;

  use super::*;
  use crate::{
    entry::{Entry as _, ProjectInput, ProjectLinks},
    profile::Links,
  };

  fn project(title: &str, skills: &[&str]) -> Project {
    Project::from_input(Uuid::new_v4(), ProjectInput {
      id:          None,
      title:       title.into(),
      description: format!("{title} description"),
      skills:      skills.iter().map(|s| s.to_string()).collect(),
      links:       ProjectLinks::default(),
    })
  }

  fn profile(skills: &[&str], projects: Vec<Project>) -> Profile {
    Profile {
      name: "Jane Roe".into(),
      email: "jane@example.com".into(),
      links: Links::default(),
      skills: skills.iter().map(|s| s.to_string()).collect(),
      education: vec![Education {
        id:          Uuid::new_v4(),
        institution: "Tech University".into(),
        degree:      "Bachelor of Science".into(),
        field:       "Computer Science".into(),
        start_year:  2016,
        end_year:    Some(2020),
      }],
      projects,
      work: vec![WorkExperience {
        id:          Uuid::new_v4(),
        company:     "Tech Solutions Inc.".into(),
        position:    "Senior Developer".into(),
        description: "Maintained web applications".into(),
        start_date:  NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
        end_date:    None,
      }],
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  // ── Project filter ─────────────────────────────────────────────────────────

  #[test]
  fn project_filter_is_case_insensitive() {
    let p = profile(&[], vec![project("Service", &["Go"]), project("Site", &["CSS"])]);
    let hits = projects_with_skill(&p, "go");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Service");
  }

  #[test]
  fn project_filter_is_exact_not_substring() {
    let p = profile(&[], vec![project("Service", &["Golang"])]);
    assert!(projects_with_skill(&p, "go").is_empty());
  }

  #[test]
  fn project_filter_preserves_order() {
    let p = profile(&[], vec![
      project("A", &["Rust"]),
      project("B", &["C"]),
      project("C", &["rust"]),
    ]);
    let titles: Vec<_> = projects_with_skill(&p, "RUST")
      .into_iter()
      .map(|p| p.title)
      .collect();
    assert_eq!(titles, ["A", "C"]);
  }

  // ── Top skills ─────────────────────────────────────────────────────────────

  #[test]
  fn top_skills_counts_profile_and_project_occurrences() {
    let p = profile(&["Go", "Rust"], vec![project("X", &["Go", "Go", "C"])]);
    let top = top_skills(&p, TOP_SKILLS_LIMIT);
    assert_eq!(top[0], "Go");
    assert_eq!(top, ["Go", "Rust", "C"]);
  }

  #[test]
  fn top_skills_ties_keep_first_seen_order() {
    let p = profile(&["B", "A"], vec![project("X", &["C", "A", "B"])]);
    // A=2, B=2, C=1; B was seen before A.
    assert_eq!(top_skills(&p, TOP_SKILLS_LIMIT), ["B", "A", "C"]);
  }

  #[test]
  fn top_skills_truncates() {
    let names: Vec<String> = (0..15).map(|i| format!("s{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let p = profile(&refs, vec![]);
    let top = top_skills(&p, TOP_SKILLS_LIMIT);
    assert_eq!(top.len(), 10);
    assert_eq!(top[0], "s0");
    assert_eq!(top[9], "s9");
  }

  #[test]
  fn top_skills_is_case_sensitive() {
    let p = profile(&["react"], vec![project("X", &["React", "React"])]);
    assert_eq!(top_skills(&p, TOP_SKILLS_LIMIT), ["React", "react"]);
  }

  // ── Search ─────────────────────────────────────────────────────────────────

  #[test]
  fn search_matches_project_by_skill_tag() {
    let p = profile(&[], vec![
      project("E-Commerce Platform", &["React", "Node.js"]),
      project("CLI", &["Rust"]),
    ]);
    let results = search(&p, "react");
    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.projects[0].title, "E-Commerce Platform");
  }

  #[test]
  fn search_reports_unmatched_name_as_none() {
    let p = profile(&["Python"], vec![]);
    let results = search(&p, "python");
    assert_eq!(results.profile.name, None);
    assert_eq!(results.profile.skills, ["Python"]);

    let json = serde_json::to_value(&results).unwrap();
    assert!(json["profile"]["name"].is_null());
  }

  #[test]
  fn search_matches_name_substring() {
    let p = profile(&[], vec![]);
    assert_eq!(search(&p, "ROE").profile.name.as_deref(), Some("Jane Roe"));
  }

  #[test]
  fn search_matches_education_and_work_fields() {
    let p = profile(&[], vec![]);
    let results = search(&p, "computer");
    assert_eq!(results.profile.education.len(), 1);
    assert!(results.work.is_empty());

    let results = search(&p, "senior");
    assert!(results.profile.education.is_empty());
    assert_eq!(results.work.len(), 1);
  }

  #[test]
  fn search_with_no_hits_is_empty() {
    let p = profile(&["Go"], vec![project("X", &["C"])]);
    assert!(search(&p, "haskell").is_empty());
  }
}
