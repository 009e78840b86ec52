//! Flattening of the profile and search results into display rows.
//!
//! Each row optionally carries the [`Target`] a delete would act on; the TUI
//! never decides anything beyond which endpoint a row maps to.

use chrono::NaiveDate;
use folio_core::{
  entry::{Collection, Entry as _, Project, WorkExperience},
  profile::Profile,
  query::SearchResults,
};
use uuid::Uuid;

// ─── Sections ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
  Profile,
  Education,
  Skills,
  Projects,
  Work,
  TopSkills,
}

impl Section {
  pub const ALL: [Section; 6] = [
    Section::Profile,
    Section::Education,
    Section::Skills,
    Section::Projects,
    Section::Work,
    Section::TopSkills,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Section::Profile => "Profile",
      Section::Education => "Education",
      Section::Skills => "Skills",
      Section::Projects => "Projects",
      Section::Work => "Work",
      Section::TopSkills => "Top skills",
    }
  }
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

/// What a delete on a row removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  Entry(Collection, Uuid),
  Skill(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  pub label:   String,
  pub detail:  String,
  pub heading: bool,
  pub target:  Option<Target>,
}

impl Row {
  fn plain(label: impl Into<String>, detail: impl Into<String>) -> Self {
    Self { label: label.into(), detail: detail.into(), heading: false, target: None }
  }

  fn heading(label: impl Into<String>) -> Self {
    Self { label: label.into(), detail: String::new(), heading: true, target: None }
  }

  fn with_target(mut self, target: Target) -> Self {
    self.target = Some(target);
    self
  }

  /// Text the fuzzy filter matches against.
  pub fn haystack(&self) -> String { format!("{} {}", self.label, self.detail) }
}

fn month(date: NaiveDate) -> String { date.format("%Y-%m").to_string() }

fn tenure(work: &WorkExperience) -> String {
  let end = if work.is_current() {
    "present".to_owned()
  } else {
    work.end_date.map(month).unwrap_or_default()
  };
  format!("{} – {end}", month(work.start_date))
}

fn years(start: i32, end: Option<i32>) -> String {
  match end {
    Some(end) => format!("{start} – {end}"),
    None => format!("{start} – present"),
  }
}

fn project_row(p: &Project) -> Row {
  Row::plain(&p.title, p.skills.join(", "))
    .with_target(Target::Entry(Collection::Projects, p.id()))
}

fn education_rows<'a>(
  education: impl IntoIterator<Item = &'a folio_core::entry::Education>,
) -> impl Iterator<Item = Row> {
  education.into_iter().map(|e| {
    Row::plain(
      format!("{}, {}", e.degree, e.field),
      format!("{}  {}", e.institution, years(e.start_year, e.end_year)),
    )
    .with_target(Target::Entry(Collection::Education, e.id()))
  })
}

fn work_rows<'a>(
  work: impl IntoIterator<Item = &'a WorkExperience>,
) -> impl Iterator<Item = Row> {
  work.into_iter().map(|w| {
    Row::plain(
      format!("{} @ {}", w.position, w.company),
      tenure(w),
    )
    .with_target(Target::Entry(Collection::Work, w.id()))
  })
}

fn skill_rows<'a>(skills: impl IntoIterator<Item = &'a String>) -> impl Iterator<Item = Row> {
  skills
    .into_iter()
    .map(|s| Row::plain(s, "").with_target(Target::Skill(s.clone())))
}

/// Rows for one section of the profile.
pub fn section_rows(section: Section, profile: &Profile, top_skills: &[String]) -> Vec<Row> {
  match section {
    Section::Profile => {
      let links = &profile.links;
      let mut rows = vec![
        Row::plain("Name", &profile.name),
        Row::plain("Email", &profile.email),
      ];
      for (label, link) in [
        ("GitHub", &links.github),
        ("LinkedIn", &links.linkedin),
        ("Portfolio", &links.portfolio),
      ] {
        if let Some(link) = link {
          rows.push(Row::plain(label, link));
        }
      }
      rows.push(Row::plain("Updated", profile.updated_at.format("%Y-%m-%d %H:%M").to_string()));
      rows
    }
    Section::Education => education_rows(&profile.education).collect(),
    Section::Skills => skill_rows(&profile.skills).collect(),
    Section::Projects => project_rows(&profile.projects),
    Section::Work => work_rows(&profile.work).collect(),
    Section::TopSkills => top_skills
      .iter()
      .enumerate()
      .map(|(i, s)| Row::plain(format!("{:>2}. {s}", i + 1), ""))
      .collect(),
  }
}

/// Rows for a list of projects, such as those tagged with one skill.
pub fn project_rows(projects: &[Project]) -> Vec<Row> { projects.iter().map(project_row).collect() }

/// Rows for a search result, one headed group per result set. Empty groups
/// are omitted.
pub fn search_rows(results: &SearchResults) -> Vec<Row> {
  let mut rows = Vec::new();

  let mut profile: Vec<Row> = Vec::new();
  if let Some(name) = &results.profile.name {
    profile.push(Row::plain("Name", name));
  }
  profile.extend(skill_rows(&results.profile.skills));

  let groups: [(&str, Vec<Row>); 4] = [
    ("Profile", profile),
    ("Education", education_rows(&results.profile.education).collect()),
    ("Projects", results.projects.iter().map(project_row).collect()),
    ("Work", work_rows(&results.work).collect()),
  ];
  for (title, group) in groups {
    if group.is_empty() {
      continue;
    }
    rows.push(Row::heading(format!("{title} ({})", group.len())));
    rows.extend(group);
  }
  rows
}
