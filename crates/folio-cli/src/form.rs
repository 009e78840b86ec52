//! Field prompts for adding and editing profile data.
//!
//! A [`Form`] is a list of labelled text fields. On submit it is turned into
//! the request body of the matching endpoint; only the parsing a text field
//! needs (numbers, dates, comma lists) happens here. Whether the values are
//! acceptable is left to the server.

use anyhow::{Context as _, Result};
use folio_core::{
  date,
  entry::{
    Collection, Education, EducationInput, Project, ProjectInput, ProjectLinks,
    WorkExperience, WorkInput,
  },
  profile::{BasicInfo, Links, Profile},
};
use uuid::Uuid;

// ─── Form ─────────────────────────────────────────────────────────────────────

/// What a form submits to. Entry kinds carry the id being edited, `None`
/// when adding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
  Skill,
  SkillFilter,
  Basic,
  Education(Option<Uuid>),
  Project(Option<Uuid>),
  Work(Option<Uuid>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
  pub label: &'static str,
  pub value: String,
}

#[derive(Debug, Clone)]
pub struct Form {
  pub kind:   FormKind,
  pub fields: Vec<Field>,
  /// Index of the field receiving keystrokes.
  pub cursor: usize,
}

/// A parsed form, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
  Skill(String),
  SkillFilter(String),
  Basic(BasicInfo),
  Education(Option<Uuid>, EducationInput),
  Project(Option<Uuid>, ProjectInput),
  Work(Option<Uuid>, WorkInput),
}

fn fields<const N: usize>(pairs: [(&'static str, String); N]) -> Vec<Field> {
  pairs
    .into_iter()
    .map(|(label, value)| Field { label, value })
    .collect()
}

fn or_empty(value: &Option<String>) -> String { value.clone().unwrap_or_default() }

impl Form {
  fn new(kind: FormKind, fields: Vec<Field>) -> Self { Self { kind, fields, cursor: 0 } }

  pub fn skill() -> Self { Self::new(FormKind::Skill, fields([("Skill", String::new())])) }

  pub fn skill_filter(initial: &str) -> Self {
    Self::new(FormKind::SkillFilter, fields([("Skill", initial.to_owned())]))
  }

  pub fn basic(profile: &Profile) -> Self {
    let links = &profile.links;
    Self::new(
      FormKind::Basic,
      fields([
        ("Name", profile.name.clone()),
        ("Email", profile.email.clone()),
        ("GitHub", or_empty(&links.github)),
        ("LinkedIn", or_empty(&links.linkedin)),
        ("Portfolio", or_empty(&links.portfolio)),
      ]),
    )
  }

  /// An empty add form for `collection`.
  pub fn add(collection: Collection) -> Self {
    match collection {
      Collection::Education => Self::education(None),
      Collection::Projects => Self::project(None),
      Collection::Work => Self::work(None),
    }
  }

  pub fn education(e: Option<&Education>) -> Self {
    Self::new(
      FormKind::Education(e.map(|e| e.id)),
      fields([
        ("Institution", e.map(|e| e.institution.clone()).unwrap_or_default()),
        ("Degree", e.map(|e| e.degree.clone()).unwrap_or_default()),
        ("Field", e.map(|e| e.field.clone()).unwrap_or_default()),
        ("Start year", e.map(|e| e.start_year.to_string()).unwrap_or_default()),
        (
          "End year",
          e.and_then(|e| e.end_year).map(|y| y.to_string()).unwrap_or_default(),
        ),
      ]),
    )
  }

  pub fn project(p: Option<&Project>) -> Self {
    Self::new(
      FormKind::Project(p.map(|p| p.id)),
      fields([
        ("Title", p.map(|p| p.title.clone()).unwrap_or_default()),
        ("Description", p.map(|p| p.description.clone()).unwrap_or_default()),
        ("Skills", p.map(|p| p.skills.join(", ")).unwrap_or_default()),
        ("GitHub", p.and_then(|p| p.links.github.clone()).unwrap_or_default()),
        ("Demo", p.and_then(|p| p.links.demo.clone()).unwrap_or_default()),
      ]),
    )
  }

  pub fn work(w: Option<&WorkExperience>) -> Self {
    Self::new(
      FormKind::Work(w.map(|w| w.id)),
      fields([
        ("Company", w.map(|w| w.company.clone()).unwrap_or_default()),
        ("Position", w.map(|w| w.position.clone()).unwrap_or_default()),
        ("Description", w.map(|w| w.description.clone()).unwrap_or_default()),
        ("Start date", w.map(|w| w.start_date.to_string()).unwrap_or_default()),
        (
          "End date",
          w.and_then(|w| w.end_date).map(|d| d.to_string()).unwrap_or_default(),
        ),
      ]),
    )
  }

  pub fn title(&self) -> &'static str {
    match self.kind {
      FormKind::Skill => "Add skill",
      FormKind::SkillFilter => "Projects with skill",
      FormKind::Basic => "Edit profile",
      FormKind::Education(None) => "Add education",
      FormKind::Education(Some(_)) => "Edit education",
      FormKind::Project(None) => "Add project",
      FormKind::Project(Some(_)) => "Edit project",
      FormKind::Work(None) => "Add work",
      FormKind::Work(Some(_)) => "Edit work",
    }
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  pub fn next_field(&mut self) { self.cursor = (self.cursor + 1) % self.fields.len(); }

  pub fn prev_field(&mut self) {
    self.cursor = (self.cursor + self.fields.len() - 1) % self.fields.len();
  }

  pub fn push(&mut self, c: char) { self.fields[self.cursor].value.push(c); }

  pub fn pop(&mut self) { self.fields[self.cursor].value.pop(); }

  // ── Submission ────────────────────────────────────────────────────────────

  fn text(&self, i: usize) -> String { self.fields[i].value.trim().to_owned() }

  fn optional(&self, i: usize) -> Option<String> {
    Some(self.text(i)).filter(|v| !v.is_empty())
  }

  fn year(&self, i: usize) -> Result<Option<i32>> {
    self
      .optional(i)
      .map(|v| {
        v.parse()
          .with_context(|| format!("{} must be a year, got {v:?}", self.fields[i].label))
      })
      .transpose()
  }

  fn date(&self, i: usize) -> Result<Option<chrono::NaiveDate>> {
    self
      .optional(i)
      .map(|v| date::parse(&v).map_err(anyhow::Error::msg))
      .transpose()
  }

  /// Parse the fields into the request they stand for.
  pub fn submission(&self) -> Result<Submission> {
    Ok(match self.kind {
      FormKind::Skill => Submission::Skill(self.text(0)),
      FormKind::SkillFilter => Submission::SkillFilter(self.text(0)),
      FormKind::Basic => Submission::Basic(BasicInfo {
        name:  Some(self.text(0)),
        email: Some(self.text(1)),
        links: Some(Links {
          github:    self.optional(2),
          linkedin:  self.optional(3),
          portfolio: self.optional(4),
        }),
      }),
      FormKind::Education(id) => Submission::Education(id, EducationInput {
        id:          None,
        institution: self.text(0),
        degree:      self.text(1),
        field:       self.text(2),
        start_year:  self.year(3)?.context("Start year is required")?,
        end_year:    self.year(4)?,
      }),
      FormKind::Project(id) => Submission::Project(id, ProjectInput {
        id:          None,
        title:       self.text(0),
        description: self.text(1),
        skills:      self
          .text(2)
          .split(',')
          .map(str::trim)
          .filter(|s| !s.is_empty())
          .map(str::to_owned)
          .collect(),
        links:       ProjectLinks {
          github: self.optional(3),
          demo:   self.optional(4),
        },
      }),
      FormKind::Work(id) => Submission::Work(id, WorkInput {
        id:          None,
        company:     self.text(0),
        position:    self.text(1),
        description: self.text(2),
        start_date:  self.date(3)?.context("Start date is required")?,
        end_date:    self.date(4)?,
      }),
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use folio_core::entry::Entry as _;

  use super::*;

  fn typed(mut form: Form, values: &[&str]) -> Form {
    for value in values {
      for c in value.chars() {
        form.push(c);
      }
      form.next_field();
    }
    form
  }

  #[test]
  fn project_skills_split_on_commas() {
    let form = typed(Form::add(Collection::Projects), &[
      "Folio",
      "Backend",
      "Rust, SQLite,, axum ",
      "",
      "https://folio.dev",
    ]);
    let Submission::Project(None, input) = form.submission().unwrap() else {
      panic!("expected a project submission");
    };
    assert_eq!(input.skills, ["Rust", "SQLite", "axum"]);
    assert_eq!(input.links.github, None);
    assert_eq!(input.links.demo.as_deref(), Some("https://folio.dev"));
  }

  #[test]
  fn work_dates_parse_and_end_is_optional() {
    let form = typed(Form::add(Collection::Work), &[
      "Acme",
      "Engineer",
      "Things",
      "2021-03-01",
      "",
    ]);
    let Submission::Work(None, input) = form.submission().unwrap() else {
      panic!("expected a work submission");
    };
    assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
    assert_eq!(input.end_date, None);
  }

  #[test]
  fn bad_numbers_and_dates_are_reported() {
    let form = typed(Form::add(Collection::Education), &["MIT", "BSc", "CS", "soon"]);
    let err = form.submission().unwrap_err().to_string();
    assert!(err.contains("Start year"), "{err}");

    let form = typed(Form::add(Collection::Work), &["Acme", "Eng", "x", "yesterday"]);
    assert!(form.submission().is_err());

    let form = Form::add(Collection::Work);
    let err = form.submission().unwrap_err().to_string();
    assert_eq!(err, "Start date is required");
  }

  #[test]
  fn edit_forms_are_prefilled_and_keep_the_id() {
    let id = Uuid::new_v4();
    let education = Education::from_input(id, EducationInput {
      id:          None,
      institution: "Tech University".into(),
      degree:      "BSc".into(),
      field:       "CS".into(),
      start_year:  2016,
      end_year:    Some(2020),
    });
    let form = Form::education(Some(&education));
    assert_eq!(form.title(), "Edit education");
    assert_eq!(form.fields[4].value, "2020");

    let Submission::Education(Some(sent), input) = form.submission().unwrap() else {
      panic!("expected an education edit");
    };
    assert_eq!(sent, id);
    assert_eq!(input.start_year, 2016);
    assert_eq!(input.end_year, Some(2020));
  }

  #[test]
  fn field_cursor_wraps() {
    let mut form = Form::skill_filter("Rust");
    form.next_field();
    assert_eq!(form.cursor, 0);
    form.pop();
    assert_eq!(form.submission().unwrap(), Submission::SkillFilter("Rus".into()));

    let mut form = Form::add(Collection::Projects);
    form.prev_field();
    assert_eq!(form.cursor, 4);
  }
}
