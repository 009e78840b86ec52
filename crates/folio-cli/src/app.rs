//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use folio_core::{
  entry::{Collection, Education, Project, WorkExperience},
  profile::Profile,
  query::SearchResults,
};

use crate::{
  client::ApiClient,
  form::{Form, Submission},
  view::{self, Row, Section, Target},
};

// ─── Focus & input ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// Left pane: the section list.
  Sections,
  /// Right pane: rows of the selected section or result set.
  Rows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
  None,
  /// Typing a local fuzzy filter over the right pane.
  Filter,
  /// Typing a server-side search query.
  Search,
  /// Filling in [`App::form`].
  Form,
}

/// A server-side result shown in place of the selected section.
#[derive(Debug, Clone)]
pub enum Results {
  Search { query: String, results: SearchResults },
  ProjectsWithSkill { skill: String, projects: Vec<Project> },
}

impl Results {
  pub fn title(&self) -> String {
    match self {
      Results::Search { query, .. } => format!("Search: {query}"),
      Results::ProjectsWithSkill { skill, .. } => format!("Projects with skill: {skill}"),
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub focus: Focus,
  pub input: Input,

  /// Index into [`Section::ALL`].
  pub section_cursor: usize,

  /// Cursor position within the *filtered* rows.
  pub row_cursor: usize,

  /// `None` until loaded, and when the server has no profile.
  pub profile: Option<Profile>,

  pub top_skills: Vec<String>,

  /// Active search or skill filter.
  pub results: Option<Results>,

  /// Search query being typed.
  pub query: String,

  /// Current fuzzy-filter string.
  pub filter: String,

  /// Open add/edit prompt; `Some` while `input` is [`Input::Form`].
  pub form: Option<Form>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      focus: Focus::Sections,
      input: Input::None,
      section_cursor: 0,
      row_cursor: 0,
      profile: None,
      top_skills: Vec::new(),
      results: None,
      query: String::new(),
      filter: String::new(),
      form: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  pub fn section(&self) -> Section { Section::ALL[self.section_cursor] }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the profile and top skills, and re-run any active result set.
  pub async fn reload(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    let result = self.fetch().await;
    match &result {
      Ok(()) if self.profile.is_none() => {
        self.status_msg = "No profile yet. Press s to seed sample data.".into();
      }
      Ok(()) => self.status_msg.clear(),
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
    self.clamp_row_cursor();
    result
  }

  async fn fetch(&mut self) -> anyhow::Result<()> {
    self.profile = self.client.get_profile().await?;
    self.top_skills = match self.profile {
      Some(_) => self.client.top_skills().await?,
      None => Vec::new(),
    };
    let Some(results) = self.results.take() else {
      return Ok(());
    };
    if self.profile.is_some() {
      self.results = Some(match results {
        Results::Search { query, .. } => {
          let results = self.client.search(&query).await?;
          Results::Search { query, results }
        }
        Results::ProjectsWithSkill { skill, .. } => {
          let projects = self.client.projects_with_skill(&skill).await?;
          Results::ProjectsWithSkill { skill, projects }
        }
      });
    }
    Ok(())
  }

  fn show_results(&mut self, results: Results, empty: bool) {
    self.status_msg = if empty {
      format!("Nothing found for {}", results.title())
    } else {
      String::new()
    };
    self.results = Some(results);
    self.filter.clear();
    self.row_cursor = 0;
    self.focus = Focus::Rows;
  }

  async fn run_search(&mut self) {
    let query = self.query.trim().to_owned();
    if query.is_empty() {
      return;
    }
    match self.client.search(&query).await {
      Ok(results) => {
        let empty = results.is_empty();
        self.show_results(Results::Search { query, results }, empty);
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn delete_selected(&mut self) {
    let Some(target) = self.selected_target() else {
      self.status_msg = "Nothing to delete here.".into();
      return;
    };
    let result = match &target {
      Target::Entry(collection, id) => self.client.delete_entry(*collection, *id).await,
      Target::Skill(skill) => self.client.delete_skill(skill).await,
    };
    match result {
      Ok(()) => {
        if self.reload().await.is_ok() {
          self.status_msg = "Deleted.".into();
        }
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn reseed(&mut self) {
    match self.client.seed().await {
      Ok(()) => {
        self.results = None;
        if self.reload().await.is_ok() {
          self.status_msg = "Seeded sample profile.".into();
        }
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── Rows ──────────────────────────────────────────────────────────────────

  /// Rows for the right pane before filtering.
  pub fn rows(&self) -> Vec<Row> {
    match (&self.results, &self.profile) {
      (Some(Results::Search { results, .. }), _) => view::search_rows(results),
      (Some(Results::ProjectsWithSkill { projects, .. }), _) => view::project_rows(projects),
      (None, Some(profile)) => view::section_rows(self.section(), profile, &self.top_skills),
      (None, None) => Vec::new(),
    }
  }

  /// Rows matching the current filter. Headings are dropped while filtering.
  pub fn filtered_rows(&self) -> Vec<Row> {
    let rows = self.rows();
    if self.filter.is_empty() {
      return rows;
    }
    let matcher = SkimMatcherV2::default();
    rows
      .into_iter()
      .filter(|r| !r.heading && matcher.fuzzy_match(&r.haystack(), &self.filter).is_some())
      .collect()
  }

  pub fn cursor_row(&self) -> Option<Row> {
    self.filtered_rows().into_iter().nth(self.row_cursor)
  }

  /// Target of the row under the cursor, only while the row pane has focus.
  fn selected_target(&self) -> Option<Target> {
    if self.focus != Focus::Rows {
      return None;
    }
    self.cursor_row().and_then(|r| r.target)
  }

  fn clamp_row_cursor(&mut self) {
    let len = self.filtered_rows().len();
    self.row_cursor = self.row_cursor.min(len.saturating_sub(1));
  }

  // ── Forms ─────────────────────────────────────────────────────────────────

  fn open_form(&mut self, form: Form) {
    self.status_msg.clear();
    self.form = Some(form);
    self.input = Input::Form;
  }

  /// `a`: add to the current section.
  fn start_add(&mut self) {
    if self.profile.is_none() {
      self.status_msg = "No profile yet. Press s to seed sample data.".into();
      return;
    }
    match self.section() {
      Section::Education => self.open_form(Form::add(Collection::Education)),
      Section::Projects => self.open_form(Form::add(Collection::Projects)),
      Section::Work => self.open_form(Form::add(Collection::Work)),
      Section::Skills => self.open_form(Form::skill()),
      Section::Profile | Section::TopSkills => {
        self.status_msg = "Nothing to add here.".into();
      }
    }
  }

  /// `e`: edit the selected entry, or the basic info from the Profile section.
  fn start_edit(&mut self) {
    let Some(profile) = &self.profile else {
      self.status_msg = "No profile yet. Press s to seed sample data.".into();
      return;
    };
    let form = match self.selected_target() {
      Some(Target::Entry(Collection::Education, id)) => {
        find::<Education>(&profile.education, id).map(|e| Form::education(Some(e)))
      }
      Some(Target::Entry(Collection::Projects, id)) => {
        find::<Project>(&profile.projects, id).map(|p| Form::project(Some(p)))
      }
      Some(Target::Entry(Collection::Work, id)) => {
        find::<WorkExperience>(&profile.work, id).map(|w| Form::work(Some(w)))
      }
      _ if self.results.is_none() && self.section() == Section::Profile => {
        Some(Form::basic(profile))
      }
      _ => None,
    };
    match form {
      Some(form) => self.open_form(form),
      None => self.status_msg = "Select an entry to edit.".into(),
    }
  }

  /// `p`: list projects tagged with a skill, prefilled from a selected skill.
  fn start_skill_filter(&mut self) {
    let initial = match self.selected_target() {
      Some(Target::Skill(skill)) => skill,
      _ => String::new(),
    };
    self.open_form(Form::skill_filter(&initial));
  }

  fn close_form(&mut self) {
    self.form = None;
    self.input = Input::None;
  }

  async fn submit_form(&mut self) {
    let Some(form) = &self.form else {
      self.close_form();
      return;
    };
    let submission = match form.submission() {
      Ok(submission) => submission,
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        return;
      }
    };

    if let Submission::SkillFilter(skill) = submission {
      match self.client.projects_with_skill(&skill).await {
        Ok(projects) => {
          self.close_form();
          let empty = projects.is_empty();
          self.show_results(Results::ProjectsWithSkill { skill, projects }, empty);
        }
        Err(e) => self.status_msg = format!("Error: {e}"),
      }
      return;
    }

    let client = Arc::clone(&self.client);
    let sent = match &submission {
      Submission::Skill(skill) => client.add_skill(skill).await.map(drop),
      Submission::Basic(fields) => client.update_basic(fields).await.map(drop),
      Submission::Education(None, input) => {
        client.add_entry::<Education>(input).await.map(drop)
      }
      Submission::Education(Some(id), input) => {
        client.update_entry::<Education>(*id, input).await.map(drop)
      }
      Submission::Project(None, input) => client.add_entry::<Project>(input).await.map(drop),
      Submission::Project(Some(id), input) => {
        client.update_entry::<Project>(*id, input).await.map(drop)
      }
      Submission::Work(None, input) => {
        client.add_entry::<WorkExperience>(input).await.map(drop)
      }
      Submission::Work(Some(id), input) => {
        client.update_entry::<WorkExperience>(*id, input).await.map(drop)
      }
      Submission::SkillFilter(_) => Ok(()),
    };

    match sent {
      Ok(()) => {
        self.close_form();
        if self.reload().await.is_ok() {
          self.status_msg = "Saved.".into();
        }
      }
      // Keep the form open so the input can be corrected.
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.input {
      Input::Filter => self.handle_filter_key(key),
      Input::Search => self.handle_search_key(key).await,
      Input::Form => self.handle_form_key(key).await,
      Input::None => return self.handle_normal_key(key).await,
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.input = Input::None;
        self.filter.clear();
      }
      KeyCode::Enter => self.input = Input::None,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => return,
    }
    self.row_cursor = 0;
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.input = Input::None,
      KeyCode::Enter => {
        self.input = Input::None;
        self.run_search().await;
      }
      KeyCode::Backspace => {
        self.query.pop();
      }
      KeyCode::Char(c) => self.query.push(c),
      _ => {}
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Enter {
      self.submit_form().await;
      return;
    }
    if key.code == KeyCode::Esc {
      self.close_form();
      return;
    }
    let Some(form) = &mut self.form else {
      self.close_form();
      return;
    };
    match key.code {
      KeyCode::Tab | KeyCode::Down => form.next_field(),
      KeyCode::BackTab | KeyCode::Up => form.prev_field(),
      KeyCode::Backspace => form.pop(),
      KeyCode::Char(c) => form.push(c),
      _ => {}
    }
  }

  async fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      // Focus
      KeyCode::Tab => {
        self.focus = match self.focus {
          Focus::Sections => Focus::Rows,
          Focus::Rows => Focus::Sections,
        };
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.focus = Focus::Rows,
      KeyCode::Left | KeyCode::Char('h') => self.focus = Focus::Sections,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),

      // Input modes
      KeyCode::Char('/') => {
        self.input = Input::Search;
        self.query.clear();
      }
      KeyCode::Char('f') => {
        self.input = Input::Filter;
        self.filter.clear();
        self.row_cursor = 0;
      }
      KeyCode::Char('a') => self.start_add(),
      KeyCode::Char('e') => self.start_edit(),
      KeyCode::Char('p') => self.start_skill_filter(),
      KeyCode::Esc => {
        if self.results.take().is_none() {
          self.filter.clear();
        }
        self.row_cursor = 0;
      }

      // Actions
      KeyCode::Char('d') => self.delete_selected().await,
      KeyCode::Char('s') => self.reseed().await,
      KeyCode::Char('r') => {
        // `reload` records failures in the status bar.
        let _ = self.reload().await;
      }

      _ => {}
    }
    true
  }

  fn move_cursor(&mut self, delta: isize) {
    match self.focus {
      Focus::Sections => {
        let next = self.section_cursor.saturating_add_signed(delta);
        if next < Section::ALL.len() && next != self.section_cursor {
          self.section_cursor = next;
          self.results = None;
          self.filter.clear();
          self.row_cursor = 0;
        }
      }
      Focus::Rows => {
        let len = self.filtered_rows().len();
        let next = self.row_cursor.saturating_add_signed(delta);
        if next < len {
          self.row_cursor = next;
        }
      }
    }
  }
}

fn find<E: folio_core::entry::Entry>(entries: &[E], id: uuid::Uuid) -> Option<&E> {
  entries.iter().find(|e| e.id() == id)
}
