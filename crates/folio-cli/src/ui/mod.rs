//! TUI rendering: orchestrates all panes.

pub mod form;
pub mod rows;
pub mod sections;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use folio_core::profile::Profile;

use crate::app::{App, Focus, Input};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(open) = &app.form {
    form::draw(f, area, open);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn header_title(profile: Option<&Profile>) -> String {
  match profile {
    Some(p) => format!(" folio | {} <{}>", p.name, p.email),
    None => " folio".to_owned(),
  }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    header_title(app.profile.as_ref()),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Length(20), Constraint::Min(0)])
    .split(area);

  sections::draw(f, cols[0], app);
  rows::draw(f, cols[1], app);
}

/// Border colour for a pane, brighter when it has focus.
fn border_style(app: &App, pane: Focus) -> Style {
  if app.focus == pane {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.input {
    Input::Search => (
      "SEARCH",
      format!("/{}_  Enter search  Esc cancel", app.query),
    ),
    Input::Filter => (
      "FILTER",
      format!("f {}_  Enter keep  Esc clear", app.filter),
    ),
    Input::Form => ("FORM", "Tab next field  Enter save  Esc cancel".to_string()),
    Input::None => (
      "NORMAL",
      "↑↓/jk move  Tab switch  / search  f filter  p skill  a add  e edit  d delete  s seed  \
       r reload  q quit"
        .to_string(),
    ),
  };

  // A failed form submit reports through the status message.
  let show_hints = match app.input {
    Input::None | Input::Form => app.status_msg.is_empty(),
    Input::Search | Input::Filter => true,
  };
  let status = if show_hints {
    hints
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use folio_core::profile::Links;

  use super::*;

  #[test]
  fn header_names_the_profile_owner() {
    assert_eq!(header_title(None), " folio");

    let now = Utc::now();
    let profile = Profile {
      name:       "Ada".into(),
      email:      "ada@example.com".into(),
      links:      Links::default(),
      skills:     vec![],
      education:  vec![],
      projects:   vec![],
      work:       vec![],
      created_at: now,
      updated_at: now,
    };
    assert_eq!(header_title(Some(&profile)), " folio | Ada <ada@example.com>");
  }
}
