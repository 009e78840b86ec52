//! Section list, left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use super::border_style;
use crate::{
  app::{App, Focus},
  view::Section,
};

/// Render the section list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Sections ")
    .borders(Borders::ALL)
    .border_style(border_style(app, Focus::Sections));

  // A result set replaces the section view, so no section is current.
  let searching = app.results.is_some();
  let items: Vec<ListItem> = Section::ALL
    .iter()
    .map(|s| {
      let style = if searching {
        Style::default().fg(Color::DarkGray)
      } else {
        Style::default()
      };
      ListItem::new(s.title()).style(style)
    })
    .collect();

  let mut state = ListState::default();
  state.select((!searching).then_some(app.section_cursor));

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    area,
    &mut state,
  );
}
