//! Row pane, right panel: the selected section or the active result set.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::border_style;
use crate::app::{App, Focus, Input};

/// Render the rows pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = app.filtered_rows();

  let mut title = match &app.results {
    Some(results) => format!(" {} ", results.title()),
    None => format!(" {} ", app.section().title()),
  };
  if app.input == Input::Filter || !app.filter.is_empty() {
    title = format!("{title}({}/{}) ", rows.len(), app.rows().len());
  }

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border_style(app, Focus::Rows));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if app.profile.is_none() {
    f.render_widget(
      Paragraph::new("No profile loaded.").style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  // Filter bar at the bottom of the inner area.
  if (app.input == Input::Filter || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.input == Input::Filter {
      format!("f {}_", app.filter)
    } else {
      format!("f {}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let label_width = rows
    .iter()
    .filter(|r| !r.heading)
    .map(|r| r.label.chars().count())
    .max()
    .unwrap_or(0)
    .min(40);

  let items: Vec<ListItem> = rows
    .iter()
    .map(|row| {
      if row.heading {
        return ListItem::new(Line::from(Span::styled(
          row.label.clone(),
          Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        )));
      }
      let mut spans = vec![Span::raw(format!("{:<label_width$}", row.label))];
      if !row.detail.is_empty() {
        spans.push(Span::styled(
          format!("  {}", row.detail),
          Style::default().fg(Color::DarkGray),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if rows.is_empty() || app.focus != Focus::Rows {
    None
  } else {
    Some(app.row_cursor)
  });

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
