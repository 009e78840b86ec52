//! Add/edit prompt, drawn as a popup over the body.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::form::Form;

/// A rectangle `width` wide and `height` tall, centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height)])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width)])
    .flex(Flex::Center)
    .areas(row);
  cell
}

/// Render `form` centred over `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
  let label_width = form
    .fields
    .iter()
    .map(|field| field.label.chars().count())
    .max()
    .unwrap_or(0);

  let lines: Vec<Line> = form
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let active = i == form.cursor;
      let label = Span::styled(
        format!("{:>label_width$}: ", field.label),
        Style::default().fg(Color::DarkGray),
      );
      let value = if active {
        Span::styled(
          format!("{}_", field.value),
          Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        )
      } else {
        Span::raw(field.value.clone())
      };
      Line::from(vec![label, value])
    })
    .collect();

  let height = (lines.len() as u16).saturating_add(2);
  let popup = centered(area, area.width.saturating_sub(8).min(72), height.min(area.height));

  let block = Block::default()
    .title(format!(" {} ", form.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  f.render_widget(Clear, popup);
  f.render_widget(Paragraph::new(lines).block(block), popup);
}
