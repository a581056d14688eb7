//! Create Course / Create Student form pane.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::form::{Form, Input};

/// Render `form` into `area`, one field per line.
pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
  let block = Block::default()
    .title(format!(" {} ", form.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(if form.error.is_some() { 2 } else { 0 }),
      Constraint::Min(0),
    ])
    .split(inner);

  if let Some(err) = &form.error {
    f.render_widget(
      Paragraph::new(Span::styled(format!(" {err}"), Style::default().fg(Color::Red))),
      rows[0],
    );
  }

  let label_width = form.fields.iter().map(|fl| fl.label.len()).max().unwrap_or(0) + 2;

  let lines: Vec<Line> = form
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let focused = i == form.focus;

      let marker = if field.required { "*" } else { " " };
      let label_style = if focused {
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };

      let mut value = field.display_value();
      match (&field.input, focused) {
        (Input::Text(_), true) => value.push('▏'),
        (Input::Date(v), _) if v.is_empty() && !focused => value = "YYYY-MM-DD".into(),
        (Input::Date(_), true) => value.push('▏'),
        (Input::Choice { .. }, true) => value = format!("‹ {value} ›"),
        _ => {}
      }
      let value_style = match (&field.input, focused) {
        (Input::Date(v), false) if v.is_empty() => Style::default().fg(Color::DarkGray),
        (_, true) => Style::default().bg(Color::Blue).fg(Color::White),
        _ => Style::default(),
      };

      Line::from(vec![
        Span::styled(
          format!(" {marker}{:<label_width$}", field.label),
          label_style,
        ),
        Span::styled(value, value_style),
      ])
    })
    .collect();

  f.render_widget(Paragraph::new(lines), rows[1]);
}
