//! Home screen: summary counts and the three tables.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::home::Home;

/// Render the Home overview into `area`.
pub fn draw(f: &mut Frame, area: Rect, home: &Home) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // counts
      Constraint::Length(if home.error.is_some() { 1 } else { 0 }),
      Constraint::Percentage(40), // students
      Constraint::Percentage(30), // courses
      Constraint::Min(0),         // subjects
    ])
    .split(area);

  draw_counts(f, rows[0], home);
  if let Some(err) = &home.error {
    f.render_widget(
      Paragraph::new(Span::styled(format!(" {err}"), Style::default().fg(Color::Red))),
      rows[1],
    );
  }

  let students = home.student_rows();
  draw_table(
    f,
    rows[2],
    " Students ",
    ["Name", "Email", "Course", "Subjects"],
    students.iter().map(|r| r.as_slice()),
    &[
      Constraint::Percentage(20),
      Constraint::Percentage(30),
      Constraint::Percentage(25),
      Constraint::Percentage(25),
    ],
  );

  let courses = home.course_rows();
  draw_table(
    f,
    rows[3],
    " Courses ",
    ["Title", "Code", "Students", "Subjects"],
    courses.iter().map(|r| r.as_slice()),
    &[
      Constraint::Percentage(30),
      Constraint::Percentage(15),
      Constraint::Percentage(10),
      Constraint::Percentage(45),
    ],
  );

  let subjects = home.subject_rows();
  draw_table(
    f,
    rows[4],
    " Subjects ",
    ["Name", "Category", "Description"],
    subjects.iter().map(|r| r.as_slice()),
    &[
      Constraint::Percentage(25),
      Constraint::Percentage(15),
      Constraint::Percentage(60),
    ],
  );
}

fn draw_counts(f: &mut Frame, area: Rect, home: &Home) {
  let label = Style::default().fg(Color::DarkGray);
  let value = Style::default().add_modifier(Modifier::BOLD);

  let counts = [
    ("Students", home.students.len()),
    ("Courses", home.courses.len()),
    ("Subjects", home.subjects.len()),
    ("Total enrolled", home.total_enrolled()),
  ];
  let spans: Vec<Span> = counts
    .iter()
    .flat_map(|(name, n)| {
      [
        Span::styled(format!(" {name}: "), label),
        Span::styled(n.to_string(), value),
        Span::raw("  "),
      ]
    })
    .collect();

  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_table<'a, const N: usize>(
  f: &mut Frame,
  area: Rect,
  title: &str,
  header: [&'a str; N],
  rows: impl Iterator<Item = &'a [String]>,
  widths: &[Constraint],
) {
  let header = Row::new(header).style(
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let rows: Vec<Row> = rows.map(|cells| Row::new(cells.iter().map(String::as_str))).collect();

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let table = Table::new(rows, widths.iter().copied()).header(header).block(block);
  f.render_widget(table, area);
}
