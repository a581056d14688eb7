//! Form state for the Create Course and Create Student screens.
//!
//! A [`Form`] is a flat list of fields with one focused at a time. The
//! screen-specific parts are the field layout and the conversion into an API
//! request, which also performs the client-side presence checks.

use chrono::NaiveDate;
use roster_core::{course::CourseDetail, subject::SubjectWithCourses};

use crate::client::{CreateCourseRequest, CreateStudentRequest};

// ─── Fields ───────────────────────────────────────────────────────────────────

/// One selectable option of a [`Input::Choice`] field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
  /// The id sent to the API.
  pub id:    String,
  pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
  Text(String),
  /// A `YYYY-MM-DD` date typed as text.
  Date(String),
  Choice {
    options:  Vec<Choice>,
    selected: Option<usize>,
  },
  Toggle(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
  pub key:      &'static str,
  pub label:    &'static str,
  pub required: bool,
  pub input:    Input,
}

impl Field {
  fn text(key: &'static str, label: &'static str, required: bool) -> Self {
    Self { key, label, required, input: Input::Text(String::new()) }
  }

  fn date(key: &'static str, label: &'static str) -> Self {
    Self { key, label, required: false, input: Input::Date(String::new()) }
  }

  /// A choice field with the first option preselected.
  fn choice(key: &'static str, label: &'static str, options: Vec<Choice>) -> Self {
    let selected = (!options.is_empty()).then_some(0);
    Self {
      key,
      label,
      required: true,
      input: Input::Choice { options, selected },
    }
  }

  fn toggle(key: &'static str, label: &'static str, on: bool) -> Self {
    Self { key, label, required: false, input: Input::Toggle(on) }
  }

  /// Text shown for the field's current value.
  pub fn display_value(&self) -> String {
    match &self.input {
      Input::Text(v) | Input::Date(v) => v.clone(),
      Input::Choice { options, selected } => selected
        .and_then(|i| options.get(i))
        .map(|c| c.label.clone())
        .unwrap_or_else(|| "(none)".to_owned()),
      Input::Toggle(on) => if *on { "[x]" } else { "[ ]" }.to_owned(),
    }
  }
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Form {
  pub title:  &'static str,
  pub fields: Vec<Field>,
  /// Index of the focused field.
  pub focus:  usize,
  /// Last validation or server error, shown above the fields.
  pub error:  Option<String>,
}

impl Form {
  fn new(title: &'static str, fields: Vec<Field>) -> Self {
    Self { title, fields, focus: 0, error: None }
  }

  fn field(&self, key: &str) -> Option<&Field> { self.fields.iter().find(|f| f.key == key) }

  /// The trimmed text of a text or date field; empty if absent.
  pub fn text(&self, key: &str) -> &str {
    match self.field(key).map(|f| &f.input) {
      Some(Input::Text(v) | Input::Date(v)) => v.trim(),
      _ => "",
    }
  }

  /// The trimmed text of a field, or `None` if blank.
  fn optional_text(&self, key: &str) -> Option<String> {
    let v = self.text(key);
    (!v.is_empty()).then(|| v.to_owned())
  }

  pub fn selected(&self, key: &str) -> Option<&Choice> {
    match self.field(key).map(|f| &f.input) {
      Some(Input::Choice { options, selected }) => selected.and_then(|i| options.get(i)),
      _ => None,
    }
  }

  pub fn toggled(&self, key: &str) -> bool {
    matches!(self.field(key).map(|f| &f.input), Some(Input::Toggle(true)))
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  pub fn focus_next(&mut self) {
    if !self.fields.is_empty() {
      self.focus = (self.focus + 1) % self.fields.len();
    }
  }

  pub fn focus_prev(&mut self) {
    if !self.fields.is_empty() {
      self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }
  }

  /// Type a character into the focused field. A space flips a toggle.
  pub fn insert(&mut self, c: char) {
    let Some(field) = self.fields.get_mut(self.focus) else { return };
    match &mut field.input {
      Input::Text(v) | Input::Date(v) => v.push(c),
      Input::Toggle(on) if c == ' ' => *on = !*on,
      _ => {}
    }
  }

  pub fn backspace(&mut self) {
    if let Some(Field { input: Input::Text(v) | Input::Date(v), .. }) =
      self.fields.get_mut(self.focus)
    {
      v.pop();
    }
  }

  /// Move the focused choice field's selection by `delta`, wrapping around.
  pub fn cycle(&mut self, delta: isize) {
    let Some(field) = self.fields.get_mut(self.focus) else { return };
    if let Input::Choice { options, selected } = &mut field.input
      && !options.is_empty()
    {
      let len = options.len() as isize;
      let current = selected.map(|i| i as isize).unwrap_or(0);
      *selected = Some((current + delta).rem_euclid(len) as usize);
    }
  }
}

/// Convert a `YYYY-MM-DD` form date into the ISO timestamp the API expects
/// (midnight UTC). Blank input yields `None`.
pub fn date_to_iso(label: &str, value: &str) -> Result<Option<String>, String> {
  if value.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map(|d| Some(format!("{}T00:00:00.000Z", d.format("%Y-%m-%d"))))
    .map_err(|_| format!("{label} must be a date in YYYY-MM-DD format."))
}

// ─── Create Course ────────────────────────────────────────────────────────────

/// The Create Course form, offering `defaults` as base subjects.
pub fn course_form(defaults: &[SubjectWithCourses]) -> Form {
  let options = defaults
    .iter()
    .map(|s| Choice {
      id:    s.subject.id.to_string(),
      label: format!("{} ({})", s.subject.name, s.subject.category),
    })
    .collect();

  Form::new("Create Course", vec![
    Field::text("title", "Title", true),
    Field::text("code", "Code", true),
    Field::text("description", "Description", false),
    Field::date("start_date", "Start Date"),
    Field::date("end_date", "End Date"),
    Field::choice("base_subject", "Base Subject", options),
    Field::text("secondary_subject", "Secondary Subject (optional)", false),
  ])
}

/// Check the required fields and build the request body.
pub fn course_request(form: &Form) -> Result<CreateCourseRequest, String> {
  let title = form.text("title");
  let code = form.text("code");
  let base = form.selected("base_subject");

  let Some(base) = base.filter(|_| !title.is_empty() && !code.is_empty()) else {
    return Err("Title, Code, and Base Subject are required.".to_owned());
  };

  Ok(CreateCourseRequest {
    title:                  title.to_owned(),
    code:                   code.to_owned(),
    description:            form.optional_text("description"),
    start_date:             date_to_iso("Start Date", form.text("start_date"))?,
    end_date:               date_to_iso("End Date", form.text("end_date"))?,
    base_subject_id:        base.id.clone(),
    secondary_subject_name: form.optional_text("secondary_subject"),
  })
}

// ─── Create Student ───────────────────────────────────────────────────────────

/// The Create Student form, offering `courses` for enrollment.
pub fn student_form(courses: &[CourseDetail]) -> Form {
  let options = courses
    .iter()
    .map(|c| Choice {
      id:    c.course.id.to_string(),
      label: format!("{} ({})", c.course.title, c.course.code),
    })
    .collect();

  Form::new("Create Student", vec![
    Field::text("first_name", "First Name", true),
    Field::text("last_name", "Last Name", false),
    Field::text("email", "Email", true),
    Field::text("phone", "Phone", false),
    Field::toggle("is_active", "Is Active", true),
    Field::date("enrolled_at", "Enrolled At"),
    Field::choice("course", "Course", options),
  ])
}

/// Check the required fields and build the request body.
///
/// Only the first name and email are checked here; a missing course is left
/// for the server to reject.
pub fn student_request(form: &Form) -> Result<CreateStudentRequest, String> {
  let first_name = form.text("first_name");
  let email = form.text("email");
  if first_name.is_empty() || email.is_empty() {
    return Err("First name and Email are required.".to_owned());
  }

  Ok(CreateStudentRequest {
    first_name:  first_name.to_owned(),
    last_name:   form.optional_text("last_name"),
    email:       email.to_owned(),
    phone:       form.optional_text("phone"),
    is_active:   form.toggled("is_active"),
    enrolled_at: date_to_iso("Enrolled At", form.text("enrolled_at"))?,
    course_id:   form.selected("course").map(|c| c.id.clone()),
  })
}
