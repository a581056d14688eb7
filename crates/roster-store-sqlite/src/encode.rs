//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order matches chronological order.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use roster_core::{course::Course, student::Student, subject::Subject};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `dt` cut to the microsecond precision [`encode_dt`] stores. Values built
/// in memory pass through this before being returned, so they equal what a
/// later read decodes.
pub fn stored_precision(dt: DateTime<Utc>) -> DateTime<Utc> { dt.trunc_subsecs(6) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_dt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

// ─── Raw row types ────────────────────────────────────────────────────────────
//
// Rows are read into these plain-string structs inside the connection thread
// and decoded into domain types afterwards, so parse failures surface as
// crate errors rather than rusqlite errors.

/// Columns selected by [`RawSubject::from_row`], for a table aliased `s`.
pub const SUBJECT_COLUMNS: &str =
  "s.subject_id, s.name, s.category, s.description, s.created_at, s.updated_at";

#[derive(Debug, Clone)]
pub struct RawSubject {
  pub subject_id:  String,
  pub name:        String,
  pub category:    String,
  pub description: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawSubject {
  /// Read [`SUBJECT_COLUMNS`] starting at column `at`.
  pub fn from_row(row: &Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      subject_id:  row.get(at)?,
      name:        row.get(at + 1)?,
      category:    row.get(at + 2)?,
      description: row.get(at + 3)?,
      created_at:  row.get(at + 4)?,
      updated_at:  row.get(at + 5)?,
    })
  }

  pub fn into_subject(self) -> Result<Subject> {
    Ok(Subject {
      id:          decode_uuid(&self.subject_id)?,
      name:        self.name,
      category:    self.category,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Columns selected by [`RawCourse::from_row`], for a table aliased `c`.
pub const COURSE_COLUMNS: &str = "c.course_id, c.code, c.title, c.description, \
                                  c.start_date, c.end_date, c.created_at, c.updated_at";

#[derive(Debug, Clone)]
pub struct RawCourse {
  pub course_id:   String,
  pub code:        String,
  pub title:       String,
  pub description: Option<String>,
  pub start_date:  Option<String>,
  pub end_date:    Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawCourse {
  /// Read [`COURSE_COLUMNS`] starting at column `at`.
  pub fn from_row(row: &Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      course_id:   row.get(at)?,
      code:        row.get(at + 1)?,
      title:       row.get(at + 2)?,
      description: row.get(at + 3)?,
      start_date:  row.get(at + 4)?,
      end_date:    row.get(at + 5)?,
      created_at:  row.get(at + 6)?,
      updated_at:  row.get(at + 7)?,
    })
  }

  pub fn into_course(self) -> Result<Course> {
    Ok(Course {
      id:          decode_uuid(&self.course_id)?,
      code:        self.code,
      title:       self.title,
      description: self.description,
      start_date:  decode_opt_dt(self.start_date.as_deref())?,
      end_date:    decode_opt_dt(self.end_date.as_deref())?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

/// Columns selected by [`RawStudent::from_row`], for a table aliased `st`.
pub const STUDENT_COLUMNS: &str = "st.student_id, st.first_name, st.last_name, st.email, \
                                   st.phone, st.is_active, st.enrolled_at, st.created_at, \
                                   st.updated_at, st.course_id";

#[derive(Debug, Clone)]
pub struct RawStudent {
  pub student_id:  String,
  pub first_name:  String,
  pub last_name:   Option<String>,
  pub email:       String,
  pub phone:       Option<String>,
  pub is_active:   bool,
  pub enrolled_at: String,
  pub created_at:  String,
  pub updated_at:  String,
  pub course_id:   Option<String>,
}

impl RawStudent {
  /// Read [`STUDENT_COLUMNS`] starting at column `at`.
  pub fn from_row(row: &Row<'_>, at: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      student_id:  row.get(at)?,
      first_name:  row.get(at + 1)?,
      last_name:   row.get(at + 2)?,
      email:       row.get(at + 3)?,
      phone:       row.get(at + 4)?,
      is_active:   row.get(at + 5)?,
      enrolled_at: row.get(at + 6)?,
      created_at:  row.get(at + 7)?,
      updated_at:  row.get(at + 8)?,
      course_id:   row.get(at + 9)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:          decode_uuid(&self.student_id)?,
      first_name:  self.first_name,
      last_name:   self.last_name,
      email:       self.email,
      phone:       self.phone,
      is_active:   self.is_active,
      enrolled_at: decode_dt(&self.enrolled_at)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
      course_id:   self.course_id.as_deref().map(decode_uuid).transpose()?,
    })
  }
}
