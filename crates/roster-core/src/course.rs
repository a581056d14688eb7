//! A coded offering linked to subjects and enrolling students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{student::Student, subject::Subject};

/// A persisted course. `code` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
  pub id:          Uuid,
  pub code:        String,
  pub title:       String,
  pub description: Option<String>,
  pub start_date:  Option<DateTime<Utc>>,
  pub end_date:    Option<DateTime<Utc>>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input for [`RosterStore::create_course`](crate::store::RosterStore::create_course).
///
/// The course is always connected to the subject `base_subject_id`. When
/// `secondary_subject_name` holds a non-blank name, a brand-new subject with
/// that name is created in the `Custom` category and connected as well; it is
/// never looked up among existing subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
  pub code:                   String,
  pub title:                  String,
  pub description:            Option<String>,
  pub start_date:             Option<DateTime<Utc>>,
  pub end_date:               Option<DateTime<Utc>>,
  pub base_subject_id:        Uuid,
  pub secondary_subject_name: Option<String>,
}

impl NewCourse {
  pub fn new(
    code: impl Into<String>,
    title: impl Into<String>,
    base_subject_id: Uuid,
  ) -> Self {
    Self {
      code: code.into(),
      title: title.into(),
      description: None,
      start_date: None,
      end_date: None,
      base_subject_id,
      secondary_subject_name: None,
    }
  }

  /// The trimmed secondary subject name, or `None` if absent or blank.
  pub fn secondary_subject(&self) -> Option<&str> {
    self
      .secondary_subject_name
      .as_deref()
      .map(str::trim)
      .filter(|name| !name.is_empty())
  }
}

/// A course with its connected subjects, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithSubjects {
  #[serde(flatten)]
  pub course:   Course,
  pub subjects: Vec<Subject>,
}

/// A course with both directions of its relations loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
  #[serde(flatten)]
  pub course:   Course,
  pub students: Vec<Student>,
  pub subjects: Vec<Subject>,
}
