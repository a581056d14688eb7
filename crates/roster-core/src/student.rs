//! A person enrolled in at most one course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::CourseWithSubjects;

/// A persisted student. `email` is unique across the store.
///
/// `course_id` is nullable in the data model even though every current write
/// path sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:          Uuid,
  pub first_name:  String,
  pub last_name:   Option<String>,
  pub email:       String,
  pub phone:       Option<String>,
  pub is_active:   bool,
  pub enrolled_at: DateTime<Utc>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
  pub course_id:   Option<Uuid>,
}

/// Input for [`RosterStore::create_student`](crate::store::RosterStore::create_student).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
  pub first_name:  String,
  pub last_name:   Option<String>,
  pub email:       String,
  pub phone:       Option<String>,
  pub is_active:   bool,
  /// Defaults to the creation time when `None`.
  pub enrolled_at: Option<DateTime<Utc>>,
  /// Must reference an existing course.
  pub course_id:   Uuid,
}

impl NewStudent {
  /// An active student with no optional details.
  pub fn new(
    first_name: impl Into<String>,
    email: impl Into<String>,
    course_id: Uuid,
  ) -> Self {
    Self {
      first_name: first_name.into(),
      last_name: None,
      email: email.into(),
      phone: None,
      is_active: true,
      enrolled_at: None,
      course_id,
    }
  }
}

/// A student with the course they are enrolled in and that course's
/// subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithCourse {
  #[serde(flatten)]
  pub student: Student,
  pub course:  Option<CourseWithSubjects>,
}

impl StudentWithCourse {
  /// `"First Last"`, or just the first name.
  pub fn display_name(&self) -> String {
    match &self.student.last_name {
      Some(last) => format!("{} {last}", self.student.first_name),
      None => self.student.first_name.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn student() -> Student {
    let at = Utc.with_ymd_and_hms(2025, 8, 29, 0, 0, 0).unwrap();
    Student {
      id:          Uuid::nil(),
      first_name:  "Alice".into(),
      last_name:   Some("Anderson".into()),
      email:       "alice@example.com".into(),
      phone:       None,
      is_active:   true,
      enrolled_at: at,
      created_at:  at,
      updated_at:  at,
      course_id:   None,
    }
  }

  #[test]
  fn serialises_with_camel_case_and_flattened_student() {
    let json = serde_json::to_value(StudentWithCourse {
      student: student(),
      course:  None,
    })
    .unwrap();

    assert_eq!(json["firstName"], "Alice");
    assert_eq!(json["isActive"], true);
    assert_eq!(json["enrolledAt"], "2025-08-29T00:00:00Z");
    assert!(json["course"].is_null());
    assert!(json.get("student").is_none());
  }

  #[test]
  fn display_name_omits_missing_last_name() {
    let mut s = StudentWithCourse { student: student(), course: None };
    assert_eq!(s.display_name(), "Alice Anderson");
    s.student.last_name = None;
    assert_eq!(s.display_name(), "Alice");
  }
}
