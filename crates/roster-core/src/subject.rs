//! A named area of study that courses are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::course::Course;

/// Category assigned to subjects created on the fly as a course's secondary
/// subject.
pub const CUSTOM_CATEGORY: &str = "Custom";

/// Names of the reference subjects offered as base-subject choices when a
/// course is created.
pub const DEFAULT_SUBJECT_NAMES: [&str; 3] = ["Mathematics", "Science", "History"];

/// A persisted subject. `name` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
  pub id:          Uuid,
  pub name:        String,
  /// Free-form label, e.g. `"STEM"`, `"Humanities"`, `"Custom"`.
  pub category:    String,
  pub description: Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Input for creating a subject. Identity and timestamps are assigned by the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
  pub name:        String,
  pub category:    String,
  pub description: Option<String>,
}

impl NewSubject {
  /// A subject in the [`CUSTOM_CATEGORY`] with no description.
  pub fn custom(name: impl Into<String>) -> Self {
    Self {
      name:        name.into(),
      category:    CUSTOM_CATEGORY.to_owned(),
      description: None,
    }
  }
}

/// A subject together with every course it is linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWithCourses {
  #[serde(flatten)]
  pub subject: Subject,
  pub courses: Vec<Course>,
}
