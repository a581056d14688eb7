//! The Home overview: every student, course and subject in one screen.

use anyhow::Result;
use roster_core::{
  course::CourseDetail,
  student::StudentWithCourse,
  subject::{Subject, SubjectWithCourses},
};

use crate::client::ApiClient;

/// The three lists behind the Home screen.
///
/// A list whose fetch failed is empty; `error` holds the first failure in
/// the order students, courses, subjects.
#[derive(Debug, Default, Clone)]
pub struct Home {
  pub students: Vec<StudentWithCourse>,
  pub courses:  Vec<CourseDetail>,
  pub subjects: Vec<SubjectWithCourses>,
  pub error:    Option<String>,
}

impl Home {
  /// Fetch all three lists concurrently and wait for every one to settle.
  pub async fn load(client: &ApiClient) -> Self {
    let (students, courses, subjects) = tokio::join!(
      client.list_students(),
      client.list_courses(),
      client.list_subjects(),
    );
    Self::from_results(students, courses, subjects)
  }

  pub fn from_results(
    students: Result<Vec<StudentWithCourse>>,
    courses: Result<Vec<CourseDetail>>,
    subjects: Result<Vec<SubjectWithCourses>>,
  ) -> Self {
    let mut error = None;
    let mut settle = |label: &str, e: anyhow::Error| {
      tracing::warn!(list = label, error = %e, "list fetch failed");
      error.get_or_insert_with(|| format!("Failed to fetch {label}: {e:#}"));
    };

    let students = students.unwrap_or_else(|e| {
      settle("students", e);
      Vec::new()
    });
    let courses = courses.unwrap_or_else(|e| {
      settle("courses", e);
      Vec::new()
    });
    let subjects = subjects.unwrap_or_else(|e| {
      settle("subjects", e);
      Vec::new()
    });

    Self { students, courses, subjects, error }
  }

  /// Sum of enrolled students over the listed courses.
  pub fn total_enrolled(&self) -> usize {
    self.courses.iter().map(|c| c.students.len()).sum()
  }

  // ── Table rows ────────────────────────────────────────────────────────────

  /// Name, email, course and subject names per student.
  pub fn student_rows(&self) -> Vec<[String; 4]> {
    self
      .students
      .iter()
      .map(|s| {
        let (course, subjects) = match &s.course {
          Some(c) => (
            format!("{} ({})", c.course.title, c.course.code),
            subject_names(&c.subjects),
          ),
          None => ("—".to_owned(), String::new()),
        };
        [s.display_name(), s.student.email.clone(), course, subjects]
      })
      .collect()
  }

  /// Title, code, student count and subject names per course.
  pub fn course_rows(&self) -> Vec<[String; 4]> {
    self
      .courses
      .iter()
      .map(|c| {
        [
          c.course.title.clone(),
          c.course.code.clone(),
          c.students.len().to_string(),
          subject_names(&c.subjects),
        ]
      })
      .collect()
  }

  /// Name, category and description per subject.
  pub fn subject_rows(&self) -> Vec<[String; 3]> {
    self
      .subjects
      .iter()
      .map(|s| {
        [
          s.subject.name.clone(),
          s.subject.category.clone(),
          s.subject.description.clone().unwrap_or_default(),
        ]
      })
      .collect()
  }
}

fn subject_names(subjects: &[Subject]) -> String {
  subjects
    .iter()
    .map(|s| s.name.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}
