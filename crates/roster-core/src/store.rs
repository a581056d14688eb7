//! The `RosterStore` trait and the structured classification of store errors.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, `roster-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  course::{CourseDetail, CourseWithSubjects, NewCourse},
  student::{NewStudent, StudentWithCourse},
  subject::SubjectWithCourses,
};

// ─── Error classification ────────────────────────────────────────────────────

/// The backend-independent kind of a failed store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
  /// A uniqueness constraint rejected the write.
  Unique,
  /// A write referenced a row that does not exist.
  ForeignKey,
  Other,
}

/// Implemented by store error types so callers can react to constraint
/// violations without knowing the backend's error encoding.
pub trait ClassifyError {
  fn kind(&self) -> StoreErrorKind;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Roster store backend.
///
/// Every method is a single transaction against the backend. Identity and
/// timestamps are assigned by the store, never by the caller.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + ClassifyError + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All students in creation order, each with its course and the course's
  /// subjects.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<StudentWithCourse>, Self::Error>> + Send + '_;

  /// All courses, newest first, each with its students and subjects.
  fn list_courses(
    &self,
  ) -> impl Future<Output = Result<Vec<CourseDetail>, Self::Error>> + Send + '_;

  /// All subjects ordered by name, each with the courses linked to it.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<SubjectWithCourses>, Self::Error>> + Send + '_;

  /// Like [`list_subjects`](Self::list_subjects) but restricted to subjects
  /// whose name is in `names`.
  fn list_subjects_named<'a>(
    &'a self,
    names: &'a [&'a str],
  ) -> impl Future<Output = Result<Vec<SubjectWithCourses>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Create a course, connect its base subject and, if requested, create and
  /// connect its secondary subject, all atomically.
  ///
  /// Fails with a [`StoreErrorKind::Unique`] error on a duplicate code or
  /// secondary subject name, and with [`StoreErrorKind::ForeignKey`] if the
  /// base subject does not exist. Nothing is written on failure.
  fn create_course(
    &self,
    input: NewCourse,
  ) -> impl Future<Output = Result<CourseWithSubjects, Self::Error>> + Send + '_;

  /// Create a student enrolled in an existing course.
  ///
  /// Fails with [`StoreErrorKind::Unique`] on a duplicate email and with
  /// [`StoreErrorKind::ForeignKey`] if the course does not exist.
  fn create_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<StudentWithCourse, Self::Error>> + Send + '_;
}
