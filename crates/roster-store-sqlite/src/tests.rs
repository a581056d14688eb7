//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use roster_core::{
  course::NewCourse,
  store::{ClassifyError, RosterStore, StoreErrorKind},
  student::NewStudent,
  subject::{DEFAULT_SUBJECT_NAMES, Subject},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.seed_default_subjects().await.expect("seed subjects");
  s
}

async fn subject_named(s: &SqliteStore, name: &str) -> Subject {
  s.list_subjects()
    .await
    .unwrap()
    .into_iter()
    .find(|sc| sc.subject.name == name)
    .map(|sc| sc.subject)
    .unwrap_or_else(|| panic!("subject {name} not seeded"))
}

fn names(subjects: &[Subject]) -> Vec<&str> {
  subjects.iter().map(|s| s.name.as_str()).collect()
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_subjects_ordered_by_name() {
  let s = store().await;
  let all = s.list_subjects().await.unwrap();
  let names: Vec<_> = all.iter().map(|sc| sc.subject.name.as_str()).collect();
  assert_eq!(names, ["History", "Mathematics", "Science"]);
  assert!(all.iter().all(|sc| sc.courses.is_empty()));
}

#[tokio::test]
async fn seeding_twice_is_a_noop() {
  let s = store().await;
  s.seed_default_subjects().await.unwrap();
  s.seed_demo().await.unwrap();
  s.seed_demo().await.unwrap();

  assert_eq!(s.list_subjects().await.unwrap().len(), 3);
  let courses = s.list_courses().await.unwrap();
  assert_eq!(courses.len(), 1);
  assert_eq!(courses[0].course.code, "C-FOUND");
  assert_eq!(names(&courses[0].subjects), ["Mathematics", "Science"]);
  assert_eq!(courses[0].students.len(), 2);
  assert_eq!(s.list_students().await.unwrap().len(), 2);
}

#[tokio::test]
async fn list_subjects_named_filters_by_allow_list() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  let mut input = NewCourse::new("C-1", "One", math.id);
  input.secondary_subject_name = Some("Astronomy".into());
  s.create_course(input).await.unwrap();

  assert_eq!(s.list_subjects().await.unwrap().len(), 4);

  let defaults = s.list_subjects_named(&DEFAULT_SUBJECT_NAMES).await.unwrap();
  let got: Vec<_> = defaults.iter().map(|sc| sc.subject.name.as_str()).collect();
  assert_eq!(got, ["History", "Mathematics", "Science"]);
}

#[tokio::test]
async fn list_subjects_named_empty_allow_list() {
  let s = store().await;
  assert!(s.list_subjects_named(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn subject_lists_its_courses() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  s.create_course(NewCourse::new("C-1", "One", math.id)).await.unwrap();
  s.create_course(NewCourse::new("C-2", "Two", math.id)).await.unwrap();

  let math = s
    .list_subjects()
    .await
    .unwrap()
    .into_iter()
    .find(|sc| sc.subject.name == "Mathematics")
    .unwrap();
  let codes: Vec<_> = math.courses.iter().map(|c| c.code.as_str()).collect();
  assert_eq!(codes, ["C-1", "C-2"]);
}

// ─── Courses ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_course_with_base_subject_only() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;

  let mut input = NewCourse::new("C-FOUND", "Foundations", math.id);
  input.description = Some("Introductory curriculum".into());
  input.start_date = Some(Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap());

  let created = s.create_course(input).await.unwrap();
  assert_eq!(created.course.code, "C-FOUND");
  assert_eq!(created.course.created_at, created.course.updated_at);
  assert_eq!(created.subjects, vec![math]);

  let listed = s.list_courses().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].course.start_date, created.course.start_date);
  assert_eq!(listed[0].course.end_date, None);
}

#[tokio::test]
async fn create_course_creates_and_connects_secondary_subject() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;

  let mut input = NewCourse::new("C-FOUND", "Foundations", math.id);
  input.secondary_subject_name = Some(" Robotics ".into());

  let created = s.create_course(input).await.unwrap();
  assert_eq!(names(&created.subjects), ["Mathematics", "Robotics"]);
  let robotics = &created.subjects[1];
  assert_eq!(robotics.category, "Custom");
  assert_eq!(robotics.description, None);
}

#[tokio::test]
async fn blank_secondary_subject_creates_nothing() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;

  let mut input = NewCourse::new("C-1", "One", math.id);
  input.secondary_subject_name = Some("   ".into());

  let created = s.create_course(input).await.unwrap();
  assert_eq!(created.subjects.len(), 1);
  assert_eq!(s.list_subjects().await.unwrap().len(), 3);
}

#[tokio::test]
async fn duplicate_course_code_is_unique_violation() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  s.create_course(NewCourse::new("C-1", "One", math.id)).await.unwrap();

  let err = s
    .create_course(NewCourse::new("C-1", "Again", math.id))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), StoreErrorKind::Unique);
  assert_eq!(s.list_courses().await.unwrap().len(), 1);
}

#[tokio::test]
async fn missing_base_subject_is_foreign_key_violation() {
  let s = store().await;
  let err = s
    .create_course(NewCourse::new("C-1", "One", Uuid::new_v4()))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), StoreErrorKind::ForeignKey);
  assert!(s.list_courses().await.unwrap().is_empty());
}

#[tokio::test]
async fn existing_secondary_name_rolls_back_whole_course() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;

  let mut input = NewCourse::new("C-1", "One", math.id);
  input.secondary_subject_name = Some("History".into());

  let err = s.create_course(input).await.unwrap_err();
  assert_eq!(err.kind(), StoreErrorKind::Unique);
  assert!(s.list_courses().await.unwrap().is_empty());
  assert_eq!(s.list_subjects().await.unwrap().len(), 3);

  // The code is still free afterwards.
  s.create_course(NewCourse::new("C-1", "One", math.id)).await.unwrap();
}

#[tokio::test]
async fn courses_listed_newest_first_and_stable() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  for code in ["C-1", "C-2", "C-3"] {
    s.create_course(NewCourse::new(code, code, math.id)).await.unwrap();
  }

  let first = s.list_courses().await.unwrap();
  let codes: Vec<_> = first.iter().map(|c| c.course.code.as_str()).collect();
  assert_eq!(codes, ["C-3", "C-2", "C-1"]);

  let second = s.list_courses().await.unwrap();
  assert_eq!(first, second);
}

#[tokio::test]
async fn created_course_matches_what_is_listed() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;

  let mut input = NewCourse::new("C-NANO", "Precision", math.id);
  input.start_date = Some(
    Utc.with_ymd_and_hms(2025, 8, 20, 10, 0, 0).unwrap()
      + chrono::Duration::nanoseconds(123_456_789),
  );
  let created = s.create_course(input).await.unwrap();

  let listed = s.list_courses().await.unwrap();
  assert_eq!(listed[0].course, created.course);
  assert_eq!(
    created.course.start_date.unwrap().timestamp_subsec_nanos(),
    123_456_000
  );
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_student_defaults_and_nested_course() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  let mut input = NewCourse::new("C-FOUND", "Foundations", math.id);
  input.secondary_subject_name = Some("Robotics".into());
  let course = s.create_course(input).await.unwrap();

  let created = s
    .create_student(NewStudent::new("Alice", "alice@example.com", course.course.id))
    .await
    .unwrap();

  assert!(created.student.is_active);
  assert_eq!(created.student.enrolled_at, created.student.created_at);
  assert_eq!(created.student.course_id, Some(course.course.id));
  let nested = created.course.expect("course loaded");
  assert_eq!(nested.course.code, "C-FOUND");
  assert_eq!(names(&nested.subjects), ["Mathematics", "Robotics"]);
}

#[tokio::test]
async fn create_student_preserves_explicit_fields() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  let course = s.create_course(NewCourse::new("C-1", "One", math.id)).await.unwrap();

  let enrolled = Utc.with_ymd_and_hms(2025, 8, 29, 0, 0, 0).unwrap();
  let mut input = NewStudent::new("Bob", "bob@example.com", course.course.id);
  input.last_name = Some("Brown".into());
  input.phone = Some("555-2020".into());
  input.is_active = false;
  input.enrolled_at = Some(enrolled);

  s.create_student(input).await.unwrap();

  let listed = s.list_students().await.unwrap();
  assert_eq!(listed.len(), 1);
  let bob = &listed[0].student;
  assert!(!bob.is_active);
  assert_eq!(bob.enrolled_at, enrolled);
  assert_eq!(bob.last_name.as_deref(), Some("Brown"));
  assert_eq!(bob.phone.as_deref(), Some("555-2020"));
}

#[tokio::test]
async fn duplicate_email_is_unique_violation() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  let course = s.create_course(NewCourse::new("C-1", "One", math.id)).await.unwrap();
  let id = course.course.id;

  s.create_student(NewStudent::new("Alice", "alice@example.com", id)).await.unwrap();
  let err = s
    .create_student(NewStudent::new("Alicia", "alice@example.com", id))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), StoreErrorKind::Unique);
  assert_eq!(s.list_students().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_course_is_foreign_key_violation() {
  let s = store().await;
  let err = s
    .create_student(NewStudent::new("Alice", "alice@example.com", Uuid::new_v4()))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), StoreErrorKind::ForeignKey);
  assert!(s.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn students_listed_oldest_first_with_course() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  let course = s.create_course(NewCourse::new("C-1", "One", math.id)).await.unwrap();
  let id = course.course.id;

  for (name, email) in [("A", "a@example.com"), ("B", "b@example.com"), ("C", "c@example.com")] {
    s.create_student(NewStudent::new(name, email, id)).await.unwrap();
  }

  let listed = s.list_students().await.unwrap();
  let firsts: Vec<_> = listed.iter().map(|sw| sw.student.first_name.as_str()).collect();
  assert_eq!(firsts, ["A", "B", "C"]);
  assert!(listed.iter().all(|sw| sw.course.as_ref().map(|c| c.course.id) == Some(id)));

  let courses = s.list_courses().await.unwrap();
  let enrolled: Vec<_> = courses[0].students.iter().map(|st| st.first_name.as_str()).collect();
  assert_eq!(enrolled, ["A", "B", "C"]);
}

#[tokio::test]
async fn store_reopens_existing_file() {
  let dir = std::env::temp_dir().join(format!("roster-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("roster.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.seed_demo().await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_students().await.unwrap().len(), 2);
  std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn created_student_matches_what_is_listed() {
  let s = store().await;
  let math = subject_named(&s, "Mathematics").await;
  let course = s
    .create_course(NewCourse::new("C-FOUND", "Foundations", math.id))
    .await
    .unwrap();

  let created = s
    .create_student(NewStudent::new("Alice", "alice@example.com", course.course.id))
    .await
    .unwrap();

  let listed = s.list_students().await.unwrap();
  assert_eq!(listed[0].student, created.student);
  assert_eq!(listed[0].course, created.course);
}
