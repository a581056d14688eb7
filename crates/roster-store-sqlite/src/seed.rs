//! Demo data: the reference subjects plus one course with two students.
//!
//! Every statement is an upsert that leaves existing rows untouched, so
//! seeding an already-seeded store is a no-op.

use chrono::Utc;
use roster_core::subject::NewSubject;
use uuid::Uuid;

use crate::{
  Result, SqliteStore,
  encode::{encode_dt, encode_uuid},
  store::new_subject,
};

/// `(name, category, description)` of the reference subjects.
const SUBJECTS: [(&str, &str, &str); 3] = [
  ("Mathematics", "STEM", "Numbers, algebra, geometry"),
  ("Science", "STEM", "Physics, chemistry, biology"),
  ("History", "Humanities", "World & regional history"),
];

const COURSE_CODE: &str = "C-FOUND";
const COURSE_SUBJECTS: [&str; 2] = ["Mathematics", "Science"];

/// `(first_name, last_name, email, phone)` of the demo students.
const STUDENTS: [(&str, &str, &str, &str); 2] = [
  ("Alice", "Anderson", "alice@example.com", "555-1010"),
  ("Bob", "Brown", "bob@example.com", "555-2020"),
];

fn subject_upserts() -> Vec<roster_core::subject::Subject> {
  SUBJECTS
    .iter()
    .map(|(name, category, description)| {
      new_subject(NewSubject {
        name:        (*name).to_owned(),
        category:    (*category).to_owned(),
        description: Some((*description).to_owned()),
      })
    })
    .collect()
}

fn upsert_subjects(
  conn: &rusqlite::Connection,
  subjects: &[roster_core::subject::Subject],
) -> rusqlite::Result<usize> {
  let mut inserted = 0;
  for subject in subjects {
    inserted += conn.execute(
      "INSERT INTO subjects (subject_id, name, category, description, created_at, updated_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?5)
       ON CONFLICT (name) DO NOTHING",
      rusqlite::params![
        encode_uuid(subject.id),
        subject.name,
        subject.category,
        subject.description,
        encode_dt(subject.created_at),
      ],
    )?;
  }
  Ok(inserted)
}

impl SqliteStore {
  /// Ensure the reference subjects (Mathematics, Science, History) exist.
  pub async fn seed_default_subjects(&self) -> Result<()> {
    let subjects = subject_upserts();
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = upsert_subjects(&tx, &subjects)?;
        tx.commit()?;
        Ok(inserted)
      })
      .await?;
    tracing::info!(inserted, "default subjects seeded");
    Ok(())
  }

  /// Ensure the reference subjects, the `C-FOUND` "Foundations" course linked
  /// to Mathematics and Science, and its two demo students exist.
  pub async fn seed_demo(&self) -> Result<()> {
    let subjects  = subject_upserts();
    let now       = encode_dt(Utc::now());
    let course_id = encode_uuid(Uuid::new_v4());
    let students: Vec<String> = STUDENTS.iter().map(|_| encode_uuid(Uuid::new_v4())).collect();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        upsert_subjects(&tx, &subjects)?;

        tx.execute(
          "INSERT INTO courses (course_id, code, title, description, created_at, updated_at)
           VALUES (?1, ?2, 'Foundations', 'Introductory curriculum', ?3, ?3)
           ON CONFLICT (code) DO NOTHING",
          rusqlite::params![course_id, COURSE_CODE, now],
        )?;

        for name in COURSE_SUBJECTS {
          tx.execute(
            "INSERT OR IGNORE INTO course_subjects (course_id, subject_id)
             SELECT c.course_id, s.subject_id
             FROM courses c, subjects s
             WHERE c.code = ?1 AND s.name = ?2",
            rusqlite::params![COURSE_CODE, name],
          )?;
        }

        for ((first, last, email, phone), student_id) in STUDENTS.iter().zip(&students) {
          tx.execute(
            "INSERT INTO students (
               student_id, first_name, last_name, email, phone,
               is_active, enrolled_at, created_at, updated_at, course_id
             )
             SELECT ?1, ?2, ?3, ?4, ?5, 1, ?6, ?6, ?6, c.course_id
             FROM courses c WHERE c.code = ?7
             ON CONFLICT (email) DO NOTHING",
            rusqlite::params![student_id, first, last, email, phone, now, COURSE_CODE],
          )?;
        }

        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(course = COURSE_CODE, "demo data seeded");
    Ok(())
  }
}
