//! [`SqliteStore`], the SQLite implementation of [`RosterStore`].

use std::{collections::HashMap, hash::Hash, path::Path};

use chrono::Utc;
use roster_core::{
  course::{Course, CourseDetail, CourseWithSubjects, NewCourse},
  store::RosterStore,
  student::{NewStudent, Student, StudentWithCourse},
  subject::{NewSubject, Subject, SubjectWithCourses},
};
use uuid::Uuid;

use crate::{
  encode::{
    RawCourse, RawStudent, RawSubject, decode_uuid, encode_dt, encode_uuid, stored_precision,
  },
  query,
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Decoding helpers ────────────────────────────────────────────────────────

/// Group `(key, value)` pairs by key, keeping the input order within each
/// group.
fn group<K: Eq + Hash, V>(pairs: impl IntoIterator<Item = (K, V)>) -> HashMap<K, Vec<V>> {
  let mut map: HashMap<K, Vec<V>> = HashMap::new();
  for (k, v) in pairs {
    map.entry(k).or_default().push(v);
  }
  map
}

fn decode_subjects(raws: Vec<RawSubject>) -> Result<Vec<Subject>> {
  raws.into_iter().map(RawSubject::into_subject).collect()
}

/// Decode `(course_id, subject)` links into subjects keyed by course id.
fn subjects_by_course(links: Vec<(String, RawSubject)>) -> Result<HashMap<Uuid, Vec<Subject>>> {
  let pairs = links
    .into_iter()
    .map(|(course_id, raw)| {
      Ok((decode_uuid(&course_id)?, raw.into_subject()?))
    })
    .collect::<Result<Vec<_>>>()?;
  Ok(group(pairs))
}

/// Raw rows backing [`RosterStore::list_students`].
struct StudentRows {
  students: Vec<RawStudent>,
  courses:  Vec<RawCourse>,
  links:    Vec<(String, RawSubject)>,
}

/// Raw rows backing [`RosterStore::list_courses`].
struct CourseRows {
  courses:  Vec<RawCourse>,
  students: Vec<RawStudent>,
  links:    Vec<(String, RawSubject)>,
}

/// Raw rows backing [`RosterStore::list_subjects`].
struct SubjectRows {
  subjects: Vec<RawSubject>,
  links:    Vec<(String, RawCourse)>,
}

impl SubjectRows {
  fn into_subjects(self) -> Result<Vec<SubjectWithCourses>> {
    let pairs = self
      .links
      .into_iter()
      .map(|(subject_id, raw)| {
        Ok((decode_uuid(&subject_id)?, raw.into_course()?))
      })
      .collect::<Result<Vec<_>>>()?;
    let mut courses = group(pairs);

    self
      .subjects
      .into_iter()
      .map(|raw| {
        let subject = raw.into_subject()?;
        let courses = courses.remove(&subject.id).unwrap_or_default();
        Ok(SubjectWithCourses { subject, courses })
      })
      .collect()
  }
}

impl SqliteStore {
  async fn subject_rows(&self, names: Option<Vec<String>>) -> Result<Vec<SubjectWithCourses>> {
    let rows = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let subjects = query::subjects(&tx, names.as_deref())?;
        let links = query::course_links(&tx)?;
        Ok(SubjectRows { subjects, links })
      })
      .await?;
    rows.into_subjects()
  }

  /// Load a course and its subjects inside an open connection, for the
  /// responses of the create operations.
  fn course_with_subjects(
    conn: &rusqlite::Connection,
    course_id: &str,
  ) -> rusqlite::Result<Option<(RawCourse, Vec<RawSubject>)>> {
    let Some(course) = query::course_by_id(conn, course_id)? else {
      return Ok(None);
    };
    let subjects = query::subjects_of_course(conn, course_id)?;
    Ok(Some((course, subjects)))
  }

  /// Insert a subject row. Used by course creation and seeding.
  pub(crate) fn insert_subject(
    conn: &rusqlite::Connection,
    subject: &Subject,
  ) -> rusqlite::Result<()> {
    conn.execute(
      "INSERT INTO subjects (subject_id, name, category, description, created_at, updated_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      rusqlite::params![
        encode_uuid(subject.id),
        subject.name,
        subject.category,
        subject.description,
        encode_dt(subject.created_at),
        encode_dt(subject.updated_at),
      ],
    )?;
    Ok(())
  }
}

/// Build a fresh [`Subject`] from `input` with server-assigned identity.
pub(crate) fn new_subject(input: NewSubject) -> Subject {
  let now = stored_precision(Utc::now());
  Subject {
    id:          Uuid::new_v4(),
    name:        input.name,
    category:    input.category,
    description: input.description,
    created_at:  now,
    updated_at:  now,
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_students(&self) -> Result<Vec<StudentWithCourse>> {
    let rows = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let students = query::students_oldest_first(&tx)?;
        let courses = query::courses_newest_first(&tx)?;
        let links = query::subject_links(&tx)?;
        Ok(StudentRows { students, courses, links })
      })
      .await?;

    let mut subjects = subjects_by_course(rows.links)?;
    let courses: HashMap<Uuid, CourseWithSubjects> = rows
      .courses
      .into_iter()
      .map(|raw| {
        let course = raw.into_course()?;
        let subjects = subjects.remove(&course.id).unwrap_or_default();
        Ok((course.id, CourseWithSubjects { course, subjects }))
      })
      .collect::<Result<_>>()?;

    rows
      .students
      .into_iter()
      .map(|raw| {
        let student = raw.into_student()?;
        let course = student.course_id.and_then(|id| courses.get(&id).cloned());
        Ok(StudentWithCourse { student, course })
      })
      .collect()
  }

  async fn list_courses(&self) -> Result<Vec<CourseDetail>> {
    let rows = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let courses = query::courses_newest_first(&tx)?;
        let students = query::students_oldest_first(&tx)?;
        let links = query::subject_links(&tx)?;
        Ok(CourseRows { courses, students, links })
      })
      .await?;

    let mut subjects = subjects_by_course(rows.links)?;
    let enrolled = rows
      .students
      .into_iter()
      .map(RawStudent::into_student)
      .collect::<Result<Vec<Student>>>()?
      .into_iter()
      .filter_map(|s| s.course_id.map(|course_id| (course_id, s)));
    let mut students = group(enrolled);

    rows
      .courses
      .into_iter()
      .map(|raw| {
        let course = raw.into_course()?;
        Ok(CourseDetail {
          students: students.remove(&course.id).unwrap_or_default(),
          subjects: subjects.remove(&course.id).unwrap_or_default(),
          course,
        })
      })
      .collect()
  }

  async fn list_subjects(&self) -> Result<Vec<SubjectWithCourses>> {
    self.subject_rows(None).await
  }

  async fn list_subjects_named<'a>(
    &'a self,
    names: &'a [&'a str],
  ) -> Result<Vec<SubjectWithCourses>> {
    if names.is_empty() {
      return Ok(Vec::new());
    }
    let names = names.iter().map(|n| (*n).to_owned()).collect();
    self.subject_rows(Some(names)).await
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create_course(&self, input: NewCourse) -> Result<CourseWithSubjects> {
    let secondary = input
      .secondary_subject()
      .map(|name| new_subject(NewSubject::custom(name)));

    let now = stored_precision(Utc::now());
    let course = Course {
      id:          Uuid::new_v4(),
      code:        input.code,
      title:       input.title,
      description: input.description,
      start_date:  input.start_date.map(stored_precision),
      end_date:    input.end_date.map(stored_precision),
      created_at:  now,
      updated_at:  now,
    };

    let course_id_str = encode_uuid(course.id);
    let base_id_str   = encode_uuid(input.base_subject_id);
    let code          = course.code.clone();
    let title         = course.title.clone();
    let description   = course.description.clone();
    let start_str     = course.start_date.map(encode_dt);
    let end_str       = course.end_date.map(encode_dt);
    let at_str        = encode_dt(now);

    let subjects: Vec<RawSubject> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO courses (
             course_id, code, title, description,
             start_date, end_date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            course_id_str,
            code,
            title,
            description,
            start_str,
            end_str,
            at_str,
          ],
        )?;
        tx.execute(
          "INSERT INTO course_subjects (course_id, subject_id) VALUES (?1, ?2)",
          rusqlite::params![course_id_str, base_id_str],
        )?;
        if let Some(subject) = &secondary {
          SqliteStore::insert_subject(&tx, subject)?;
          tx.execute(
            "INSERT INTO course_subjects (course_id, subject_id) VALUES (?1, ?2)",
            rusqlite::params![course_id_str, encode_uuid(subject.id)],
          )?;
        }
        let subjects = query::subjects_of_course(&tx, &course_id_str)?;
        tx.commit()?;
        Ok(subjects)
      })
      .await?;

    tracing::debug!(course_id = %course.id, code = %course.code, "course created");

    Ok(CourseWithSubjects {
      course,
      subjects: decode_subjects(subjects)?,
    })
  }

  async fn create_student(&self, input: NewStudent) -> Result<StudentWithCourse> {
    let now = stored_precision(Utc::now());
    let student = Student {
      id:          Uuid::new_v4(),
      first_name:  input.first_name,
      last_name:   input.last_name,
      email:       input.email,
      phone:       input.phone,
      is_active:   input.is_active,
      enrolled_at: input.enrolled_at.map(stored_precision).unwrap_or(now),
      created_at:  now,
      updated_at:  now,
      course_id:   Some(input.course_id),
    };

    let student_id_str = encode_uuid(student.id);
    let course_id_str  = encode_uuid(input.course_id);
    let first_name     = student.first_name.clone();
    let last_name      = student.last_name.clone();
    let email          = student.email.clone();
    let phone          = student.phone.clone();
    let is_active      = student.is_active;
    let enrolled_str   = encode_dt(student.enrolled_at);
    let at_str         = encode_dt(now);

    let course = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO students (
             student_id, first_name, last_name, email, phone,
             is_active, enrolled_at, created_at, updated_at, course_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, ?9)",
          rusqlite::params![
            student_id_str,
            first_name,
            last_name,
            email,
            phone,
            is_active,
            enrolled_str,
            at_str,
            course_id_str,
          ],
        )?;
        let course = SqliteStore::course_with_subjects(&tx, &course_id_str)?;
        tx.commit()?;
        Ok(course)
      })
      .await?;

    tracing::debug!(student_id = %student.id, email = %student.email, "student created");

    let course = course
      .map(|(raw, subjects)| {
        Ok::<_, Error>(CourseWithSubjects {
          course:   raw.into_course()?,
          subjects: decode_subjects(subjects)?,
        })
      })
      .transpose()?;

    Ok(StudentWithCourse { student, course })
  }
}
