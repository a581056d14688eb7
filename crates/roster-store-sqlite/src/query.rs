//! Synchronous read queries run on the connection thread.
//!
//! Each read operation of the store names its joins explicitly by combining
//! these helpers; nothing is loaded implicitly.

use rusqlite::{Connection, OptionalExtension as _, params_from_iter};

use crate::encode::{
  COURSE_COLUMNS, RawCourse, RawStudent, RawSubject, STUDENT_COLUMNS, SUBJECT_COLUMNS,
};

/// Subjects ordered by name. When `names` is given, only subjects with one
/// of those names are returned.
pub fn subjects(conn: &Connection, names: Option<&[String]>) -> rusqlite::Result<Vec<RawSubject>> {
  let filter = match names {
    Some(names) => format!("WHERE s.name IN ({})", vec!["?"; names.len()].join(", ")),
    None => String::new(),
  };
  let sql = format!("SELECT {SUBJECT_COLUMNS} FROM subjects s {filter} ORDER BY s.name ASC");
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map(params_from_iter(names.unwrap_or_default()), |row| RawSubject::from_row(row, 0))?
    .collect()
}

/// All courses, newest first. Ties on `created_at` fall back to insertion
/// order.
pub fn courses_newest_first(conn: &Connection) -> rusqlite::Result<Vec<RawCourse>> {
  let sql = format!(
    "SELECT {COURSE_COLUMNS} FROM courses c ORDER BY c.created_at DESC, c.rowid DESC"
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt.query_map([], |row| RawCourse::from_row(row, 0))?.collect()
}

pub fn course_by_id(conn: &Connection, course_id: &str) -> rusqlite::Result<Option<RawCourse>> {
  let sql = format!("SELECT {COURSE_COLUMNS} FROM courses c WHERE c.course_id = ?1");
  conn
    .query_row(&sql, [course_id], |row| RawCourse::from_row(row, 0))
    .optional()
}

/// All students, oldest first.
pub fn students_oldest_first(conn: &Connection) -> rusqlite::Result<Vec<RawStudent>> {
  let sql = format!(
    "SELECT {STUDENT_COLUMNS} FROM students st ORDER BY st.created_at ASC, st.rowid ASC"
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt.query_map([], |row| RawStudent::from_row(row, 0))?.collect()
}

/// Every course-subject link as `(course_id, subject)`, subjects ordered by
/// name.
pub fn subject_links(conn: &Connection) -> rusqlite::Result<Vec<(String, RawSubject)>> {
  let sql = format!(
    "SELECT cs.course_id, {SUBJECT_COLUMNS}
     FROM course_subjects cs
     JOIN subjects s ON s.subject_id = cs.subject_id
     ORDER BY s.name ASC"
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map([], |row| Ok((row.get(0)?, RawSubject::from_row(row, 1)?)))?
    .collect()
}

/// Every course-subject link as `(subject_id, course)`, courses oldest first.
pub fn course_links(conn: &Connection) -> rusqlite::Result<Vec<(String, RawCourse)>> {
  let sql = format!(
    "SELECT cs.subject_id, {COURSE_COLUMNS}
     FROM course_subjects cs
     JOIN courses c ON c.course_id = cs.course_id
     ORDER BY c.created_at ASC, c.rowid ASC"
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map([], |row| Ok((row.get(0)?, RawCourse::from_row(row, 1)?)))?
    .collect()
}

/// The subjects connected to one course, ordered by name.
pub fn subjects_of_course(conn: &Connection, course_id: &str) -> rusqlite::Result<Vec<RawSubject>> {
  let sql = format!(
    "SELECT {SUBJECT_COLUMNS}
     FROM course_subjects cs
     JOIN subjects s ON s.subject_id = cs.subject_id
     WHERE cs.course_id = ?1
     ORDER BY s.name ASC"
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map([course_id], |row| RawSubject::from_row(row, 0))?
    .collect()
}
