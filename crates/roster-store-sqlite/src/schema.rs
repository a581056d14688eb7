//! SQL schema for the Roster SQLite store.
//!
//! Run in full every time a store is opened; every statement is idempotent.
//! `user_version` is set to the schema revision but nothing reads it yet.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS subjects (
    subject_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    category    TEXT NOT NULL,   -- free-form: 'STEM' | 'Humanities' | 'Custom' | ...
    description TEXT,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS courses (
    course_id   TEXT PRIMARY KEY,
    code        TEXT NOT NULL UNIQUE,
    title       TEXT NOT NULL,
    description TEXT,
    start_date  TEXT,
    end_date    TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- Many-to-many between courses and subjects.
CREATE TABLE IF NOT EXISTS course_subjects (
    course_id  TEXT NOT NULL REFERENCES courses(course_id),
    subject_id TEXT NOT NULL REFERENCES subjects(subject_id),
    PRIMARY KEY (course_id, subject_id)
);

CREATE TABLE IF NOT EXISTS students (
    student_id  TEXT PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT,
    email       TEXT NOT NULL UNIQUE,
    phone       TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1,
    enrolled_at TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    course_id   TEXT REFERENCES courses(course_id)
);

CREATE INDEX IF NOT EXISTS course_subjects_subject_idx ON course_subjects(subject_id);
CREATE INDEX IF NOT EXISTS students_course_idx         ON students(course_id);
CREATE INDEX IF NOT EXISTS students_created_idx        ON students(created_at);
CREATE INDEX IF NOT EXISTS courses_created_idx         ON courses(created_at);

PRAGMA user_version = 1;
";
