//! Error type for `roster-store-sqlite`.

use roster_core::store::{ClassifyError, StoreErrorKind};
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl ClassifyError for Error {
  fn kind(&self) -> StoreErrorKind {
    match self {
      Error::Database(tokio_rusqlite::Error::Rusqlite(e)) => classify_sqlite(e),
      _ => StoreErrorKind::Other,
    }
  }
}

/// Map SQLite's extended constraint result codes onto [`StoreErrorKind`].
fn classify_sqlite(e: &rusqlite::Error) -> StoreErrorKind {
  match e {
    rusqlite::Error::SqliteFailure(err, _) => match err.extended_code {
      ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
        StoreErrorKind::Unique
      }
      ffi::SQLITE_CONSTRAINT_FOREIGNKEY => StoreErrorKind::ForeignKey,
      _ => StoreErrorKind::Other,
    },
    _ => StoreErrorKind::Other,
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
