//! Shared helpers for validating create-request bodies.

use chrono::{DateTime, Utc};
use roster_core::date::parse_timestamp;
use uuid::Uuid;

use crate::error::ApiError;

/// The trimmed value of a required field, or `None` if absent or blank.
pub fn required(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// An optional free-text field with blank values collapsed to `None`.
pub fn optional(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

/// Parse an optional timestamp field. Absent and `null` both yield `None`;
/// anything present must parse.
pub fn timestamp(field: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
  value
    .map(|raw| {
      parse_timestamp(raw)
        .map_err(|_| ApiError::BadRequest(format!("{field} must be an ISO-8601 date")))
    })
    .transpose()
}

/// Parse an id field. An id that is not a UUID cannot reference any row, so
/// it fails the same way a dangling reference does.
pub fn reference(value: &str, invalid: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(value).map_err(|_| ApiError::BadRequest(invalid.to_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn required_rejects_blank() {
    assert_eq!(required(&None), None);
    assert_eq!(required(&Some("  ".into())), None);
    assert_eq!(required(&Some(" C-1 ".into())), Some("C-1"));
  }

  #[test]
  fn optional_collapses_blank() {
    assert_eq!(optional(Some("".into())), None);
    assert_eq!(optional(Some(" Brown ".into())), Some("Brown".into()));
    assert_eq!(optional(None), None);
  }

  #[test]
  fn timestamp_names_the_bad_field() {
    assert!(timestamp("startDate", None).unwrap().is_none());
    assert!(timestamp("startDate", Some("2025-08-20")).unwrap().is_some());
    let err = timestamp("startDate", Some("soon")).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(m) if m.starts_with("startDate")));
  }
}
