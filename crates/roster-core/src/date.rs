//! Parsing of the timestamps exchanged over the API.
//!
//! Clients send either a full RFC 3339 timestamp or a bare calendar date
//! (`YYYY-MM-DD`, taken as midnight UTC).

use chrono::{DateTime, NaiveDate, Utc};

use crate::{Error, Result};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
  let trimmed = input.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
    return Ok(dt.with_timezone(&Utc));
  }
  NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|naive| naive.and_utc())
    .ok_or_else(|| Error::InvalidTimestamp(input.to_owned()))
}
