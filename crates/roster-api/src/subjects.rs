//! Handlers for `/subjects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subjects` | All subjects by name, each with its courses |
//! | `GET`  | `/subjects/defaults` | Only the reference subjects offered for new courses |

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::{
  store::RosterStore,
  subject::{DEFAULT_SUBJECT_NAMES, SubjectWithCourses},
};

use crate::error::ApiError;

/// `GET /subjects`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SubjectWithCourses>>, ApiError>
where
  S: RosterStore,
{
  let subjects = store
    .list_subjects()
    .await
    .map_err(|e| ApiError::from_read(e, "Failed to fetch subjects"))?;
  Ok(Json(subjects))
}

/// `GET /subjects/defaults`
pub async fn defaults<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SubjectWithCourses>>, ApiError>
where
  S: RosterStore,
{
  let subjects = store
    .list_subjects_named(&DEFAULT_SUBJECT_NAMES)
    .await
    .map_err(|e| ApiError::from_read(e, "Failed to fetch default subjects"))?;
  Ok(Json(subjects))
}
