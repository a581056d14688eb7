//! Handlers for `/courses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses` | Newest first, each with students and subjects |
//! | `POST` | `/courses` | Body: [`CreateCourseBody`]; returns 201 + course with subjects |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  course::{CourseDetail, NewCourse},
  store::RosterStore,
};
use serde::Deserialize;

use crate::{error::ApiError, input};

const MISSING_FIELDS: &str = "title, code and baseSubjectId are required";
const DUPLICATE: &str = "Course code or subject name already exists";
const INVALID_BASE_SUBJECT: &str = "Invalid baseSubjectId";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /courses`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<CourseDetail>>, ApiError>
where
  S: RosterStore,
{
  let courses = store
    .list_courses()
    .await
    .map_err(|e| ApiError::from_read(e, "Failed to fetch courses"))?;
  Ok(Json(courses))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /courses`.
///
/// Every field is optional at the type level so that a missing required
/// field is reported as a 400 with a readable message rather than a
/// deserialisation failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseBody {
  pub title:                  Option<String>,
  pub code:                   Option<String>,
  pub description:            Option<String>,
  /// RFC 3339 timestamp or `YYYY-MM-DD`.
  pub start_date:             Option<String>,
  pub end_date:               Option<String>,
  pub base_subject_id:        Option<String>,
  /// Name of a new `Custom` subject to create alongside the course.
  pub secondary_subject_name: Option<String>,
}

impl TryFrom<CreateCourseBody> for NewCourse {
  type Error = ApiError;

  fn try_from(b: CreateCourseBody) -> Result<Self, ApiError> {
    let (Some(title), Some(code), Some(base_subject_id)) = (
      input::required(&b.title),
      input::required(&b.code),
      input::required(&b.base_subject_id),
    ) else {
      return Err(ApiError::BadRequest(MISSING_FIELDS.to_owned()));
    };

    Ok(NewCourse {
      title:                  title.to_owned(),
      code:                   code.to_owned(),
      description:            input::optional(b.description),
      start_date:             input::timestamp("startDate", b.start_date.as_deref())?,
      end_date:               input::timestamp("endDate", b.end_date.as_deref())?,
      base_subject_id:        input::reference(base_subject_id, INVALID_BASE_SUBJECT)?,
      secondary_subject_name: b.secondary_subject_name,
    })
  }
}

/// `POST /courses`: returns 201 with the created course and its subjects.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateCourseBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let Json(body) = body?;
  let input = NewCourse::try_from(body)?;

  let course = store
    .create_course(input)
    .await
    .map_err(|e| ApiError::from_write(e, DUPLICATE, INVALID_BASE_SUBJECT))?;

  tracing::info!(
    course_id = %course.course.id,
    code = %course.course.code,
    subjects = course.subjects.len(),
    "course created"
  );
  Ok((StatusCode::CREATED, Json(course)))
}
