//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students` | Oldest first, each with course and its subjects |
//! | `POST` | `/students` | Body: [`CreateStudentBody`]; returns 201 + student with course |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  store::RosterStore,
  student::{NewStudent, StudentWithCourse},
};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, input};

const MISSING_FIELDS: &str = "firstName, email and courseId are required";
const DUPLICATE_EMAIL: &str = "Email already exists";
const INVALID_COURSE: &str = "Invalid courseId";

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /students`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<StudentWithCourse>>, ApiError>
where
  S: RosterStore,
{
  let students = store
    .list_students()
    .await
    .map_err(|e| ApiError::from_read(e, "Failed to fetch students"))?;
  Ok(Json(students))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /students`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentBody {
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub email:       Option<String>,
  pub phone:       Option<String>,
  /// Only a JSON boolean is honoured; anything else means `true`.
  pub is_active:   Option<Value>,
  /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to the creation time.
  pub enrolled_at: Option<String>,
  pub course_id:   Option<String>,
}

impl TryFrom<CreateStudentBody> for NewStudent {
  type Error = ApiError;

  fn try_from(b: CreateStudentBody) -> Result<Self, ApiError> {
    let (Some(first_name), Some(email), Some(course_id)) = (
      input::required(&b.first_name),
      input::required(&b.email),
      input::required(&b.course_id),
    ) else {
      return Err(ApiError::BadRequest(MISSING_FIELDS.to_owned()));
    };

    let is_active = match b.is_active {
      Some(Value::Bool(active)) => active,
      _ => true,
    };

    Ok(NewStudent {
      first_name: first_name.to_owned(),
      last_name: input::optional(b.last_name),
      email: email.to_owned(),
      phone: input::optional(b.phone),
      is_active,
      enrolled_at: input::timestamp("enrolledAt", b.enrolled_at.as_deref())?,
      course_id: input::reference(course_id, INVALID_COURSE)?,
    })
  }
}

/// `POST /students`: returns 201 with the created student and its course.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateStudentBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let Json(body) = body?;
  let input = NewStudent::try_from(body)?;

  let student = store
    .create_student(input)
    .await
    .map_err(|e| ApiError::from_write(e, DUPLICATE_EMAIL, INVALID_COURSE))?;

  tracing::info!(student_id = %student.student.id, "student created");
  Ok((StatusCode::CREATED, Json(student)))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn body(value: serde_json::Value) -> CreateStudentBody {
    serde_json::from_value(value).unwrap()
  }

  fn valid() -> serde_json::Value {
    json!({
      "firstName": "Alice",
      "email": "alice@example.com",
      "courseId": uuid::Uuid::nil().to_string(),
    })
  }

  #[test]
  fn is_active_defaults_to_true() {
    let input = NewStudent::try_from(body(valid())).unwrap();
    assert!(input.is_active);
  }

  #[test]
  fn is_active_only_honours_booleans() {
    let mut v = valid();
    v["isActive"] = json!(false);
    assert!(!NewStudent::try_from(body(v.clone())).unwrap().is_active);

    v["isActive"] = json!("false");
    assert!(NewStudent::try_from(body(v.clone())).unwrap().is_active);

    v["isActive"] = json!(null);
    assert!(NewStudent::try_from(body(v)).unwrap().is_active);
  }

  #[test]
  fn missing_course_id_is_bad_request() {
    let mut v = valid();
    v["courseId"] = json!("");
    let err = NewStudent::try_from(body(v)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(m) if m == MISSING_FIELDS));
  }

  #[test]
  fn non_uuid_course_id_is_invalid_course() {
    let mut v = valid();
    v["courseId"] = json!("42");
    let err = NewStudent::try_from(body(v)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(m) if m == INVALID_COURSE));
  }
}
