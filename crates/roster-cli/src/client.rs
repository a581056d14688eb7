//! Async HTTP client wrapping the Roster JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use roster_core::{
  course::{CourseDetail, CourseWithSubjects},
  student::StudentWithCourse,
  subject::SubjectWithCourses,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Connection settings for the Roster API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// JSON body sent to `POST /api/courses`. Empty optional fields are sent as
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
  pub title:                  String,
  pub code:                   String,
  pub description:            Option<String>,
  pub start_date:             Option<String>,
  pub end_date:               Option<String>,
  pub base_subject_id:        String,
  pub secondary_subject_name: Option<String>,
}

/// JSON body sent to `POST /api/students`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
  pub first_name:  String,
  pub last_name:   Option<String>,
  pub email:       String,
  pub phone:       Option<String>,
  pub is_active:   bool,
  pub enrolled_at: Option<String>,
  pub course_id:   Option<String>,
}

/// The `{"error": "..."}` body of every failed API response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the Roster JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let resp = self
      .client
      .get(self.url(path))
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("{}", resp.status()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising GET {path}"))
  }

  async fn post_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
    fallback: &str,
  ) -> Result<T> {
    let resp = self
      .client
      .post(self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!(error_message(resp, fallback).await));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising POST {path}"))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /api/students`
  pub async fn list_students(&self) -> Result<Vec<StudentWithCourse>> {
    self.get_json("/students").await
  }

  /// `GET /api/courses`
  pub async fn list_courses(&self) -> Result<Vec<CourseDetail>> {
    self.get_json("/courses").await
  }

  /// `GET /api/subjects`
  pub async fn list_subjects(&self) -> Result<Vec<SubjectWithCourses>> {
    self.get_json("/subjects").await
  }

  /// `GET /api/subjects/defaults`
  pub async fn list_default_subjects(&self) -> Result<Vec<SubjectWithCourses>> {
    self.get_json("/subjects/defaults").await
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// `POST /api/courses`
  pub async fn create_course(&self, req: &CreateCourseRequest) -> Result<CourseWithSubjects> {
    self
      .post_json("/courses", req, "Failed to create course")
      .await
  }

  /// `POST /api/students`
  pub async fn create_student(&self, req: &CreateStudentRequest) -> Result<StudentWithCourse> {
    self
      .post_json("/students", req, "Failed to create student")
      .await
  }
}

/// The server's `error` string, or `fallback` if the body is not the
/// expected JSON shape.
async fn error_message(resp: Response, fallback: &str) -> String {
  let status = resp.status();
  let text = resp.text().await.unwrap_or_default();
  let message = parse_error_body(&text).unwrap_or_else(|| fallback.to_owned());
  tracing::debug!(%status, %message, "API request rejected");
  message
}

fn parse_error_body(text: &str) -> Option<String> {
  serde_json::from_str::<ErrorBody>(text)
    .ok()
    .map(|b| b.error)
    .filter(|e| !e.is_empty())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn url_joins_api_prefix() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:4000/".into(),
    })
    .unwrap();
    assert_eq!(client.url("/courses"), "http://localhost:4000/api/courses");
  }

  #[test]
  fn error_body_is_used_verbatim() {
    assert_eq!(
      parse_error_body(r#"{"error":"Email already exists"}"#).as_deref(),
      Some("Email already exists")
    );
    assert_eq!(parse_error_body("<html>Bad Gateway</html>"), None);
    assert_eq!(parse_error_body(r#"{"error":""}"#), None);
  }

  #[test]
  fn course_request_serialises_nulls() {
    let req = CreateCourseRequest {
      title:                  "Foundations".into(),
      code:                   "C-FOUND".into(),
      description:            None,
      start_date:             Some("2025-08-20T00:00:00.000Z".into()),
      end_date:               None,
      base_subject_id:        "abc".into(),
      secondary_subject_name: None,
    };
    assert_eq!(
      serde_json::to_value(&req).unwrap(),
      json!({
        "title": "Foundations",
        "code": "C-FOUND",
        "description": null,
        "startDate": "2025-08-20T00:00:00.000Z",
        "endDate": null,
        "baseSubjectId": "abc",
        "secondarySubjectName": null,
      })
    );
  }
}
