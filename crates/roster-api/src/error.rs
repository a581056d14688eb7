//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::store::{ClassifyError, StoreErrorKind};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every variant renders as
/// `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or malformed input, or a reference to a row that does not
  /// exist.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// A uniqueness constraint rejected the write.
  #[error("conflict: {0}")]
  Conflict(String),

  /// A failure reported to the client with a fixed message.
  #[error("internal error: {0}")]
  Internal(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a failed store write: unique violations become
  /// [`Conflict`](Self::Conflict) with `conflict`, dangling references become
  /// [`BadRequest`](Self::BadRequest) with `invalid_ref`, and anything else is
  /// logged and passed through as [`Store`](Self::Store).
  pub(crate) fn from_write<E>(err: E, conflict: &str, invalid_ref: &str) -> Self
  where
    E: std::error::Error + ClassifyError + Send + Sync + 'static,
  {
    match err.kind() {
      StoreErrorKind::Unique => {
        tracing::warn!(error = %err, "write rejected: {conflict}");
        ApiError::Conflict(conflict.to_owned())
      }
      StoreErrorKind::ForeignKey => {
        tracing::warn!(error = %err, "write rejected: {invalid_ref}");
        ApiError::BadRequest(invalid_ref.to_owned())
      }
      StoreErrorKind::Other => {
        tracing::error!(error = %err, "store write failed");
        ApiError::Store(Box::new(err))
      }
    }
  }

  /// Log a failed store read and replace it with the fixed `message`.
  pub(crate) fn from_read<E: std::error::Error>(err: E, message: &'static str) -> Self {
    tracing::error!(error = %err, "{message}");
    ApiError::Internal(message)
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, (*m).to_owned()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
