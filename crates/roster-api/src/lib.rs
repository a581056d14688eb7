//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::RosterStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(store.clone()))
//! ```

pub mod courses;
pub mod error;
pub mod students;
pub mod subjects;

mod input;

use std::sync::Arc;

use axum::{Router, routing::get};
use roster_core::store::RosterStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Students
    .route("/students", get(students::list::<S>).post(students::create::<S>))
    // Courses
    .route("/courses", get(courses::list::<S>).post(courses::create::<S>))
    // Subjects
    .route("/subjects", get(subjects::list::<S>))
    .route("/subjects/defaults", get(subjects::defaults::<S>))
    .with_state(store)
}
