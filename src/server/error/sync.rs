use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// Failure of one sync attempt, attributed to the top-level requested key.
///
/// Outcomes are published to every caller waiting on the same in-flight fetch,
/// so this type carries rendered reasons rather than source errors and stays
/// `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A prerequisite resource could not be ensured, so the requested fetch
    /// was never attempted.
    #[error("Dependency fetch failed for {key}: {reason}")]
    Dependency { key: String, reason: String },
    /// The upstream fetch itself failed (transport, status, or decode).
    #[error("Upstream fetch failed for {key}: {reason}")]
    Upstream { key: String, reason: String },
    /// Fetched data could not be persisted; it is discarded for this attempt.
    #[error("Persistence failed for {key}: {reason}")]
    Persistence { key: String, reason: String },
    /// The leader's task ended without publishing an outcome.
    #[error("Sync for {key} was aborted before completing")]
    Aborted { key: String },
}

impl IntoResponse for SyncError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
