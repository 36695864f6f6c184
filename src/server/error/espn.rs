use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

/// ESPN upstream failures, split so the orchestrator can log transport, HTTP
/// status, and decode problems distinctly without understanding wire formats.
#[derive(Error, Debug)]
pub enum EspnError {
    #[error("ESPN request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("ESPN returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("Failed to decode ESPN response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl IntoResponse for EspnError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
