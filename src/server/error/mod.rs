//! Error types for the Gridiron server application.
//!
//! Domain-specific error enums (configuration, ESPN upstream, sync orchestration)
//! are aggregated into a single [`Error`] type via `thiserror`'s `#[from]`
//! conversions. All errors implement `IntoResponse` for Axum; anything without a
//! more specific mapping is logged and rendered as a generic 500 so internal
//! detail never leaks to API consumers.

pub mod config;
pub mod espn;
pub mod sync;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing;

use crate::server::{
    error::{config::ConfigError, espn::EspnError, sync::SyncError},
    model::api::ErrorDto,
};

/// Main error type for the Gridiron server application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// ESPN upstream error (transport, non-2xx status, or decode failure).
    #[error(transparent)]
    EspnError(#[from] EspnError),
    /// Sync orchestration error (dependency, upstream, or persistence failure).
    #[error(transparent)]
    SyncError(#[from] SyncError),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Valkey/Redis error (connection, command execution).
    #[error(transparent)]
    CacheError(#[from] fred::prelude::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}

/// Wrapper type for converting any displayable error into a 500 response.
///
/// Logs the full error for debugging but returns a generic message to the
/// client so implementation detail is never exposed.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
