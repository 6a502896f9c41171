//! Typed error handling for the darzi service
//!
//! Every fallible operation in the service resolves to one of five error
//! classes, each with a fixed HTTP status:
//!
//! - [`Error::Validation`] — malformed identifier or missing required input (400)
//! - [`Error::NotFound`] — no record matches the given id (404)
//! - [`Error::Conflict`] — a uniqueness constraint was violated (409)
//! - [`Error::Connectivity`] — the storage backend is unreachable (500)
//! - [`Error::Unexpected`] — anything else, including malformed stored data (500)
//!
//! Handlers return `Result<_, Error>` and rely on the [`IntoResponse`]
//! implementation to translate the error into a JSON body at the boundary.
//! There are no retries and no partial-success semantics: a request either
//! fully succeeds or fully fails with one of these classes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error as ThisError;

/// The error type shared by storage backends and request handlers.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The request carried a malformed identifier or was otherwise invalid
    /// before reaching storage.
    #[error("{0}")]
    Validation(String),

    /// The id was well-formed but no record matches it. Carries the entity
    /// kind for the response message (e.g. "Client" → "Client not found").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A store-enforced uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// The storage backend could not be reached.
    #[error("storage unreachable: {0}")]
    Connectivity(String),

    /// Everything else: serialization failures, corrupt stored data, I/O.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// JSON body attached to every error response.
///
/// `message` is always present; `error` carries the underlying error text
/// for server-side failures so the dashboard can surface it verbatim.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Error {
    /// HTTP status for this error class.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Connectivity(_) | Error::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the JSON body for this error.
    ///
    /// Client-caused errors (400/404/409) put their own text in `message`;
    /// server-side errors keep the generic "Server error" message and attach
    /// the underlying text in `error`.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Error::Validation(_) | Error::NotFound(_) | Error::Conflict(_) => ErrorResponse {
                message: self.to_string(),
                error: None,
            },
            Error::Connectivity(_) | Error::Unexpected(_) => ErrorResponse {
                message: "Server error".to_string(),
                error: Some(self.to_string()),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}
