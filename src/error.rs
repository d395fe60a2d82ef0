//! Unified error type.

use std::path::PathBuf;

use tracing::error;

use crate::news::StoreError;
use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::validation::ValidationErrors;

/// The error type returned by newsdesk's fallible operations.
///
/// Expected, user-facing outcomes (a form that fails validation, a slug that
/// matches nothing) are expressed as HTTP [`Response`] values, not as
/// `Error`s. This type covers infrastructure failures: binding a port, a
/// broken seed file, the store, or a template that will not render.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file {}: {source}", .path.display())]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed item {title:?} rejected: {errors}")]
    InvalidSeed { title: String, errors: ValidationErrors },

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("template: {0}")]
    Template(#[from] minijinja::Error),
}

/// The generic error boundary for handlers: log the cause, answer 500.
///
/// The response body stays generic; details only go to the log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        Response::builder()
            .status(Status::InternalServerError)
            .text(Status::InternalServerError.reason())
    }
}
