use std::path::PathBuf;

use http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::response::{IntoResponse, Response};

/// Everything that can go wrong while extracting a [`View`](super::View) or
/// rendering with it.
#[derive(Debug, Error)]
pub enum Error {
    /// The leaf template does not exist. Missing layouts are not an error.
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("invalid template name `{0}`")]
    InvalidName(String),

    /// Parse or execution failure inside the template engine.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template {} is not valid UTF-8", .path.display())]
    Utf8 { path: PathBuf },

    /// [`View::extract`](super::View::extract) ran on a request that never
    /// passed through [`view::middleware`](super::middleware).
    #[error("view middleware is not installed")]
    MissingView,
}

/// Render failures are server defects: logged, then answered with `500`.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!(error = %self, "view render failed");
        Response::status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
