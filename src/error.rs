use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Everything that can terminate a request early. All variants are final
/// for the current request; nothing here is retried.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("host is not a recognized deployment domain")]
    UnrecognizedHost,

    #[error("no route for this path")]
    UnmatchedPath,

    #[error("unknown profile or category: {}", tokens.join(", "))]
    UnknownProfileOrCategory {
        tokens: Vec<String>,
        available: Vec<String>,
    },

    #[error("unknown config file key: {key}")]
    UnknownConfigKey { key: String, available: Vec<String> },

    #[error("upstream fetch failed for {url}: {reason}")]
    UpstreamFetchFailed { url: String, reason: String },

    #[error("package source marker not found in base script")]
    PlaceholderNotFound,
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self {
            // Wrong domain entirely. Fixed teapot status, never a redirect;
            // see DESIGN.md for the policy call.
            RouteError::UnrecognizedHost => {
                (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
            }

            RouteError::UnmatchedPath => {
                (StatusCode::NOT_FOUND, "No such route").into_response()
            }

            // Validation errors carry the full menu so clients can fix
            // themselves without reading docs.
            RouteError::UnknownProfileOrCategory { tokens, available } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid profile or category",
                    "invalid": tokens,
                    "available": available,
                })),
            )
                .into_response(),

            RouteError::UnknownConfigKey { key, available } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!("Invalid config file: {}", key),
                    "available": available,
                })),
            )
                .into_response(),

            RouteError::UpstreamFetchFailed { url, reason } => {
                tracing::error!("Upstream fetch failed for {}: {}", url, reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to fetch the upstream resource ({reason})"),
                )
                    .into_response()
            }

            // The base script no longer contains the line we rewrite.
            // Serving it unmodified would install the default package set
            // behind the caller's back, so this has to be a hard failure.
            RouteError::PlaceholderNotFound => {
                tracing::error!("Package source marker missing from base script");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error: failed to inject the package source URL. \
                     The base script format may have changed.",
                )
                    .into_response()
            }
        }
    }
}
