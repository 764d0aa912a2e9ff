pub mod dotfiles;
pub mod health;
pub mod install;
pub mod packages;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// Builds the one success response shape every script/list route uses:
/// the right content type, no caching (installer scripts must always be
/// fresh), and an open cross-origin allowance.
pub(crate) fn serve(content: String, content_type: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        content,
    )
        .into_response()
}
