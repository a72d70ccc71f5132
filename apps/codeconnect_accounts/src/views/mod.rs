pub mod session;
pub mod signup;

use axum::http::StatusCode;
use axum::response::Html;

use crate::templates;

/// Storage or crypto faults surface as a generic failure page; nothing was
/// committed, so the submitter can simply retry.
pub(crate) fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, Html<String>) {
    tracing::error!("request failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(templates::server_error_page()),
    )
}
