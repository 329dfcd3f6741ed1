mod get_audiobook;
mod health;
mod search;
mod transcribe;

pub(crate) use {
    get_audiobook::get_audiobook, health::health, search::search_audiobooks,
    transcribe::transcribe_audio,
};

use axum::http::StatusCode;

/// Fallback for non-POST methods on the API routes.
pub(crate) async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
