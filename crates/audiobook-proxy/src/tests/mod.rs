
use crate::{AppState, app::build_router, config::Config};

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub(super) const FEED_PATH: &str = "/api/feed/audiobooks/";
pub(super) const TRANSCRIBE_PATH: &str = "/v1/audio/transcriptions";
pub(super) const API_KEY: &str = "sk-test";

/// Config pointing both upstream services at `upstream` (a mock server URI).
pub(super) fn test_config(upstream: &str, api_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = format!("{upstream}{FEED_PATH}");
    config.transcription.base_url = format!("{upstream}{TRANSCRIBE_PATH}");
    config.transcription.api_key = api_key.map(str::to_string);
    config
}

#[allow(clippy::unwrap_used)]
pub(super) fn test_router(config: &Config) -> Router {
    build_router(Arc::new(AppState::new(config).unwrap()))
}

/// Drive one request through `router` and decode the body as JSON, falling
/// back to a JSON string for plain-text bodies.
#[allow(clippy::unwrap_used)]
pub(super) async fn send(router: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, headers, body)
}

#[allow(clippy::unwrap_used)]
pub(super) fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A feed record with the loose typing LibriVox actually uses.
pub(super) fn librivox_book(id: u32, title: &str) -> Value {
    json!({
        "id": id.to_string(),
        "title": title,
        "description": "<p>A classic.</p>",
        "language": "English",
        "num_sections": 2,
        "totaltime": "11:34:52",
        "totaltimesecs": 41692,
        "authors": [{"id": "68", "first_name": "Jane", "last_name": "Austen", "dob": "1775", "dod": "1817"}],
        "genres": [{"id": "33", "name": "Romance"}],
        "coverart_thumbnail": "https://archive.org/thumb.jpg",
        "sections": [{
            "id": "1001",
            "section_number": 1,
            "title": "Chapter 1",
            "listen_url": "https://archive.org/chapter01.mp3",
            "language": "English",
            "playtime": "1534",
            "readers": [{"reader_id": 9, "display_name": "Karen Savage"}]
        }]
    })
}
