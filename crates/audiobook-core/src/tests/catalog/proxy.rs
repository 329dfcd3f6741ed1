use crate::{Catalog, CatalogError, ProxyCatalog, SearchQuery};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const ANON_KEY: &str = "test-anon-key";

/// WHAT: Search posts the trimmed query with the bearer key
/// WHY: The proxy expects the static key and a clean title filter
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_padded_query_when_searching_then_trimmed_body_posted_with_key() {
    // Given: A proxy answering one book for "sherlock"
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-audiobooks"))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .and(body_json(json!({"query": "sherlock", "limit": 50, "offset": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [{"id": "52", "title": "The Adventures of Sherlock Holmes"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let catalog = ProxyCatalog::new(format!("{}/", server.uri()), ANON_KEY).unwrap();

    // When: Searching with surrounding whitespace
    let books = catalog
        .search(&SearchQuery::new("  sherlock "))
        .await
        .unwrap();

    // Then: One book decoded
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "52");
}

/// WHAT: Search failures carry the proxy's error message
/// WHY: The screen shows a generic message but logs the cause
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_proxy_when_searching_then_status_error_with_message() {
    // Given: A proxy failing with a structured error
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search-audiobooks"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "LibriVox API error: 503", "books": []
        })))
        .mount(&server)
        .await;
    let catalog = ProxyCatalog::new(server.uri(), ANON_KEY).unwrap();

    // When: Searching
    let result = catalog.search(&SearchQuery::new("x")).await;

    // Then: Status error with the message
    assert!(matches!(
        result,
        Err(CatalogError::Status { status: 500, ref message, .. }) if message == "LibriVox API error: 503"
    ));
}

/// WHAT: A 404 from get-audiobook is an absent book, not an error
/// WHY: Unknown ids show the not-found view
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_unknown_id_when_fetching_then_none() {
    // Given: A proxy answering 404
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-audiobook"))
        .and(body_json(json!({"id": "999"})))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "Book not found with the provided ID", "book": null
        })))
        .mount(&server)
        .await;
    let catalog = ProxyCatalog::new(server.uri(), ANON_KEY).unwrap();

    // When: Fetching
    let book = catalog.get_by_id("999").await.unwrap();

    // Then: None
    assert!(book.is_none());
}

/// WHAT: A found book is decoded from the `book` field
/// WHY: Detail view renders straight from it
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_known_id_when_fetching_then_book_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-audiobook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "book": {"id": "1", "title": "Pride and Prejudice", "sections": [
                {"id": "9", "title": "Chapter 1", "listen_url": "https://archive.org/1.mp3"}
            ]}
        })))
        .mount(&server)
        .await;
    let catalog = ProxyCatalog::new(server.uri(), ANON_KEY).unwrap();

    let book = catalog.get_by_id("1").await.unwrap().unwrap();

    assert_eq!(book.title, "Pride and Prejudice");
    assert_eq!(book.sections().len(), 1);
}

/// WHAT: Non-JSON success bodies surface as decode errors
/// WHY: Distinguishes a broken proxy from an empty result
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_garbage_body_when_searching_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;
    let catalog = ProxyCatalog::new(server.uri(), ANON_KEY).unwrap();

    let result = catalog.search(&SearchQuery::new("x")).await;

    assert!(matches!(result, Err(CatalogError::Decode { .. })));
}

/// WHAT: Empty and non-http base URLs are rejected
/// WHY: Fail at construction rather than on first request
#[test]
fn given_invalid_base_url_when_creating_client_then_invalid_url_error() {
    assert!(matches!(
        ProxyCatalog::new("", ANON_KEY),
        Err(CatalogError::InvalidUrl { .. })
    ));
    assert!(matches!(
        ProxyCatalog::new("ftp://example.com", ANON_KEY),
        Err(CatalogError::InvalidUrl { .. })
    ));
}
