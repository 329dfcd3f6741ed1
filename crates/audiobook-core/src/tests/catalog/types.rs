use crate::{Audiobook, AudiobookListing};

/// WHAT: Feed records with numeric ids and null fields decode
/// WHY: The upstream feed mixes strings, numbers and nulls for the same fields
#[test]
#[allow(clippy::unwrap_used)]
fn given_loosely_typed_feed_record_when_decoding_then_normalised_to_strings() {
    // Given: A record with numeric counters and a null text field
    let json = r#"{
        "id": 52,
        "title": "The Adventures of Sherlock Holmes",
        "description": null,
        "num_sections": 12,
        "totaltimesecs": 48540,
        "totaltime": "13:29:00",
        "authors": [{"id": "69", "first_name": "Arthur Conan", "last_name": "Doyle", "dob": "1859"}],
        "genres": [{"id": "29", "name": "Detective Fiction"}],
        "sections": [{
            "id": "1", "section_number": 1, "title": "A Scandal in Bohemia",
            "listen_url": "https://archive.org/a.mp3", "playtime": "3852",
            "readers": [{"reader_id": 1, "display_name": "Ruth Golding"}, {"reader_id": "2", "display_name": "Mark"}]
        }],
        "coverart_thumbnail": "https://archive.org/thumb.jpg"
    }"#;

    // When: Decoding
    let book: Audiobook = serde_json::from_str(json).unwrap();

    // Then: Everything is a string and helpers work
    assert_eq!(book.id, "52");
    assert_eq!(book.description, "");
    assert_eq!(book.num_sections, "12");
    assert_eq!(book.totaltimesecs, "48540");
    assert_eq!(book.author_names(), "Arthur Conan Doyle");
    assert_eq!(book.sections()[0].section_number, "1");
    assert_eq!(book.sections()[0].reader_names(), "Ruth Golding, Mark");
    assert_eq!(book.cover_url(), Some("https://archive.org/thumb.jpg"));
}

/// WHAT: Missing optional collections decode as empty
/// WHY: Non-extended feed queries omit sections and may null out lists
#[test]
#[allow(clippy::unwrap_used)]
fn given_sparse_record_when_decoding_then_defaults_applied() {
    let book: Audiobook = serde_json::from_str(r#"{"id": "7", "authors": null}"#).unwrap();

    assert!(book.authors.is_empty());
    assert!(book.sections().is_empty());
    assert_eq!(book.cover_url(), None);
}

/// WHAT: Cover falls back from thumbnail to full jpg
/// WHY: Thumbnails are missing for many older books
#[test]
fn given_only_full_cover_when_choosing_cover_then_jpg_used() {
    let book = Audiobook {
        coverart_thumbnail: Some(String::new()),
        coverart_jpg: Some("https://archive.org/full.jpg".to_string()),
        ..Audiobook::default()
    };

    assert_eq!(book.cover_url(), Some("https://archive.org/full.jpg"));
}

/// WHAT: Listing without books decodes to an empty list
/// WHY: Empty upstream pages must not be treated as malformed
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_listing_when_decoding_then_no_books() {
    let listing: AudiobookListing = serde_json::from_str("{}").unwrap();
    assert!(listing.books.is_empty());
}
