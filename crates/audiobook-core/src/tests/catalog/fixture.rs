use crate::{Catalog, FixtureCatalog, SearchQuery};

/// WHAT: Blank query returns the whole listing
/// WHY: Matches the default listing shown before typing
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_blank_query_when_searching_fixture_then_all_books_returned() {
    let catalog = FixtureCatalog::sample();

    let books = catalog.search(&SearchQuery::new("   ")).await.unwrap();

    assert_eq!(books.len(), 3);
}

/// WHAT: Query matches title, author and genre case-insensitively
/// WHY: Offline search should behave like the live one from the user's view
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_query_when_searching_fixture_then_title_author_and_genre_match() {
    let catalog = FixtureCatalog::sample();

    let by_title = catalog.search(&SearchQuery::new("SHERLOCK")).await.unwrap();
    let by_author = catalog.search(&SearchQuery::new("austen")).await.unwrap();
    let by_genre = catalog.search(&SearchQuery::new("science")).await.unwrap();
    let none = catalog.search(&SearchQuery::new("moby")).await.unwrap();

    assert_eq!(by_title[0].id, "1");
    assert_eq!(by_author[0].id, "2");
    assert_eq!(by_genre[0].id, "3");
    assert!(none.is_empty());
}

/// WHAT: Limit and offset page through the listing
/// WHY: The initial listing uses a smaller page
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_limit_and_offset_when_searching_fixture_then_page_returned() {
    let catalog = FixtureCatalog::sample();
    let query = SearchQuery {
        query: String::new(),
        limit: 1,
        offset: 1,
    };

    let books = catalog.search(&query).await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "2");
}

/// WHAT: Lookup by id finds the book or returns None
/// WHY: Unknown ids drive the not-found screen
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_id_when_looking_up_fixture_then_book_or_none() {
    let catalog = FixtureCatalog::sample();

    let found = catalog.get_by_id(" 3 ").await.unwrap();
    let missing = catalog.get_by_id("99").await.unwrap();

    assert_eq!(
        found.map(|b| b.sections()[0].listen_url.clone()),
        Some("https://example.com/audio/3-1.mp3".to_string())
    );
    assert!(missing.is_none());
}
