use crate::{Audiobook, Author, Catalog, CoreResult, Genre, SearchQuery, Section};

use async_trait::async_trait;
use tracing::debug;

/// In-memory catalog for offline development and tests.
///
/// Matches the trimmed, lowercased query against titles, author names and
/// genre names.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    books: Vec<Audiobook>,
}

impl FixtureCatalog {
    /// Catalog over an explicit set of books.
    pub fn new(books: Vec<Audiobook>) -> Self {
        Self { books }
    }

    /// Catalog seeded with a handful of public-domain titles.
    pub fn sample() -> Self {
        Self::new(vec![
            book(
                "1",
                "The Adventures of Sherlock Holmes",
                ("Arthur Conan", "Doyle"),
                "A collection of twelve Sherlock Holmes short stories featuring the famed detective and his companion Dr. Watson.",
                &["Mystery", "Detective Fiction"],
                "13:29:00",
                "https://placehold.co/200x300?text=Sherlock",
                &[
                    ("1-1", "A Scandal in Bohemia", "01:04:12"),
                    ("1-2", "The Red-Headed League", "00:58:47"),
                ],
            ),
            book(
                "2",
                "Pride and Prejudice",
                ("Jane", "Austen"),
                "A romantic novel that charts the emotional development of Elizabeth Bennet as she learns the error of making hasty judgments.",
                &["Romance", "Classic"],
                "18:30:15",
                "https://placehold.co/200x300?text=P%20%26%20P",
                &[
                    ("2-1", "Chapter 1", "00:23:05"),
                    ("2-2", "Chapter 2", "00:21:54"),
                ],
            ),
            book(
                "3",
                "War of the Worlds",
                ("H. G.", "Wells"),
                "An early science fiction novel describing a Martian invasion of Earth, exploring themes of imperialism and human resilience.",
                &["Science Fiction", "Adventure"],
                "06:35:40",
                "https://placehold.co/200x300?text=War%20of%20the%20Worlds",
                &[
                    ("3-1", "Book 1, Chapter 1", "00:19:11"),
                    ("3-2", "Book 1, Chapter 2", "00:17:26"),
                ],
            ),
        ])
    }

    fn matches(book: &Audiobook, needle: &str) -> bool {
        book.title.to_lowercase().contains(needle)
            || book
                .authors
                .iter()
                .any(|a| a.full_name().to_lowercase().contains(needle))
            || book
                .genres
                .iter()
                .any(|g| g.name.to_lowercase().contains(needle))
    }
}

#[async_trait]
impl Catalog for FixtureCatalog {
    async fn search(&self, query: &SearchQuery) -> CoreResult<Vec<Audiobook>> {
        let needle = query.title_filter().map(str::to_lowercase);

        let books: Vec<Audiobook> = self
            .books
            .iter()
            .filter(|book| needle.as_deref().is_none_or(|n| Self::matches(book, n)))
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        debug!(query = %query.query, result_count = books.len(), "Fixture search");

        Ok(books)
    }

    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Audiobook>> {
        let id = id.trim();
        Ok(self.books.iter().find(|book| book.id == id).cloned())
    }
}

#[allow(clippy::too_many_arguments)]
fn book(
    id: &str,
    title: &str,
    (first_name, last_name): (&str, &str),
    description: &str,
    genres: &[&str],
    totaltime: &str,
    cover_url: &str,
    sections: &[(&str, &str, &str)],
) -> Audiobook {
    Audiobook {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        language: "English".to_string(),
        num_sections: sections.len().to_string(),
        totaltime: totaltime.to_string(),
        authors: vec![Author {
            id: format!("author-{id}"),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }],
        genres: genres
            .iter()
            .enumerate()
            .map(|(i, name)| Genre {
                id: format!("{id}-genre-{}", i + 1),
                name: (*name).to_string(),
            })
            .collect(),
        sections: Some(
            sections
                .iter()
                .enumerate()
                .map(|(i, (section_id, section_title, playtime))| Section {
                    id: (*section_id).to_string(),
                    section_number: (i + 1).to_string(),
                    title: (*section_title).to_string(),
                    listen_url: format!("https://example.com/audio/{section_id}.mp3"),
                    language: "English".to_string(),
                    playtime: (*playtime).to_string(),
                    readers: Vec::new(),
                })
                .collect(),
        ),
        coverart_jpg: Some(cover_url.to_string()),
        ..Audiobook::default()
    }
}
