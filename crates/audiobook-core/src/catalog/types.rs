//! Audiobook records in the shape served by the LibriVox feed.
//!
//! The feed is loose about types: ids and counters arrive as either strings
//! or numbers, and optional text fields are sometimes `null`. Everything is
//! normalised to strings on the way in.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// A book author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Catalog author ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Given name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    /// Family name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
}

impl Author {
    /// `"First Last"`, skipping whichever part is empty.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A genre tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Catalog genre ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

/// A volunteer reader credited on a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    /// Catalog reader ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub reader_id: String,
    /// Name shown in credits.
    #[serde(default, deserialize_with = "lenient_string")]
    pub display_name: String,
}

/// One playable chapter of a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Catalog section ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Ordinal within the book.
    #[serde(default, deserialize_with = "lenient_string")]
    pub section_number: String,
    /// Chapter title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Streamable audio URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub listen_url: String,
    /// Recording language.
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: String,
    /// Playtime label as published by the catalog.
    #[serde(default, deserialize_with = "lenient_string")]
    pub playtime: String,
    /// Credited readers.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub readers: Vec<Reader>,
}

impl Section {
    /// Reader display names joined with `", "`.
    pub fn reader_names(&self) -> String {
        self.readers
            .iter()
            .map(|r| r.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A catalog audiobook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audiobook {
    /// Catalog book ID.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    /// Title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// Description, may contain HTML.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Link to the source text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_text_source: String,
    /// Language.
    #[serde(default, deserialize_with = "lenient_string")]
    pub language: String,
    /// Copyright year of the source text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub copyright_year: String,
    /// Number of sections.
    #[serde(default, deserialize_with = "lenient_string")]
    pub num_sections: String,
    /// RSS feed URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_rss: String,
    /// Full-book zip URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_zip_file: String,
    /// Project page URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_project: String,
    /// LibriVox catalog page URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_librivox: String,
    /// Internet Archive page URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_iarchive: String,
    /// Any other related URL.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_other: String,
    /// Total running time label, e.g. `"13:29:00"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub totaltime: String,
    /// Total running time in seconds.
    #[serde(default, deserialize_with = "lenient_string")]
    pub totaltimesecs: String,
    /// Authors.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub authors: Vec<Author>,
    /// Genres.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub genres: Vec<Genre>,
    /// Sections, present when the feed was queried with `extended=1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    /// Full-size cover art.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverart_jpg: Option<String>,
    /// Printable cover PDF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverart_pdf: Option<String>,
    /// Thumbnail cover art.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverart_thumbnail: Option<String>,
}

impl Audiobook {
    /// Author full names joined with `", "`.
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(Author::full_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Best cover image for list rows: the thumbnail, else the full jpg.
    pub fn cover_url(&self) -> Option<&str> {
        self.coverart_thumbnail
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.coverart_jpg.as_deref().filter(|url| !url.is_empty()))
    }

    /// Sections, empty when the record was fetched without them.
    pub fn sections(&self) -> &[Section] {
        self.sections.as_deref().unwrap_or_default()
    }
}

/// A page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudiobookListing {
    /// Matching books.
    #[serde(default, deserialize_with = "lenient_vec")]
    pub books: Vec<Audiobook>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
