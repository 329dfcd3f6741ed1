//! Audiobook Core Library
//!
//! Playback position and seek control over a pluggable audio engine, plus
//! the catalog data model and clients for the audiobook proxy functions.
//!
//! # Example
//!
//! ```no_run
//! use audiobook_core::{Catalog, CoreResult, ProxyCatalog, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let catalog = ProxyCatalog::new("http://localhost:54321", "anon-key")?;
//!
//!     for book in catalog.search(&SearchQuery::new("sherlock")).await? {
//!         println!("{} by {}", book.title, book.author_names());
//!     }
//!     Ok(())
//! }
//! ```

mod catalog;
mod error;
mod playback;
mod search;
mod time_format;
mod transcription;

pub use {
    catalog::{
        Audiobook, AudiobookListing, Author, Catalog, DEFAULT_SEARCH_LIMIT, FixtureCatalog, Genre,
        INITIAL_LISTING_LIMIT, ProxyCatalog, ProxyConnection, Reader, SearchQuery, Section,
    },
    error::{CatalogError, Result as CoreResult},
    playback::{
        PlaybackController, PlaybackSession, PlaybackSource, PlaybackState, Transport,
        TransportStatus,
    },
    search::{DebouncedSearch, SEARCH_DEBOUNCE, SearchState},
    time_format::{ZERO_TIME, format_time},
    transcription::TranscriptionClient,
};

#[cfg(test)]
mod tests;
