mod fixture;
mod proxy;
mod source;
mod types;

pub use {
    fixture::FixtureCatalog,
    proxy::{ProxyCatalog, ProxyConnection},
    source::{Catalog, DEFAULT_SEARCH_LIMIT, INITIAL_LISTING_LIMIT, SearchQuery},
    types::{Audiobook, AudiobookListing, Author, Genre, Reader, Section},
};
