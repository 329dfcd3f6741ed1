use crate::{Audiobook, CoreResult};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Page size used when the caller does not choose one.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Page size for the listing shown before the user types anything.
pub const INITIAL_LISTING_LIMIT: u32 = 20;

/// A title search. An empty `query` asks for the default listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Title text; trimmed before use.
    #[serde(default)]
    pub query: String,
    /// Maximum number of books.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Number of books to skip.
    #[serde(default)]
    pub offset: u32,
}

impl SearchQuery {
    /// Search for `query` with the default page.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }

    /// The short listing shown before any search text is entered.
    pub fn initial_listing() -> Self {
        Self {
            query: String::new(),
            limit: INITIAL_LISTING_LIMIT,
            offset: 0,
        }
    }

    /// Trimmed query text, `None` when blank.
    pub fn title_filter(&self) -> Option<&str> {
        Some(self.query.trim()).filter(|q| !q.is_empty())
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("")
    }
}

fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

/// Read-only access to an audiobook catalog.
///
/// Implemented by the local [`FixtureCatalog`](crate::FixtureCatalog) and by
/// the live [`ProxyCatalog`](crate::ProxyCatalog), so screens can switch data
/// sources without changing.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Books matching `query`.
    async fn search(&self, query: &SearchQuery) -> CoreResult<Vec<Audiobook>>;

    /// The book with `id`, or `None` when the catalog has no such book.
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Audiobook>>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
    async fn search(&self, query: &SearchQuery) -> CoreResult<Vec<Audiobook>> {
        (**self).search(query).await
    }

    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Audiobook>> {
        (**self).get_by_id(id).await
    }
}
