use crate::{ProxyError, ProxyResult, config::CatalogConfig, upstream::build_http_client};

use audiobook_core::{Audiobook, AudiobookListing, SearchQuery};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

/// Client for the LibriVox audiobook feed.
///
/// Every request asks for JSON with extended metadata and cover art.
#[derive(Debug, Clone)]
pub struct LibriVoxClient {
    http: Client,
    base_url: String,
}

impl LibriVoxClient {
    /// Build a client for the configured feed endpoint.
    #[track_caller]
    pub fn new(config: &CatalogConfig) -> ProxyResult<Self> {
        Ok(Self {
            http: build_http_client(config.timeout_secs)?,
            base_url: config.base_url.trim().to_string(),
        })
    }

    /// Title search. A blank query lists the catalog unfiltered.
    #[instrument(skip(self, query), fields(query = %query.query, limit = query.limit, offset = query.offset))]
    pub async fn search(&self, query: &SearchQuery) -> ProxyResult<Vec<Audiobook>> {
        let mut params = Self::base_params();
        params.push(("limit", query.limit.to_string()));
        params.push(("offset", query.offset.to_string()));
        if let Some(title) = query.title_filter() {
            params.push(("title", title.to_string()));
        }

        self.fetch(&params).await
    }

    /// Fetch a single audiobook. `Ok(None)` when LibriVox has no match.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> ProxyResult<Option<Audiobook>> {
        let mut params = vec![("id", id.to_string())];
        params.extend(Self::base_params());

        let books = self.fetch(&params).await?;
        Ok(books.into_iter().next())
    }

    fn base_params() -> Vec<(&'static str, String)> {
        vec![
            ("format", "json".to_string()),
            ("extended", "1".to_string()),
            ("coverart", "1".to_string()),
        ]
    }

    #[track_caller]
    fn decode_error(reason: String) -> ProxyError {
        ProxyError::UpstreamDecode {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    async fn fetch(&self, params: &[(&'static str, String)]) -> ProxyResult<Vec<Audiobook>> {
        let response = self.http.get(&self.base_url).query(params).send().await?;
        let status = response.status();

        // LibriVox answers 404 when a filter matches nothing.
        if status == StatusCode::NOT_FOUND {
            debug!("LibriVox reported no matches");
            return Ok(Vec::new());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "LibriVox request failed");
            return Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body = response.text().await?;
        let listing: AudiobookListing = serde_json::from_str(&body)
            .map_err(|e| Self::decode_error(format!("Failed to parse LibriVox listing: {e}")))?;

        debug!(count = listing.books.len(), "LibriVox listing received");
        Ok(listing.books)
    }
}
