use crate::{Audiobook, AudiobookListing, Catalog, CatalogError, CoreResult, SearchQuery};

use std::{panic::Location, time::Duration};

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URL, static key and HTTP client shared by everything that talks to
/// the catalog proxy.
#[derive(Debug, Clone)]
pub struct ProxyConnection {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl ProxyConnection {
    /// Connect to the proxy functions rooted at `base_url`.
    ///
    /// `anon_key` is sent as a bearer token on every request.
    #[track_caller]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> CoreResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(CatalogError::InvalidUrl {
                reason: "URL cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl {
                reason: "URL must start with http:// or https://".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(format!("audiobook-core/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            anon_key: anon_key.into(),
        })
    }

    /// Normalised base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn post(&self, function: &str) -> RequestBuilder {
        self.http
            .post(format!("{}/{}", self.base_url, function))
            .bearer_auth(&self.anon_key)
    }

    /// Turn a non-success response into [`CatalogError::Status`], keeping
    /// the proxy's `error` message when it sent one.
    #[track_caller]
    pub(crate) fn status_error(status: StatusCode, body: &str) -> CatalogError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| status.to_string());

        CatalogError::Status {
            status: status.as_u16(),
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn decode<T: for<'de> Deserialize<'de>>(body: &str) -> CoreResult<T> {
        serde_json::from_str(body).map_err(|e| CatalogError::Decode {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct GetAudiobookRequest<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct GetAudiobookResponse {
    book: Option<Audiobook>,
}

/// Live catalog backed by the `search-audiobooks` and `get-audiobook`
/// proxy functions.
#[derive(Debug, Clone)]
pub struct ProxyCatalog {
    connection: ProxyConnection,
}

impl ProxyCatalog {
    /// Catalog client for the proxy at `base_url`.
    #[track_caller]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> CoreResult<Self> {
        Ok(Self::from_connection(ProxyConnection::new(
            base_url, anon_key,
        )?))
    }

    /// Catalog client sharing an existing connection.
    pub fn from_connection(connection: ProxyConnection) -> Self {
        Self { connection }
    }

    async fn read(response: Response) -> CoreResult<(StatusCode, String)> {
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl Catalog for ProxyCatalog {
    #[instrument(skip(self), fields(query = %query.query))]
    async fn search(&self, query: &SearchQuery) -> CoreResult<Vec<Audiobook>> {
        let request = SearchQuery {
            query: query.query.trim().to_string(),
            ..query.clone()
        };

        let response = self
            .connection
            .post("search-audiobooks")
            .json(&request)
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Search request rejected");
            return Err(ProxyConnection::status_error(status, &body));
        }

        let listing: AudiobookListing = ProxyConnection::decode(&body)?;
        debug!(result_count = listing.books.len(), "Search complete");

        Ok(listing.books)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> CoreResult<Option<Audiobook>> {
        let response = self
            .connection
            .post("get-audiobook")
            .json(&GetAudiobookRequest { id })
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;

        if status == StatusCode::NOT_FOUND {
            debug!("Audiobook not found");
            return Ok(None);
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "Audiobook request rejected");
            return Err(ProxyConnection::status_error(status, &body));
        }

        let response: GetAudiobookResponse = ProxyConnection::decode(&body)?;
        Ok(response.book)
    }
}
