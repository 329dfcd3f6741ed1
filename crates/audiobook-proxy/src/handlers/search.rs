use crate::{ApiError, AppState, ProxyError};

use audiobook_core::{AudiobookListing, SearchQuery};

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

/// Body of `POST /search-audiobooks`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    offset: Option<u32>,
}

impl SearchRequest {
    fn into_query(self, default_limit: u32) -> SearchQuery {
        SearchQuery {
            query: self.query.unwrap_or_default().trim().to_string(),
            limit: self.limit.unwrap_or(default_limit),
            offset: self.offset.unwrap_or(0),
        }
    }
}

/// Title search against the catalog.
///
/// Failures answer with `books: []` so clients can always read the field.
#[instrument(skip(state, payload), fields(request_id = %Uuid::new_v4()))]
pub(crate) async fn search_audiobooks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<AudiobookListing>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::books(ProxyError::from(e)))?;
    let query = request.into_query(state.default_limit);

    let books = state
        .catalog
        .search(&query)
        .await
        .map_err(ApiError::books)?;

    info!(query = %query.query, count = books.len(), "Search complete");
    Ok(Json(AudiobookListing { books }))
}
