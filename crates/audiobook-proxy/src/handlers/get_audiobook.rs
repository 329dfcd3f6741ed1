use crate::{ApiError, AppState, ProxyError};

use audiobook_core::Audiobook;

use std::{panic::Location, sync::Arc};

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

/// Body of `POST /get-audiobook`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GetAudiobookRequest {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookResponse {
    book: Audiobook,
}

/// Single book lookup by LibriVox id.
#[instrument(skip(state, payload), fields(request_id = %Uuid::new_v4()))]
pub(crate) async fn get_audiobook(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GetAudiobookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::plain(ProxyError::from(e)))?;

    let id = request
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ApiError::plain(ProxyError::BadRequest {
                reason: "A valid Book ID is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        })?;

    let book = state
        .catalog
        .get_by_id(id)
        .await
        .map_err(ApiError::book)?
        .ok_or_else(|| {
            ApiError::book(ProxyError::NotFound {
                reason: "Book not found with the provided ID".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        })?;

    info!(id = %book.id, title = %book.title, "Audiobook found");
    Ok(Json(BookResponse { book }))
}
