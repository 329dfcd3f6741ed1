use crate::ProxyError;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::{error, warn};

/// Extra fields an endpoint includes alongside `error` on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    /// `{ "error", "books": [] }`
    Books,
    /// `{ "error", "book": null }`
    Book,
    /// `{ "error" }`
    Plain,
}

/// A [`ProxyError`] bound to the response shape of the endpoint that hit it.
#[derive(Debug)]
pub struct ApiError {
    error: ProxyError,
    shape: ErrorShape,
}

impl ApiError {
    pub(crate) fn books(error: ProxyError) -> Self {
        Self {
            error,
            shape: ErrorShape::Books,
        }
    }

    pub(crate) fn book(error: ProxyError) -> Self {
        Self {
            error,
            shape: ErrorShape::Book,
        }
    }

    pub(crate) fn plain(error: ProxyError) -> Self {
        Self {
            error,
            shape: ErrorShape::Plain,
        }
    }

    pub(crate) fn body(&self) -> Value {
        let message = self.error.client_message();
        match self.shape {
            ErrorShape::Books => json!({ "error": message, "books": [] }),
            ErrorShape::Book => json!({ "error": message, "book": null }),
            ErrorShape::Plain => json!({ "error": message }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        // Full error (with location) goes to the log, never to the client.
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self.error, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self.error, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}
