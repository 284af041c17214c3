//! HTTP handlers

pub mod characters;
pub mod health;
pub mod lore;
pub mod timeline;

pub use health::{health, root};

use archive_core::ArchiveError;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Confirmation body for writes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body; `detail` carries the store's message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Map a store error onto an HTTP reply: failed lookups become 404 with the
/// store's message, storage faults become an opaque 500.
pub fn error_reply(err: ArchiveError) -> ErrorReply {
    if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                detail: err.to_string(),
            }),
        )
    } else {
        tracing::error!("Storage fault: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: "Storage failure".to_string(),
            }),
        )
    }
}
