//! Lore handlers

use crate::handlers::{error_reply, ErrorReply, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use archive_core::Lore;

pub async fn save(
    State(state): State<AppState>,
    Json(lore): Json<Lore>,
) -> Result<Json<MessageResponse>, ErrorReply> {
    match state.store.upsert_lore(lore).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Lore saved.".to_string(),
        })),
        Err(e) => Err(error_reply(e)),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<Lore>, ErrorReply> {
    match state.store.get_lore(&topic).await {
        Ok(lore) => Ok(Json(lore)),
        Err(e) => Err(error_reply(e)),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Lore>>, ErrorReply> {
    match state.store.list_lore().await {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => Err(error_reply(e)),
    }
}
