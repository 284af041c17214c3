//! Character handlers

use crate::handlers::{error_reply, ErrorReply, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use archive_core::Character;

pub async fn save(
    State(state): State<AppState>,
    Json(character): Json<Character>,
) -> Result<Json<MessageResponse>, ErrorReply> {
    match state.store.upsert_character(character).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Character saved.".to_string(),
        })),
        Err(e) => Err(error_reply(e)),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Character>, ErrorReply> {
    match state.store.get_character(&name).await {
        Ok(character) => Ok(Json(character)),
        Err(e) => Err(error_reply(e)),
    }
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<Character>>, ErrorReply> {
    match state.store.list_characters().await {
        Ok(characters) => Ok(Json(characters)),
        Err(e) => Err(error_reply(e)),
    }
}
