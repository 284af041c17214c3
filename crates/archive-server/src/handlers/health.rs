//! Liveness handlers

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Campaign archive is alive.".to_string(),
    })
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}
