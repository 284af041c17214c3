//! Timeline handlers

use crate::handlers::{error_reply, ErrorReply, MessageResponse};
use crate::AppState;
use axum::{extract::State, Json};
use archive_core::TimelineEvent;

pub async fn save(
    State(state): State<AppState>,
    Json(event): Json<TimelineEvent>,
) -> Result<Json<MessageResponse>, ErrorReply> {
    match state.store.add_event(event).await {
        Ok(()) => Ok(Json(MessageResponse {
            message: "Event saved.".to_string(),
        })),
        Err(e) => Err(error_reply(e)),
    }
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimelineEvent>>, ErrorReply> {
    match state.store.list_events().await {
        Ok(events) => Ok(Json(events)),
        Err(e) => Err(error_reply(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;

    fn event(date: &str, what: &str) -> TimelineEvent {
        TimelineEvent {
            date: date.to_string(),
            event: what.to_string(),
        }
    }

    #[tokio::test]
    async fn test_events_listed_sorted_by_date() {
        let state = test_state();
        save(State(state.clone()), Json(event("2024-03-01", "Siege begins")))
            .await
            .unwrap();
        save(State(state.clone()), Json(event("2024-01-15", "Gates fall")))
            .await
            .unwrap();

        let reply = list(State(state)).await.unwrap();
        assert_eq!(reply.0.len(), 2);
        assert_eq!(reply.0[0].date, "2024-01-15");
    }
}
