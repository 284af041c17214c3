//! Campaign Archive Server
//!
//! HTTP service that stores and retrieves characters, lore, and timeline
//! events for a tabletop campaign, persisting each record kind to a flat
//! JSON document on local disk.

mod handlers;

use anyhow::{Context, Result};
use archive_core::{FileStorage, RecordStore};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Starting Campaign Archive Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    // Load configuration
    let config = load_config()
        .await
        .context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, data_dir={}",
        config.bind_address,
        config.data_dir.display()
    );

    // Initialize the record store over flat-file storage
    let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
    let store = Arc::new(RecordStore::new(storage));
    info!("Record store initialized");

    let state = AppState { store };
    let app = router(state);

    // Start server
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/character", post(handlers::characters::save))
        .route("/character/:name", get(handlers::characters::get))
        .route("/characters", get(handlers::characters::list))
        .route(
            "/lore",
            get(handlers::lore::list).post(handlers::lore::save),
        )
        .route("/lore/:topic", get(handlers::lore::get))
        .route(
            "/timeline",
            get(handlers::timeline::list).post(handlers::timeline::save),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    data_dir: PathBuf,
}

async fn load_config() -> Result<Config> {
    let data_dir = std::env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./storage"));

    // Ensure storage folder exists
    if let Err(e) = tokio::fs::create_dir_all(&data_dir).await {
        return Err(anyhow::anyhow!(
            "Failed to create data directory {}: {}",
            data_dir.display(),
            e
        ));
    }

    if let Err(e) = tokio::fs::metadata(&data_dir).await {
        warn!("Cannot stat data directory: {}", e);
    }

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    Ok(Config {
        bind_address,
        data_dir,
    })
}

#[cfg(test)]
pub fn test_state() -> AppState {
    use archive_core::MemoryStorage;

    AppState {
        store: Arc::new(RecordStore::new(Arc::new(MemoryStorage::new()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_character_over_http() {
        let app = router(test_state());

        let response = app
            .oneshot(post_json(
                "/character",
                json!({"name": "Aria", "race": "Elf", "class_type": "Mage"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Character saved.");
    }

    #[tokio::test]
    async fn test_get_character_path_param_is_case_insensitive() {
        let app = router(test_state());

        app.clone()
            .oneshot(post_json(
                "/character",
                json!({"name": "Aria", "race": "Elf", "class_type": "Mage"}),
            ))
            .await
            .unwrap();

        let response = app.oneshot(get("/character/aria")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Aria");
        assert_eq!(body["race"], "Elf");
    }

    #[tokio::test]
    async fn test_missing_character_is_404_with_detail_body() {
        let app = router(test_state());

        let response = app.oneshot(get("/character/Nyx")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["detail"], "Character 'Nyx' not found");
    }

    #[tokio::test]
    async fn test_timeline_listed_sorted_over_http() {
        let app = router(test_state());

        for (date, event) in [("2024-03-01", "Siege begins"), ("2024-01-15", "Gates fall")] {
            let response = app
                .clone()
                .oneshot(post_json("/timeline", json!({"date": date, "event": event})))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app.oneshot(get("/timeline")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["date"], "2024-01-15");
        assert_eq!(body[1]["date"], "2024-03-01");
    }

    // File-backed round trip; handler behavior is covered in the handlers
    // modules and archive-core.
    #[tokio::test]
    async fn test_file_backed_state_serves_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileStorage::new(dir.path()));
        let state = AppState {
            store: Arc::new(RecordStore::new(storage)),
        };

        state
            .store
            .upsert_character(archive_core::Character {
                name: "Aria".to_string(),
                race: "Elf".to_string(),
                class_type: "Mage".to_string(),
                backstory: None,
            })
            .await
            .unwrap();

        let app = router(state);
        let response = app.oneshot(get("/character/ARIA")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert!(dir.path().join("characters.json").exists());
    }
}
