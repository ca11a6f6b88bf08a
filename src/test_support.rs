//! Shared fixtures for unit tests: throwaway upstream servers and sample payloads.

use crate::config::Config;
use crate::models::TrackFeatures;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_config() -> Config {
    Config {
        catalog_client_id: "test-id".to_string(),
        catalog_client_secret: "test-secret".to_string(),
        catalog_accounts_url: "http://127.0.0.1:1".to_string(),
        catalog_api_url: "http://127.0.0.1:1".to_string(),
        prediction_url: "http://127.0.0.1:1".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        request_timeout: Duration::from_secs(2),
        cors_origins: vec!["*".to_string()],
    }
}

/// Config pointing at a token endpoint that always issues "fresh-token" and at `api`.
pub async fn catalog_config(api: Router) -> Config {
    let accounts = spawn_upstream(Router::new().route(
        "/api/token",
        post(|| async { Json(json!({ "access_token": "fresh-token", "expires_in": 3600 })) }),
    ))
    .await;

    let mut config = test_config();
    config.catalog_accounts_url = accounts;
    config.catalog_api_url = spawn_upstream(api).await;
    config
}

pub fn sample_features_json() -> Value {
    json!({
        "energy": 0.59,
        "danceability": 0.547,
        "valence": 0.169,
        "tempo": 75.752,
        "acousticness": 0.907,
        "instrumentalness": 0.183,
        "liveness": 0.0935,
        "speechiness": 0.0252,
        "loudness": -12.358,
        "key": 0,
        "mode": 1,
        "id": "7pKfPomDEeI4TPT6EOYjn9",
        "type": "audio_features"
    })
}

pub fn sample_features() -> TrackFeatures {
    serde_json::from_value(sample_features_json()).unwrap()
}

/// One catalog search item in the upstream wire shape
pub fn search_item(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{ "name": "John Lennon" }],
        "album": { "images": [{ "url": format!("https://images.example/{}.jpg", id) }] }
    })
}

/// In-memory sink for formatted log lines of the current thread
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's events here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
