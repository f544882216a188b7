use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use ocshub_api::config::ServerConfig;
use ocshub_api::router::build_app_router;
use ocshub_api::state::AppState;
use ocshub_core::prefs::MemoryPrefs;
use ocshub_core::sanitize::HtmlSanitizer;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        ocs_website: "ocshub".to_string(),
        ocs_contact: "admin@example.org".to_string(),
    }
}

/// Preference fixtures shared by the privatedata tests.
pub fn seeded_prefs() -> MemoryPrefs {
    let mut prefs = MemoryPrefs::new();
    prefs.set("alice", "files", "sort", "name");
    prefs.set("alice", "files", "view", "list");
    prefs.set("alice", "calendar", "timezone", "UTC");
    prefs
}

/// Build the full application router with all middleware layers.
///
/// Goes through `build_app_router` so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        prefs: Arc::new(seeded_prefs()),
        sanitizer: Arc::new(HtmlSanitizer),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The response's Content-Type header as text.
pub fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .expect("response must carry a content type")
        .to_str()
        .unwrap()
        .to_owned()
}
