use std::sync::Arc;

use ocshub_core::prefs::PreferenceStore;
use ocshub_core::sanitize::Sanitize;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (bind address, CORS, discovery-document fields).
    pub config: Arc<ServerConfig>,
    /// Preference store backing the privatedata routes.
    pub prefs: Arc<dyn PreferenceStore>,
    /// Sanitizer applied by text/array parameter reads.
    pub sanitizer: Arc<dyn Sanitize>,
}
