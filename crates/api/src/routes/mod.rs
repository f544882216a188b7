//! Route tree for the OCS service.

pub mod config;
pub mod health;
pub mod privatedata;

use axum::Router;

use crate::state::AppState;

/// Build the `/ocs/v1.php` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /config                                    discovery document
/// /privatedata/getattribute                  all apps, all keys
/// /privatedata/getattribute/{app}            one app, all keys
/// /privatedata/getattribute/{app}/{key}      one app, one key
/// ```
///
/// Anything else, under the prefix or not, falls through to the router
/// fallback and gets the canonical not-found envelope.
pub fn ocs_routes() -> Router<AppState> {
    Router::new()
        .merge(config::router())
        .merge(privatedata::router())
}
