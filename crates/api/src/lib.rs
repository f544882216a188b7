//! OCS API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! the not-found fallback) so integration tests and the binary entrypoint
//! can both access them. Everything wire-format-related lives in
//! `ocshub-core`; this crate binds it to HTTP.

pub mod config;
pub mod error;
pub mod fallback;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
