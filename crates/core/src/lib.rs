//! OCS (Open Collaboration Services) response-serialization and
//! request-decoding core.
//!
//! Everything in this crate is pure, synchronous, and request-local: the
//! envelope/payload data model, the XML and JSON renderers, parameter
//! extraction with legacy coercion semantics, the diagnostic dump, and the
//! collaborator contracts (sanitizer, preference store). No HTTP framework
//! types appear here so the whole layer can be tested in isolation.

pub mod debug;
pub mod envelope;
pub mod error;
pub mod params;
pub mod payload;
pub mod prefs;
pub mod render;
pub mod request;
pub mod sanitize;
