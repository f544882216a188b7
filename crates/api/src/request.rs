//! Conversion from an axum request into the core's request context.
//!
//! Everything the OCS layer may read is decoded here, once, at the
//! boundary; handlers and the fallback only ever see the immutable
//! [`OcsRequest`].

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, Method};

use ocshub_core::request::{parse_form, OcsRequest, ParamMap};

use crate::error::{AppError, AppResult};

/// Largest request body the adapter will buffer. Form payloads are tiny;
/// anything bigger is not an OCS request.
const BODY_LIMIT: usize = 1024 * 1024;

/// Decode an inbound request into an [`OcsRequest`].
///
/// The query string is always decoded. Body parameters are decoded for a
/// POST that declares itself form-encoded, and unconditionally for a PUT:
/// PUT bodies are not picked up by any parameter store on their own, so
/// they are form-decoded eagerly here, before any read runs.
pub async fn read_request(request: Request) -> AppResult<OcsRequest> {
    let (parts, body) = request.into_parts();

    let query = parse_form(parts.uri.query().unwrap_or_default());

    let body_params = if reads_form_body(&parts) {
        let bytes = axum::body::to_bytes(body, BODY_LIMIT)
            .await
            .map_err(|err| AppError::Internal(format!("failed to read request body: {err}")))?;
        parse_form(&String::from_utf8_lossy(&bytes))
    } else {
        ParamMap::new()
    };

    Ok(OcsRequest::new(
        parts.method.as_str(),
        parts.uri.to_string(),
        query,
        body_params,
    ))
}

fn reads_form_body(parts: &Parts) -> bool {
    match parts.method {
        Method::PUT => true,
        Method::POST => is_form_encoded(parts),
        _ => false,
    }
}

/// Whether the request declares a form-encoded body.
fn is_form_encoded(parts: &Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}
