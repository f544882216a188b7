use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use ocshub_core::envelope::{Envelope, STATUSCODE_BAD_REQUEST};
use ocshub_core::error::CoreError;
use ocshub_core::render::{xml, Format};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the legacy wire answer for each
/// kind. Envelope-bearing answers ride on HTTP 200 because OCS v1 clients
/// read the envelope's own statuscode, not the transport status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ocshub-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // A missing required parameter answers with the canonical
            // fail/400 envelope. This one is rendered in XML no matter
            // which format the request asked for.
            AppError::Core(CoreError::MissingParameter { key }) => {
                let envelope = Envelope::fail(
                    STATUSCODE_BAD_REQUEST,
                    format!("Bad request. Please provide a valid {key}"),
                );
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, Format::Xml.content_type())],
                    xml::render(&envelope),
                )
                    .into_response()
            }

            // Verbs outside GET/POST/PUT never reach the envelope
            // machinery; the answer is the bare legacy line.
            AppError::Core(CoreError::UnsupportedMethod { method }) => {
                tracing::warn!(%method, "Unsupported HTTP method");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error: method not supported",
                )
                    .into_response()
            }

            // The partial document is discarded; the cause is logged and
            // never leaks to the client.
            AppError::Core(CoreError::Render(err)) => {
                tracing::error!(error = %err, "Response serialization failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
