//! The OCS wire response: a rendered envelope plus its content type.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use ocshub_core::envelope::Envelope;
use ocshub_core::render::{self, Format};

use crate::error::AppError;

/// A fully-assembled OCS answer: the envelope and the format that will
/// carry it. The HTTP status is always 200; OCS v1 reports success and
/// failure inside the envelope.
#[derive(Debug)]
pub struct OcsResponse {
    pub format: Format,
    pub envelope: Envelope,
}

impl OcsResponse {
    pub fn new(format: Format, envelope: Envelope) -> Self {
        OcsResponse { format, envelope }
    }
}

impl IntoResponse for OcsResponse {
    fn into_response(self) -> Response {
        match render::render(self.format, &self.envelope) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, self.format.content_type())],
                body,
            )
                .into_response(),
            Err(err) => AppError::from(err).into_response(),
        }
    }
}
