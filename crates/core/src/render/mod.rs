//! Wire rendering: one envelope in, one complete document out.
//!
//! Clients pick the format with `?format=json`; anything else (including
//! no parameter at all) means XML. The choice is resolved once at the
//! boundary into a [`Format`], and the two renderers never see the raw
//! parameter again.
//!
//! The full document is assembled in memory before being handed to the
//! transport; nothing is streamed mid-construction.

pub mod json;
pub mod xml;

use crate::envelope::Envelope;
use crate::error::CoreError;

/// The two OCS wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Xml,
    Json,
}

impl Format {
    /// Resolve the `format` request parameter. Exactly `json` selects
    /// JSON; every other value falls back to XML.
    pub fn from_param(value: &str) -> Self {
        if value == "json" {
            Format::Json
        } else {
            Format::Xml
        }
    }

    /// The Content-Type header value for documents in this format.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Xml => "text/xml; charset=utf-8",
            Format::Json => "application/json",
        }
    }
}

/// Render an envelope in the requested format.
pub fn render(format: Format, envelope: &Envelope) -> Result<String, CoreError> {
    match format {
        Format::Xml => Ok(xml::render(envelope)),
        Format::Json => json::render(envelope),
    }
}
