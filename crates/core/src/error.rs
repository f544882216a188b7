use thiserror::Error;

/// Error taxonomy of the OCS core.
///
/// There are deliberately few kinds: the layer is a pure request/response
/// transform, so almost every condition is expressed in-band as an envelope
/// rather than as an error value.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required parameter was absent and no default was supplied.
    ///
    /// Recoverable, request-scoped: the caller must answer with the
    /// canonical `fail`/400 envelope and stop processing the request.
    #[error("missing required parameter: {key}")]
    MissingParameter { key: String },

    /// The HTTP verb is outside the set the OCS layer understands
    /// (GET, POST, PUT).
    ///
    /// Fatal for the request: the wire answer is a bare plain-text line,
    /// bypassing the envelope machinery entirely.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    /// The JSON document could not be produced.
    ///
    /// The partially-built buffer is discarded; nothing is ever streamed
    /// mid-construction.
    #[error("response serialization failed: {0}")]
    Render(#[from] serde_json::Error),
}
