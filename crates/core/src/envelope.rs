//! The uniform response wrapper shared by every OCS answer.
//!
//! An [`Envelope`] is constructed once per request, is immutable after
//! construction, and is serialized exactly once by one of the renderers
//! in [`crate::render`].

use crate::payload::Payload;

// ---------------------------------------------------------------------------
// Status codes
// ---------------------------------------------------------------------------

// `statuscode` is application-defined and is not an HTTP status. These are
// the values the wire protocol has always used.

/// Successful call.
pub const STATUSCODE_OK: i32 = 100;

/// A required parameter was missing from the request.
pub const STATUSCODE_BAD_REQUEST: i32 = 400;

/// No API route matched the request.
pub const STATUSCODE_NOT_FOUND: i32 = 999;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Request outcome as reported inside the envelope.
///
/// The legacy wire format distinguishes `fail` (the request itself was
/// unusable, e.g. a missing parameter) from `failed` (the API could not
/// satisfy the request, e.g. no route matched); both spellings are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
    Failed,
}

impl Status {
    /// The exact text written into `<status>` / `"status"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Fail => "fail",
            Status::Failed => "failed",
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Status, statuscode, message, optional paging counters, and the payload.
///
/// The paging counters are omitted from XML while `None` but always appear
/// in JSON (as `""` when unset); the asymmetry is part of the wire contract
/// and is preserved deliberately.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: Status,
    pub statuscode: i32,
    /// Human-readable; empty on success.
    pub message: String,
    pub total_items: Option<u64>,
    pub items_per_page: Option<u64>,
    pub payload: Payload,
}

impl Envelope {
    /// A successful envelope: status `ok`, statuscode 100, empty message.
    pub fn ok(payload: Payload) -> Self {
        Envelope {
            status: Status::Ok,
            statuscode: STATUSCODE_OK,
            message: String::new(),
            total_items: None,
            items_per_page: None,
            payload,
        }
    }

    /// A `fail` envelope with an empty payload.
    pub fn fail(statuscode: i32, message: impl Into<String>) -> Self {
        Envelope {
            status: Status::Fail,
            statuscode,
            message: message.into(),
            total_items: None,
            items_per_page: None,
            payload: Payload::empty(),
        }
    }

    /// A `failed` envelope with an empty payload.
    pub fn failed(statuscode: i32, message: impl Into<String>) -> Self {
        Envelope {
            status: Status::Failed,
            statuscode,
            message: message.into(),
            total_items: None,
            items_per_page: None,
            payload: Payload::empty(),
        }
    }

    pub fn with_statuscode(mut self, statuscode: i32) -> Self {
        self.statuscode = statuscode;
        self
    }

    pub fn with_total_items(mut self, count: u64) -> Self {
        self.total_items = Some(count);
        self
    }

    pub fn with_items_per_page(mut self, count: u64) -> Self {
        self.items_per_page = Some(count);
        self
    }
}
