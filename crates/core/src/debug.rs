//! Diagnostic dump of a raw request.
//!
//! The block is plain text, never structured data; it is appended as-is
//! to the message field of the not-found envelope so a failed API call
//! can be reconstructed from the response alone.

use crate::request::OcsRequest;

/// Produce the ordered diagnostic block for a request.
///
/// One line for the method, one for the URI, then one line per stored
/// query value and one per stored body value, in multimap iteration
/// order. Repeated keys print one line per stored value.
pub fn debug_output(request: &OcsRequest) -> String {
    let mut txt = String::from("debug output:\n");
    txt.push_str(&format!("http request method: {}\n", request.method));
    txt.push_str(&format!("http request uri: {}\n", request.uri));
    for (key, values) in &request.query {
        for value in values {
            txt.push_str(&format!("get parameter: {key}->{value}\n"));
        }
    }
    for (key, values) in &request.body {
        for value in values {
            txt.push_str(&format!("post parameter: {key}->{value}\n"));
        }
    }
    txt
}
