//! The explicit, immutable request context the core reads from.
//!
//! The legacy implementation read `$_GET` / `$_POST` / `$_SERVER` style
//! ambient globals from anywhere. Here everything a request carries is
//! decoded once at the transport boundary into an [`OcsRequest`] and passed
//! down; nothing in this crate reads ambient state.

use indexmap::IndexMap;

/// Ordered multimap of decoded parameters.
///
/// Iteration order is first-seen key order; a repeated key keeps every
/// value in arrival order. Scalar lookups take the last value (matching
/// how the legacy parameter stores resolved duplicates).
pub type ParamMap = IndexMap<String, Vec<String>>;

/// One inbound request, as seen by the OCS layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OcsRequest {
    /// The HTTP verb exactly as received, e.g. `GET`.
    pub method: String,
    /// Path and query of the request line. Diagnostics only.
    pub uri: String,
    /// Decoded query-string parameters.
    pub query: ParamMap,
    /// Decoded body parameters: POST form fields, or the eagerly
    /// form-decoded body of a PUT (PUT bodies are not decoded by any
    /// parameter store unless the adapter does it up front).
    pub body: ParamMap,
}

impl OcsRequest {
    pub fn new(
        method: impl Into<String>,
        uri: impl Into<String>,
        query: ParamMap,
        body: ParamMap,
    ) -> Self {
        OcsRequest {
            method: method.into(),
            uri: uri.into(),
            query,
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Form decoding
// ---------------------------------------------------------------------------

/// Decode an `application/x-www-form-urlencoded` string (a query string or
/// a form body) into an ordered multimap.
///
/// `+` decodes to a space, `%XX` to the byte it names (invalid sequences
/// pass through literally), and a pair without `=` becomes a key with an
/// empty value. Invalid UTF-8 is replaced rather than rejected.
pub fn parse_form(input: &str) -> ParamMap {
    let mut params = ParamMap::new();

    for pair in input.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(pair), String::new()),
        };
        params.entry(key).or_default().push(value);
    }

    params
}

/// Percent-decode one key or value.
fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hi = (bytes[i + 1] as char).to_digit(16);
                let lo = (bytes[i + 2] as char).to_digit(16);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_in_order() {
        let params = parse_form("format=json&user=alice");
        let keys: Vec<_> = params.keys().cloned().collect();
        assert_eq!(keys, ["format", "user"]);
        assert_eq!(params["format"], ["json"]);
        assert_eq!(params["user"], ["alice"]);
    }

    #[test]
    fn repeated_keys_keep_every_value() {
        let params = parse_form("tag=a&tag=b&tag=c");
        assert_eq!(params["tag"], ["a", "b", "c"]);
    }

    #[test]
    fn decodes_plus_and_percent_sequences() {
        let params = parse_form("greeting=hello+world&path=%2Ffiles%2Fa%20b");
        assert_eq!(params["greeting"], ["hello world"]);
        assert_eq!(params["path"], ["/files/a b"]);
    }

    #[test]
    fn key_without_equals_gets_empty_value() {
        let params = parse_form("flag&key=value");
        assert_eq!(params["flag"], [""]);
        assert_eq!(params["key"], ["value"]);
    }

    #[test]
    fn invalid_percent_sequence_passes_through() {
        let params = parse_form("k=100%&v=%zz");
        assert_eq!(params["k"], ["100%"]);
        assert_eq!(params["v"], ["%zz"]);
    }

    #[test]
    fn empty_input_yields_no_params() {
        assert!(parse_form("").is_empty());
        assert!(parse_form("&&").is_empty());
    }

    #[test]
    fn decodes_keys_too() {
        let params = parse_form("a+key=1");
        assert_eq!(params["a key"], ["1"]);
    }
}
