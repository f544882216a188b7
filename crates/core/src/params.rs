//! Parameter extraction with the legacy coercion contract.
//!
//! `read` pulls one named value out of the request's parameter sets,
//! applies the requested scalar coercion, and enforces presence. The
//! numeric coercions keep the historical truncating-cast behavior: they
//! parse the longest leading numeric prefix and degrade to zero instead
//! of failing, because existing clients rely on that.

use crate::error::CoreError;
use crate::request::{OcsRequest, ParamMap};
use crate::sanitize::Sanitize;

// ---------------------------------------------------------------------------
// Read descriptors
// ---------------------------------------------------------------------------

/// Which parameter set a read consults: the query string for GET, the
/// form body for POST and PUT (a PUT body has already been form-decoded
/// by the transport adapter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Get,
    Post,
    Put,
}

impl ParamSource {
    /// Map an HTTP verb onto its parameter source.
    ///
    /// Verbs outside {GET, POST, PUT} have no parameter source; requests
    /// using them never reach the envelope machinery.
    pub fn from_method(method: &str) -> Result<Self, CoreError> {
        match method {
            "GET" => Ok(ParamSource::Get),
            "POST" => Ok(ParamSource::Post),
            "PUT" => Ok(ParamSource::Put),
            other => Err(CoreError::UnsupportedMethod {
                method: other.to_owned(),
            }),
        }
    }
}

/// Requested scalar coercion.
///
/// `Raw` passes the value through unsanitized; that is as risky as it
/// sounds and exists for callers that do their own escaping. `Text` and
/// `Array` route through the sanitizer collaborator; `Int` and `Float`
/// never fail (see module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Raw,
    Text,
    Int,
    Float,
    Array,
}

/// A coerced parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value as request text: the string itself, the canonical
    /// rendering of a number, or a comma-joined list.
    pub fn into_text(self) -> String {
        match self {
            ParamValue::Text(text) => text,
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Float(n) => n.to_string(),
            ParamValue::List(values) => values.join(","),
        }
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Reads single parameters out of an [`OcsRequest`].
///
/// Constructed per call site from the request context and the sanitizer
/// collaborator; holds no state of its own.
pub struct ParamReader<'a> {
    request: &'a OcsRequest,
    sanitizer: &'a dyn Sanitize,
}

impl<'a> ParamReader<'a> {
    pub fn new(request: &'a OcsRequest, sanitizer: &'a dyn Sanitize) -> Self {
        ParamReader { request, sanitizer }
    }

    /// Read one parameter.
    ///
    /// - Missing with a default (an empty string counts): the default is
    ///   returned verbatim, uncoerced and unsanitized.
    /// - Missing without a default: [`CoreError::MissingParameter`]; the
    ///   caller answers with the canonical `fail`/400 envelope and stops
    ///   processing the request.
    /// - Present: coerced per `ty`. Scalar coercions read the last stored
    ///   value of a repeated key; `Array` reads them all.
    pub fn read(
        &self,
        source: ParamSource,
        key: &str,
        ty: ParamType,
        default: Option<&str>,
    ) -> Result<ParamValue, CoreError> {
        let values = match self.store(source).get(key) {
            Some(values) if !values.is_empty() => values,
            _ => {
                return match default {
                    Some(default) => Ok(ParamValue::Text(default.to_owned())),
                    None => Err(CoreError::MissingParameter {
                        key: key.to_owned(),
                    }),
                };
            }
        };

        let last = values.last().map(String::as_str).unwrap_or_default();

        Ok(match ty {
            ParamType::Raw => ParamValue::Text(last.to_owned()),
            ParamType::Text => ParamValue::Text(self.sanitizer.sanitize(last)),
            ParamType::Int => ParamValue::Int(coerce_int(last)),
            ParamType::Float => ParamValue::Float(coerce_float(last)),
            ParamType::Array => ParamValue::List(self.sanitizer.sanitize_all(values)),
        })
    }

    /// Convenience for the common case: a `Text` read yielding a `String`.
    pub fn read_text(
        &self,
        source: ParamSource,
        key: &str,
        default: Option<&str>,
    ) -> Result<String, CoreError> {
        self.read(source, key, ParamType::Text, default)
            .map(ParamValue::into_text)
    }

    fn store(&self, source: ParamSource) -> &ParamMap {
        match source {
            ParamSource::Get => &self.request.query,
            ParamSource::Post | ParamSource::Put => &self.request.body,
        }
    }
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Truncating integer cast: optional leading whitespace and sign, then
/// the longest digit run. Anything else is 0; overflow saturates.
fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut i = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return 0;
    }

    match s[..i].parse::<i64>() {
        Ok(value) => value,
        Err(_) if s.starts_with('-') => i64::MIN,
        Err(_) => i64::MAX,
    }
}

/// Truncating float cast: the longest leading prefix that reads as a
/// float (sign, digits, fraction, exponent). Anything else is 0.0.
fn coerce_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let end = float_prefix_len(s);
    if end == 0 {
        return 0.0;
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Length of the longest prefix of `s` that parses as a float.
fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));

    let mut digits_before = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits_before += 1;
    }
    let mut end = if digits_before > 0 { i } else { 0 };

    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        let mut digits_after = 0;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            digits_after += 1;
        }
        if digits_before > 0 || digits_after > 0 {
            end = j;
            i = j;
        }
    }

    if end > 0 && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    end
}
