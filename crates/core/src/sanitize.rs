//! The HTML-sanitizer collaborator contract.
//!
//! Sanitizing is not this layer's business; the `text` / `array` parameter
//! coercions merely route values through whatever implementation the host
//! application provides. [`HtmlSanitizer`] is the stock implementation:
//! plain entity escaping, applied before a value is ever displayed.

/// Narrow contract: sanitize a string, or a list of strings, preserving
/// the shape of the input.
pub trait Sanitize: Send + Sync {
    fn sanitize(&self, value: &str) -> String;

    fn sanitize_all(&self, values: &[String]) -> Vec<String> {
        values.iter().map(|value| self.sanitize(value)).collect()
    }
}

/// HTML-entity escaping of `& < > " '`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl Sanitize for HtmlSanitizer {
    fn sanitize(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#039;"),
                other => escaped.push(other),
            }
        }
        escaped
    }
}
