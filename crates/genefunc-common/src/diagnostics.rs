//! Helpers for opt-in diagnostic dumps of upstream HTTP payloads.
//!
//! Raw bodies can be large and headers can carry credentials, so callers are
//! expected to gate these behind an explicit flag. Nothing here logs on its
//! own; the functions only prepare strings for a `debug!` call.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Default number of characters kept by [`preview`].
pub const DEFAULT_PREVIEW_CHARS: usize = 2048;

/// Header names whose values are never written to logs.
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
];

const REDACTED: &str = "<redacted>";

/// Truncate `body` to at most `max_chars` characters, noting how much was cut.
pub fn preview(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        None => body.to_string(),
        Some((cut, _)) => {
            let omitted = body[cut..].chars().count();
            format!("{}... ({} more chars)", &body[..cut], omitted)
        },
    }
}

/// Base64 copy of a payload, handy when a body contains control characters
/// that mangle log lines.
pub fn base64_copy(body: &[u8]) -> String {
    STANDARD.encode(body)
}

/// Render headers as `name: value` pairs with sensitive values masked.
pub fn redact_headers<I, K, V>(headers: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    headers
        .into_iter()
        .map(|(name, value)| {
            let name = name.as_ref().to_ascii_lowercase();
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                REDACTED.to_string()
            } else {
                value.as_ref().to_string()
            };
            (name, value)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_body_untouched() {
        assert_eq!(preview("{\"results\":[]}", 64), "{\"results\":[]}");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let body = "αβγδε";
        assert_eq!(preview(body, 2), "αβ... (3 more chars)");
    }

    #[test]
    fn test_base64_copy() {
        assert_eq!(base64_copy(b"TP53"), "VFA1Mw==");
    }

    #[test]
    fn test_redact_headers() {
        let headers = vec![
            ("Content-Type", "application/json"),
            ("Set-Cookie", "session=abc"),
            ("X-API-Key", "secret"),
        ];

        let rendered = redact_headers(headers);

        assert_eq!(
            rendered,
            vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("set-cookie".to_string(), "<redacted>".to_string()),
                ("x-api-key".to_string(), "<redacted>".to_string()),
            ]
        );
    }
}
