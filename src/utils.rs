//! Helpers for verbose request/response logging
//!
//! Header masking keeps credentials out of logs; body truncation keeps large
//! order payloads from flooding them without splitting a UTF-8 character.

use reqwest::header::HeaderMap;

/// Placeholder written in place of a sensitive header value
pub const REDACTED: &str = "**Redacted**";

/// Header names whose values never reach the logs (lowercase)
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "paypal-auth-assertion",
];

/// Default maximum number of body bytes written to a log line
pub const MAX_LOGGED_BODY_BYTES: usize = 4096;

/// Whether a header name is in [`SENSITIVE_HEADERS`]
#[must_use]
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| sensitive.eq_ignore_ascii_case(name))
}

/// Render headers as `name: value` pairs for logging.
///
/// With `mask` set, sensitive values are replaced by [`REDACTED`]. Values
/// that are not valid visible ASCII are shown as `<binary>`.
#[must_use]
pub fn format_headers(headers: &HeaderMap, mask: bool) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| {
            let shown = if mask && is_sensitive_header(name.as_str()) {
                REDACTED
            } else {
                value.to_str().unwrap_or("<binary>")
            };
            format!("{}: {shown}", name.as_str())
        })
        .collect()
}

/// Cut a string to at most `max_bytes`, backing off to a character boundary.
#[inline]
#[must_use]
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut boundary = max_bytes;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &s[..boundary]
}

/// Truncate a body for a log line, appending `...` when something was cut.
///
/// ```
/// use paypal_agent_toolkit::utils::truncate_for_display;
///
/// assert_eq!(truncate_for_display(r#"{"id":"5O190127TN364715T"}"#, 10), r#"{"id":"5O1..."#);
/// ```
#[must_use]
pub fn truncate_for_display(s: &str, max_bytes: usize) -> String {
    let truncated = safe_truncate(s, max_bytes);
    if truncated.len() < s.len() {
        format!("{truncated}...")
    } else {
        truncated.to_string()
    }
}
