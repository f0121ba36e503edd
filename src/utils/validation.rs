//! Input validation for aliases and destination URLs.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Base an alias is appended to when checking that it forms a valid URI.
const ALIAS_PROBE_BASE: &str = "http://test/";

/// Validates an alias as a single URI path segment.
///
/// # Rules
///
/// - Not empty, not `.` or `..`
/// - No whitespace or control characters
/// - No `/`, `?` or `#`
/// - Every `%` starts a two-digit hex escape
/// - `http://test/<alias>` parses as a URL
///
/// # Errors
///
/// Returns [`AppError::Validation`] with `details.field == "key"`.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    match alias_problem(alias) {
        None => Ok(()),
        Some(reason) => Err(AppError::bad_request(
            format!("key validation error ({reason})"),
            json!({ "field": "key", "reason": reason }),
        )),
    }
}

fn alias_problem(alias: &str) -> Option<String> {
    if alias.is_empty() {
        return Some("key must not be empty".to_string());
    }

    if alias == "." || alias == ".." {
        return Some("dot segments are not allowed".to_string());
    }

    if let Some(c) = alias.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Some(format!("invalid character {c:?} in key"));
    }

    if let Some(c) = alias.chars().find(|c| matches!(c, '/' | '?' | '#')) {
        return Some(format!("reserved character {c:?} in key"));
    }

    if let Some(reason) = percent_escape_problem(alias) {
        return Some(reason);
    }

    Url::parse(&format!("{ALIAS_PROBE_BASE}{alias}"))
        .err()
        .map(|e| e.to_string())
}

fn percent_escape_problem(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                return Some(format!(
                    "invalid URL escape {:?}",
                    String::from_utf8_lossy(&bytes[i..end])
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    None
}

/// Validates a destination as an absolute URL.
///
/// The value is stored verbatim, so inputs the parser would silently trim or
/// escape (surrounding spaces, embedded tabs or newlines) are rejected rather
/// than accepted in altered form.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with `details.field == "url"`.
pub fn validate_destination(destination: &str) -> Result<(), AppError> {
    let problem = if let Some(c) = destination
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        Some(format!("invalid character {c:?} in URL"))
    } else {
        Url::parse(destination).err().map(|e| e.to_string())
    };

    match problem {
        None => Ok(()),
        Some(reason) => Err(AppError::bad_request(
            format!("URL validation error ({reason})"),
            json!({ "field": "url", "reason": reason }),
        )),
    }
}
