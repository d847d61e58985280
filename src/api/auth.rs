// =============================================================================
// Webhook Token Authentication
// =============================================================================
//
// The ingest endpoint optionally requires `Authorization: Bearer <token>`.
// The expected token comes from the scanner config (overridable via the
// `MERIDIAN_WEBHOOK_TOKEN` environment variable at startup). When no token
// is configured the endpoint is open, matching the alert sources that cannot
// set custom headers.
//
// Comparison is performed in constant time to prevent timing side-channels.
// =============================================================================

use axum::http::{header, HeaderMap, StatusCode};
use tracing::warn;

// =============================================================================
// Constant-time comparison
// =============================================================================

/// Compare two byte slices in constant time. Returns `true` if they are
/// identical. The comparison always examines every byte of both slices even
/// when a mismatch is found early.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        // A length mismatch already leaks the fact that lengths differ,
        // which is acceptable for token authentication (the caller does not
        // control the expected token length).
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

// =============================================================================
// Webhook guard
// =============================================================================

/// Authorize an ingest request against the configured webhook token.
///
/// `expected == None` means the guard is disabled and every request passes.
/// On failure returns the status code the handler should respond with.
pub fn authorize_webhook(headers: &HeaderMap, expected: Option<&str>) -> Result<(), StatusCode> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(value) if value.starts_with("Bearer ") => &value[7..],
        _ => {
            warn!("webhook rejected: missing or malformed Authorization header");
            return Err(StatusCode::FORBIDDEN);
        }
    };

    if !constant_time_eq(token.as_bytes(), expected.as_bytes()) {
        warn!("webhook rejected: invalid token presented");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn constant_time_eq_identical() {
        assert!(constant_time_eq(b"hello", b"hello"));
    }

    #[test]
    fn constant_time_eq_different() {
        assert!(!constant_time_eq(b"hello", b"world"));
    }

    #[test]
    fn constant_time_eq_different_lengths() {
        assert!(!constant_time_eq(b"short", b"longer_string"));
    }

    #[test]
    fn constant_time_eq_single_bit_diff() {
        assert!(!constant_time_eq(b"\x00", b"\x01"));
    }

    #[test]
    fn guard_open_when_unconfigured() {
        let headers = HeaderMap::new();
        assert!(authorize_webhook(&headers, None).is_ok());
    }

    #[test]
    fn guard_accepts_matching_token() {
        let headers = headers_with_bearer("s3cret");
        assert!(authorize_webhook(&headers, Some("s3cret")).is_ok());
    }

    #[test]
    fn guard_rejects_wrong_token() {
        let headers = headers_with_bearer("wrong");
        assert_eq!(
            authorize_webhook(&headers, Some("s3cret")),
            Err(StatusCode::FORBIDDEN)
        );
    }

    #[test]
    fn guard_rejects_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            authorize_webhook(&headers, Some("s3cret")),
            Err(StatusCode::FORBIDDEN)
        );
    }
}
