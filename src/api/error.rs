//! Error classification for ticket API responses.
//!
//! Converts non-success HTTP responses into [`DeskError`] values and decides
//! which failures are worth a retry.

use reqwest::StatusCode;

use crate::error::DeskError;
use crate::types::ErrorPayload;

/// Longest response body excerpt kept in an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Which failures a request may be retried on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Safe to repeat: retry on any transient failure
    Idempotent,
    /// Creates a resource: retry only when the request never reached the server
    ConnectOnly,
}

/// Failures that can be classified for retry decisions
pub trait Retryable {
    /// Whether repeating the request could succeed
    fn is_transient(&self) -> bool;
}

impl Retryable for reqwest::Error {
    fn is_transient(&self) -> bool {
        if let Some(status) = self.status() {
            return status.is_server_error();
        }
        self.is_timeout() || self.is_connect() || self.is_request()
    }
}

impl Retryable for StatusCode {
    fn is_transient(&self) -> bool {
        self.is_server_error() || *self == StatusCode::TOO_MANY_REQUESTS
    }
}

impl RetryPolicy {
    /// Whether a transport error may be retried under this policy
    pub fn allows_error(&self, err: &reqwest::Error) -> bool {
        match self {
            RetryPolicy::Idempotent => err.is_transient(),
            RetryPolicy::ConnectOnly => err.is_connect(),
        }
    }

    /// Whether a response status may be retried under this policy
    pub fn allows_status(&self, status: StatusCode) -> bool {
        match self {
            RetryPolicy::Idempotent => status.is_transient(),
            RetryPolicy::ConnectOnly => false,
        }
    }
}

/// Build the error for a non-success response.
///
/// JSON error bodies (`{"error": ...}` or field maps) are flattened into the
/// message; anything else is kept as a trimmed excerpt.
pub fn status_error(status: StatusCode, body: &str) -> DeskError {
    let detail = match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) if !payload.0.is_empty() => payload.to_string(),
        _ => excerpt(body),
    };
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let message = if detail.is_empty() {
        reason.to_string()
    } else {
        format!("{reason}: {detail}")
    };

    DeskError::Server {
        status: status.as_u16(),
        message,
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_BODY_EXCERPT {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_BODY_EXCERPT).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_with_json_body() {
        let err = status_error(StatusCode::BAD_REQUEST, r#"{"error": "description is required"}"#);
        match err {
            DeskError::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Bad Request: description is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_error_with_html_body_is_truncated() {
        let body = format!("<html>{}</html>", "x".repeat(500));
        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let DeskError::Server { message, .. } = err else {
            panic!("expected server error");
        };
        assert!(message.starts_with("Internal Server Error: <html>"));
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_status_error_with_empty_body() {
        let err = status_error(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "server error (404): Not Found");
    }

    #[test]
    fn test_transient_classification() {
        assert!(StatusCode::BAD_GATEWAY.is_transient());
        assert!(StatusCode::TOO_MANY_REQUESTS.is_transient());
        assert!(!StatusCode::BAD_REQUEST.is_transient());
    }

    #[test]
    fn test_connect_only_policy_never_retries_statuses() {
        assert!(RetryPolicy::Idempotent.allows_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!RetryPolicy::ConnectOnly.allows_status(StatusCode::SERVICE_UNAVAILABLE));
    }
}
