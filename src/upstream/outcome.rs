//! Classification of the upstream reply.

use axum::http::StatusCode;
use serde_json::Value;

/// How many characters of a non-JSON body survive into the error envelope.
pub const SNIPPET_CHARS: usize = 200;

/// The three shapes an upstream reply can take once the body has been read.
///
/// Network failures never reach this type; they surface earlier as
/// [`ProxyError::Upstream`](crate::error::ProxyError).
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamOutcome {
    /// 2xx status and a JSON body. Forwarded verbatim as 200.
    Payload(Value),

    /// Non-2xx status but still a JSON body. The upstream's own status code
    /// is forwarded together with its parsed body.
    ApiError { status: StatusCode, body: Value },

    /// The body was not valid JSON, whatever the status said. Reported as
    /// 500 with a truncated snippet for diagnosis.
    Malformed { message: String, snippet: String },
}

impl UpstreamOutcome {
    /// Classify a fully-read upstream reply.
    pub fn classify(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) if status.is_success() => UpstreamOutcome::Payload(value),
            Ok(value) => UpstreamOutcome::ApiError {
                status,
                body: value,
            },
            Err(e) => UpstreamOutcome::Malformed {
                // Only the parser's own message, never a raw backtrace.
                message: format!("Failed to parse CWA response as JSON: {e}"),
                // chars, not bytes: a multi-byte body must not be split
                // mid-codepoint.
                snippet: body.chars().take(SNIPPET_CHARS).collect(),
            },
        }
    }

    /// Human-readable message for an API error body: the upstream's own
    /// top-level `message` when it is a string, else a fixed fallback.
    pub fn api_error_message(body: &Value) -> &str {
        body.get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
    }

    /// Low-cardinality label for metrics.
    pub fn metrics_label(&self) -> &'static str {
        match self {
            UpstreamOutcome::Payload(_) => "success",
            UpstreamOutcome::ApiError { .. } => "api_error",
            UpstreamOutcome::Malformed { .. } => "malformed",
        }
    }
}
