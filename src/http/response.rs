//! Response construction.
//!
//! # Responsibilities
//! - Serialize every outcome as a JSON body
//! - Stamp `Content-Type: application/json` and
//!   `Access-Control-Allow-Origin` on every branch, error paths included
//! - Answer CORS preflight
//!
//! All handler branches funnel through [`proxy_json`] or [`error_envelope`],
//! so no code path can produce a response without the CORS header or with a
//! non-JSON body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// A JSON response with the CORS header attached.
///
/// `Json` sets `Content-Type: application/json`; the tuple's header array is
/// applied on top of it.
pub fn proxy_json(status: StatusCode, allow_origin: &str, body: Value) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin)],
        Json(body),
    )
        .into_response()
}

/// The plain error envelope: `{"error": <message>}`.
pub fn error_envelope(status: StatusCode, allow_origin: &str, message: &str) -> Response {
    proxy_json(status, allow_origin, json!({ "error": message }))
}

/// CORS preflight answer. Only GET ever reaches upstream, so the allowed
/// surface is fixed.
pub fn preflight(allow_origin: &str) -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type"),
        ],
    )
        .into_response()
}
