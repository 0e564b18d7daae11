//! Error taxonomy for the proxy.
//!
//! Four categories, all terminal for the invocation and all surfaced to the
//! caller as structured JSON (see `http::response`):
//! - client input error: missing `datasetId`, answered locally with 400;
//! - upstream malformed body: not valid JSON, answered 500 with a snippet;
//! - upstream application error: valid JSON, non-2xx status, forwarded;
//! - infrastructure error: anything below, answered as a generic 500.
//!
//! The first category and the last are modeled here; the middle two are not
//! errors in the Rust sense but ordinary [`upstream::UpstreamOutcome`]
//! variants, since the upstream reply was received and classified.
//!
//! [`upstream::UpstreamOutcome`]: crate::upstream::UpstreamOutcome

use thiserror::Error;

/// Failures the handler converts into JSON error envelopes.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The one required query parameter is absent or empty. No outbound call
    /// is made for these.
    #[error("Missing datasetId in query parameters.")]
    MissingDatasetId,

    /// The outbound call failed before a full response body was read
    /// (connect failure, reset, inbound body read error).
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    /// The configured base URL did not parse.
    #[error("{0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. a
    /// cannot-be-a-base URL). Config validation rejects these up front, so
    /// this is unreachable in a validated deployment.
    #[error("upstream base URL cannot hold path segments")]
    BaseUrlNotABase,
}
