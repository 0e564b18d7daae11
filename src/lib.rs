//! CWA Open-Data Proxy
//!
//! A thin forwarding service for the Taiwan Central Weather Administration
//! open-data API. Browsers cannot call the upstream directly: the API key
//! must stay server-side and the upstream does not answer cross-origin
//! requests. This service injects `Authorization: CWA <key>` into one
//! outbound GET per inbound request and stamps permissive CORS headers on
//! every response it produces.
//!
//! # Data Flow
//! ```text
//! GET /?datasetId=F-C0032-001&locationName=...
//!     → http/server.rs (axum setup, request ID, timeout, trace)
//!     → query split: datasetId vs. pass-through params
//!     → upstream/client.rs (URL build, authenticated GET, text-first read)
//!     → upstream/outcome.rs (payload | api error | malformed body)
//!     → http/response.rs (JSON envelope + CORS on every branch)
//!     → Send to client
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod upstream;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
