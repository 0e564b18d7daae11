//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, query split)
//!     → request.rs (request ID)
//!     → [upstream client performs the one outbound call]
//!     → response.rs (JSON envelope, CORS on every branch)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
