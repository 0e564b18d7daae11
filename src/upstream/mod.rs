//! Outbound CWA API subsystem.
//!
//! # Data Flow
//! ```text
//! (dataset id, pass-through params)
//!     → client.rs (URL build with encoded path segment + query pairs)
//!     → one authenticated GET, body read fully as text
//!     → outcome.rs (classify: payload | api error | malformed body)
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound call per invocation: no retries, no backoff
//! - The body is read as text before any JSON parse so a non-JSON reply
//!   still yields a diagnostic snippet instead of a lost error
//! - The three reply shapes are a tagged enum, not ad hoc field checks

pub mod client;
pub mod outcome;

pub use client::UpstreamClient;
pub use outcome::UpstreamOutcome;
