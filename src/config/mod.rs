//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply env overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc to the handler state
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so an empty config (or none at all) runs
//! - The upstream API key comes from the `CWA_API_KEY` environment variable,
//!   overriding whatever the file says, so the secret never has to live on disk
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{CorsConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, UpstreamConfig};
