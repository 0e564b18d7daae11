//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "CWA_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// `None` starts from defaults, so the proxy runs with no file at all as long
/// as the API key is in the environment.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides. The secret takes precedence over the file so
/// deployments never need to write the key to disk.
pub fn apply_env_overrides(config: &mut ProxyConfig) {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            config.upstream.api_key = key;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env access is process-global, so both cases live in one test to avoid
    // racing a parallel test over the same variable.
    #[test]
    fn env_key_overrides_file_key() {
        let mut config = ProxyConfig::default();
        config.upstream.api_key = "file-key".to_string();

        std::env::remove_var(API_KEY_ENV);
        apply_env_overrides(&mut config);
        assert_eq!(config.upstream.api_key, "file-key");

        std::env::set_var(API_KEY_ENV, "env-key");
        apply_env_overrides(&mut config);
        std::env::remove_var(API_KEY_ENV);
        assert_eq!(config.upstream.api_key, "env-key");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/cwa-proxy.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
