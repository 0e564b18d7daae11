//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the upstream base URL
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("upstream.base_url '{0}' is not a valid URL: {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("upstream.base_url '{0}' must use http or https")]
    BaseUrlScheme(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("cors.allow_origin must not be empty")]
    EmptyAllowOrigin,

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Check everything, collect everything.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::BaseUrlScheme(
                config.upstream.base_url.clone(),
            ));
        }
        Ok(_) => {}
        Err(e) => {
            errors.push(ValidationError::InvalidBaseUrl(
                config.upstream.base_url.clone(),
                e,
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.cors.allow_origin.is_empty() {
        errors.push(ValidationError::EmptyAllowOrigin);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.upstream.base_url = "ftp://opendata.cwa.gov.tw".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::InvalidBindAddress(_)));
        assert!(matches!(errors[1], ValidationError::BaseUrlScheme(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = ProxyConfig::default();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::ZeroRequestTimeout)));
    }

    #[test]
    fn metrics_address_checked_only_when_enabled() {
        let mut config = ProxyConfig::default();
        config.observability.metrics_address = "bogus".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
