//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the evaluator endpoint
//! - Return all errors, not just the first
//!
//! # Design Decisions
//! - Validation is a pure function: GatewallConfig → Result<(), Vec<ValidationError>>
//! - Trusted proxy patterns are NOT validated here; a malformed pattern
//!   is skipped with a warning at registry build time, never fatal

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::uri::Authority;
use url::Url;

use crate::config::schema::GatewallConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the loaded configuration.
pub fn validate_config(config: &GatewallConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            message: format!("not a socket address: {:?}", config.listener.bind_address),
        });
    }

    if Authority::from_str(&config.upstream.address).is_err() {
        errors.push(ValidationError {
            field: "upstream.address",
            message: format!("not a host:port authority: {:?}", config.upstream.address),
        });
    }

    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "upstream.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.firewall.enabled {
        if let Err(e) = Url::parse(&config.firewall.evaluator_url) {
            errors.push(ValidationError {
                field: "firewall.evaluator_url",
                message: format!("{e}: {:?}", config.firewall.evaluator_url),
            });
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: format!(
                "not a socket address: {:?}",
                config.observability.metrics_address
            ),
        });
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
        assert!(validate_config(&GatewallConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = GatewallConfig::default();
        config.listener.bind_address = "nope".to_string();
        config.upstream.address = String::new();
        config.firewall.evaluator_url = "not a url".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn evaluator_url_ignored_when_firewall_disabled() {
        let mut config = GatewallConfig::default();
        config.firewall.enabled = false;
        config.firewall.evaluator_url = "not a url".to_string();

        assert!(validate_config(&config).is_ok());
    }
}
