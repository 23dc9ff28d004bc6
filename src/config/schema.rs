//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the firewall gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewallConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream the gateway forwards surviving requests to.
    pub upstream: UpstreamConfig,

    /// Firewall behavior: evaluator endpoint, budget, trusted proxies.
    pub firewall: FirewallConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream authority (e.g., "127.0.0.1:3000").
    pub address: String,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Firewall configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FirewallConfig {
    /// Enable the firewall. When false every request passes through.
    pub enabled: bool,

    /// Evaluator endpoint receiving the argument tuple.
    pub evaluator_url: String,

    /// Evaluation budget in milliseconds; 0 waits without a deadline.
    pub timeout_ms: u64,

    /// Comma-separated trusted proxy patterns. The TRUSTED_PROXY_RANGES
    /// environment variable overrides this value when set.
    pub trusted_proxies: String,
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            evaluator_url: "http://127.0.0.1:9440/evaluate".to_string(),
            timeout_ms: 500,
            trusted_proxies: String::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = GatewallConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.firewall.enabled);
        assert_eq!(config.firewall.timeout_ms, 500);
        assert!(config.firewall.trusted_proxies.is_empty());
    }

    #[test]
    fn minimal_toml_fills_defaults() {
        let config: GatewallConfig = toml::from_str(
            r#"
            [firewall]
            evaluator_url = "http://10.0.0.8:9440/evaluate"
            trusted_proxies = "10\\..*, 192\\.168\\..*"
            "#,
        )
        .unwrap();

        assert_eq!(config.firewall.evaluator_url, "http://10.0.0.8:9440/evaluate");
        assert_eq!(config.firewall.trusted_proxies, "10\\..*, 192\\.168\\..*");
        assert_eq!(config.firewall.timeout_ms, 500);
        assert_eq!(config.upstream.address, "127.0.0.1:3000");
    }
}
