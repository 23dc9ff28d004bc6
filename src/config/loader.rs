//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewallConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the configured trusted proxy patterns.
pub const TRUSTED_PROXIES_ENV_VAR: &str = "TRUSTED_PROXY_RANGES";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load, override, and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewallConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config: GatewallConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides. Also used on the default-config path so
/// TRUSTED_PROXY_RANGES works without a config file.
pub fn apply_env_overrides(config: &mut GatewallConfig) {
    apply_trusted_proxies_override(config, std::env::var(TRUSTED_PROXIES_ENV_VAR).ok());
}

fn apply_trusted_proxies_override(config: &mut GatewallConfig, raw: Option<String>) {
    if let Some(raw) = raw {
        tracing::info!("Trusted proxy patterns taken from {}", TRUSTED_PROXIES_ENV_VAR);
        config.firewall.trusted_proxies = raw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_replaces_configured_patterns() {
        let mut config = GatewallConfig::default();
        config.firewall.trusted_proxies = "10\\..*".to_string();

        apply_trusted_proxies_override(&mut config, Some("172\\..*".to_string()));
        assert_eq!(config.firewall.trusted_proxies, "172\\..*");

        apply_trusted_proxies_override(&mut config, None);
        assert_eq!(config.firewall.trusted_proxies, "172\\..*");
    }
}
