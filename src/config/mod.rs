//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → GatewallConfig (validated, immutable)
//!     → shared by value/Arc to all subsystems
//!
//! On reload signal:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new TrustRegistry published via arc-swap
//!     → request tasks observe the new registry
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the trusted-proxy registry hot-swaps; listener and upstream
//!   changes take effect on restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError, TRUSTED_PROXIES_ENV_VAR};
pub use schema::{FirewallConfig, GatewallConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};
