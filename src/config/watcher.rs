//! Configuration file watcher for trust registry hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::GatewallConfig;
use crate::trust::registry::{SharedTrustRegistry, TrustRegistry};

/// Monitors the configuration file and emits reloaded configs.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<GatewallConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GatewallConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for events to flow. A
    /// reload that fails to load or validate keeps the running state.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match load_config(&path) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Consume reloaded configs, rebuilding and publishing the trust
/// registry. Only the trusted-proxy patterns hot-swap; other settings
/// wait for a restart.
pub fn spawn_registry_reload(
    registry: SharedTrustRegistry,
    mut updates: mpsc::UnboundedReceiver<GatewallConfig>,
) {
    tokio::spawn(async move {
        while let Some(config) = updates.recv().await {
            let rebuilt = TrustRegistry::from_patterns(&config.firewall.trusted_proxies);
            tracing::info!(patterns = rebuilt.len(), "Trusted proxy registry reloaded");
            registry.store(Arc::new(rebuilt));
        }
    });
}
