use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gatewall::config::loader::load_config;
use gatewall::config::watcher::{spawn_registry_reload, ConfigWatcher};
use gatewall::config::GatewallConfig;
use gatewall::http::HttpServer;
use gatewall::observability::logging::init_logging;
use gatewall::observability::metrics::init_metrics;
use gatewall::trust::registry::shared_registry;

/// Web application firewall gateway.
#[derive(Debug, Parser)]
#[command(name = "gatewall", version)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = GatewallConfig::default();
            gatewall::config::loader::apply_env_overrides(&mut config);
            config
        }
    };

    init_logging(&config.observability);

    tracing::info!("gatewall v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        evaluator_url = %config.firewall.evaluator_url,
        timeout_ms = config.firewall.timeout_ms,
        "Configuration loaded"
    );

    // Build and publish the trust registry; request tasks read it
    // lock-free, reloads swap it atomically.
    let registry = shared_registry(&config.firewall.trusted_proxies);

    // Watch the config file so trusted-proxy changes apply without a
    // restart. The watcher handle must stay alive for the process.
    let _watcher = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            spawn_registry_reload(registry.clone(), updates);
            Some(handle)
        }
        None => None,
    };

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(config, registry);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
