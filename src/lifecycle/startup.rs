//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Start the config watcher (optional)
//! - Bind the listener and begin serving
//!
//! # Design Decisions
//! - Fail fast: an invalid config at startup is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{load_config, ConfigWatcher};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// Path to the YAML configuration file.
    pub config_path: PathBuf,
    /// Overrides `server.bind_address` when set.
    pub bind_address: Option<String>,
    /// Reload the configuration when the file changes.
    pub watch: bool,
}

/// Start the server and run until a termination signal arrives.
pub async fn run(options: StartupOptions) -> anyhow::Result<()> {
    let loaded = load_config(&options.config_path).with_context(|| {
        format!("failed to load configuration from {}", options.config_path.display())
    })?;

    let mut settings = loaded.server;
    if let Some(bind_address) = options.bind_address {
        settings.bind_address = bind_address;
    }

    logging::init_logging(&settings.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "vanity-server starting");
    tracing::info!(
        config = %options.config_path.display(),
        bind_address = %settings.bind_address,
        host = loaded.handler.host().unwrap_or("<request host>"),
        cache_control = loaded.handler.cache_control(),
        vanity_paths = loaded.handler.paths().len(),
        "Configuration loaded"
    );

    if settings.metrics_enabled {
        let addr: SocketAddr = settings
            .metrics_address
            .parse()
            .with_context(|| format!("invalid metrics address {}", settings.metrics_address))?;
        metrics::init_metrics(addr).context("failed to start metrics endpoint")?;
    }

    // Held for the lifetime of the server; dropping it stops the watch.
    let (_watcher, config_updates) = if options.watch {
        let (watcher, updates) = ConfigWatcher::new(&options.config_path);
        let watcher = watcher.run().context("failed to watch configuration file")?;
        (Some(watcher), updates)
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (None, updates)
    };

    let listener = TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_address))?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(loaded.handler, settings);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
