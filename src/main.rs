//! Vanity import path server.
//!
//! # Architecture Overview
//!
//! ```text
//!     vanity.yaml ──▶ config::loader ──▶ routing::inference ──▶ PathConfigSet
//!          │                                                        │
//!          └──▶ config::watcher (--watch) ──▶ ArcSwap<VanityHandler> ◀┘
//!                                                   │
//!     Client Request ──▶ http::server ──▶ http::handler ──▶ http::templates
//!                         (request id,     (lookup, host,     (go-import,
//!                          trace, timeout)  cache header)      go-source)
//! ```

use std::path::PathBuf;

use clap::Parser;

use vanity_server::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "vanity-server", version)]
#[command(about = "Serves vanity import paths for Go packages", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, default_value = "vanity.yaml")]
    config: PathBuf,

    /// Listen address, overrides `server.bind_address`
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the configuration when the file changes
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    startup::run(StartupOptions {
        config_path: cli.config,
        bind_address: cli.bind,
        watch: cli.watch,
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["vanity-server"]);
        assert_eq!(cli.config, PathBuf::from("vanity.yaml"));
        assert!(cli.bind.is_none());
        assert!(!cli.watch);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["vanity-server", "-c", "/etc/vanity.yaml", "--bind", "127.0.0.1:80", "--watch"]);
        assert_eq!(cli.config, PathBuf::from("/etc/vanity.yaml"));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:80"));
        assert!(cli.watch);
    }
}
