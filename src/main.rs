//! Serves static files over HTTP.
//!
//! Files are served from the current directory unless `--root` says
//! otherwise. The server listens on port 8080 of all interfaces by default.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fileserve::config::Config;
use fileserve::server;

#[derive(Debug, Parser)]
#[command(version, about = "Serve static files using HTTP")]
struct Args {
    /// Set the port number of the HTTP server.
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory to serve files from.
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(short, long, env = "FILESERVE_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of connections handled at once.
    #[arg(long)]
    max_connections: Option<usize>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = Config::load(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(port) = self.port {
            cfg.set_port(port);
        }
        if let Some(root) = self.root {
            cfg.static_files.root = root;
        }
        if self.max_connections.is_some() {
            cfg.server.max_connections = self.max_connections;
        }

        cfg.validate().context("Invalid configuration")?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Args::parse().into_config()?;

    tracing::info!(
        listen = %cfg.server.listen_addr,
        root = %cfg.static_files.root.display(),
        "Starting HTTP server"
    );

    tokio::select! {
        res = server::run(&cfg) => {
            res.context("HTTP server error")?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Stopping HTTP server");
    Ok(())
}
