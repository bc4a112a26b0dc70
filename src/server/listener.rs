use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::connection::Connection;
use crate::resolver::{FsResolver, Resolve};
use crate::server::limiter::ConnectionLimiter;

/// Binds the configured address and serves files from the configured root.
///
/// Only returns on a bind failure.
pub async fn run(cfg: &Config) -> Result<()> {
    let addr = &cfg.server.listen_addr;
    let listener = TcpListener::bind(addr.as_str()).await.map_err(|source| Error::Bind {
        addr: addr.clone(),
        source,
    })?;
    info!("HTTP server running on {}", addr);

    let resolver = Arc::new(FsResolver::new(cfg.static_files.root.clone()));
    let limiter = ConnectionLimiter::from_config(cfg.server.max_connections)?;

    serve(listener, resolver, limiter, cfg.server.read_buffer_size).await
}

/// Accepts connections forever, spawning one task per connection.
///
/// A failed accept is logged and skipped.
pub async fn serve<R: Resolve>(
    listener: TcpListener,
    resolver: Arc<R>,
    limiter: ConnectionLimiter,
    read_buffer_size: usize,
) -> Result<()> {
    loop {
        let permit = limiter.acquire().await;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "Connection creation error");
                continue;
            }
        };
        info!("Opened TCP connection to {}", peer);

        let resolver = resolver.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let mut conn = Connection::new(socket, resolver, read_buffer_size);
            match conn.run().await {
                Ok(()) => {}
                Err(e) if e.is_protocol() => {
                    warn!("Error getting HTTP request from {}: {}", peer, e);
                }
                Err(e) => {
                    error!("Connection error from {}: {}", peer, e);
                }
            }
        });
    }
}
