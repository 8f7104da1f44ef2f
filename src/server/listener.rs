use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::config::{Config, Limits};
use crate::http::connection::Connection;
use crate::server::dispatcher::Dispatcher;
use crate::storage::FileStore;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.server.listen_addr))?;
    info!(
        "Listening on {} (root {}, max {} connections)",
        cfg.server.listen_addr,
        cfg.storage.root_dir.display(),
        cfg.server.max_connections
    );

    let dispatcher = Arc::new(Dispatcher::new(FileStore::new(cfg.storage.root_dir.clone())));

    serve(listener, dispatcher, cfg.limits(), cfg.server.max_connections).await
}

/// Accepts connections forever, one task per connection.
///
/// The loop never waits for a worker. Once `max_connections` workers are
/// running, new connections are closed straight away.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    limits: Limits,
    max_connections: usize,
) -> anyhow::Result<()> {
    let permits = Arc::new(Semaphore::new(max_connections));

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "Failed to accept connection");
                // usually fd exhaustion; give workers a moment to finish
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };

        let permit = match Arc::clone(&permits).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!(peer = %peer, max_connections, "At capacity, closing connection");
                drop(socket);
                continue;
            }
        };

        info!("Accepted connection from {}", peer);

        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let conn = Connection::new(socket, peer, dispatcher, limits);
            conn.run().await;
            drop(permit);
        });
    }
}
