//! TCP Server
//!
//! Accepts connections and hands each one to its own handler thread.

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::service::Service;
use crate::store::KeyValueStore;

use super::Connection;

/// Pause after a failed accept so a persistent error (e.g. EMFILE) does not spin
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP server for QuickDB
pub struct Server<S> {
    config: Config,
    listener: TcpListener,
    service: Arc<S>,
}

impl<S: Service + 'static> Server<S> {
    /// Bind the configured listen address
    pub fn bind(config: Config, service: Arc<S>) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr)?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        Ok(Self {
            config,
            listener,
            service,
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever
    ///
    /// Handlers are detached: the loop never waits on them and places no
    /// cap on how many run at once. Accept failures are logged and skipped.
    pub fn run(self) -> Result<()> {
        let config = Arc::new(self.config);

        loop {
            let (stream, addr) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::error!("Failed to accept connection: {}", e);
                    thread::sleep(ACCEPT_ERROR_BACKOFF);
                    continue;
                }
            };

            let service = Arc::clone(&self.service);
            let config = Arc::clone(&config);

            let spawned = thread::Builder::new()
                .name(format!("quickdb-conn-{}", addr))
                .spawn(move || {
                    let connection = match Connection::from_tcp(stream, service, &config) {
                        Ok(connection) => connection,
                        Err(e) => {
                            tracing::warn!("Failed to set up connection from {}: {}", addr, e);
                            return;
                        }
                    };
                    if let Err(e) = connection.handle() {
                        tracing::debug!("Connection from {} closed with error: {}", addr, e);
                    }
                });

            if let Err(e) = spawned {
                tracing::error!("Failed to spawn handler for {}: {}", addr, e);
            }
        }
    }
}

/// Run a server on `port` backed by a fresh in-memory store
///
/// `port` is a bare port string such as `"8080"`; all interfaces are bound.
pub fn start_server(port: &str) -> Result<()> {
    let config = Config::with_port(port)?;
    let store = Arc::new(KeyValueStore::from_config(&config));
    Server::bind(config, store)?.run()
}
