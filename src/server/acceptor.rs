use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::middleware::logging::{log_connection, log_rejection, log_session_end};
use crate::registry::PlayerRegistry;
use crate::session::handle_session;

const ACCEPT_BACKOFF_START: Duration = Duration::from_millis(10);
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

pub struct Server {
    listener: TcpListener,
    registry: Arc<PlayerRegistry>,
    config: Arc<ServerConfig>,
    capacity: Option<Arc<Semaphore>>,
}

impl Server {
    /// Binds the lobby listener. Any failure here is fatal to the process.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = config
            .listen_socket()
            .ok_or_else(|| ServerError::InvalidBindAddress(config.bind_address.clone()))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindFailed(addr, e))?;
        info!("Server bound to {}", listener.local_addr()?);

        let capacity = config
            .session_limit()
            .map(|limit| Arc::new(Semaphore::new(limit)));

        Ok(Self {
            listener,
            registry: Arc::new(PlayerRegistry::new(config.name_reuse)),
            config: Arc::new(config),
            capacity,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Shared handle to the player registry served by this listener.
    pub fn registry(&self) -> Arc<PlayerRegistry> {
        Arc::clone(&self.registry)
    }

    /// Accepts connections forever, one task per client.
    pub async fn run(self) {
        match self.config.session_limit() {
            Some(limit) => info!("Server up and running (max {} sessions)", limit),
            None => info!("Server up and running"),
        }
        info!("Name reuse policy: {}", self.config.name_reuse);

        let mut failures: u32 = 0;
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    failures = 0;
                    self.admit(stream, addr);
                }
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let delay = accept_backoff(failures);
                    error!("Error accepting connection: {} (retrying in {:?})", e, delay);
                    // Errors like EMFILE repeat until a descriptor frees up
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn admit(&self, stream: TcpStream, addr: SocketAddr) {
        let permit = match self.reserve_slot() {
            Ok(permit) => permit,
            Err(limit) => {
                log_rejection(&addr, limit);
                drop(stream);
                return;
            }
        };

        log_connection(&addr);
        let registry = Arc::clone(&self.registry);
        let config = Arc::clone(&self.config);

        // Spawn a task for each client so accept loop doesn't block
        tokio::spawn(async move {
            let result = handle_session(stream, addr, registry, config).await;
            log_session_end(&addr, &result);
            drop(permit);
        });
    }

    /// Takes a session slot, or returns the configured limit when none is left.
    fn reserve_slot(&self) -> Result<Option<OwnedSemaphorePermit>, usize> {
        match &self.capacity {
            None => Ok(None),
            Some(capacity) => Arc::clone(capacity)
                .try_acquire_owned()
                .map(Some)
                .map_err(|_| self.config.max_sessions),
        }
    }
}

/// Delay before the next accept after `failures` consecutive errors.
fn accept_backoff(failures: u32) -> Duration {
    let shift = failures.saturating_sub(1).min(16);
    ACCEPT_BACKOFF_START
        .saturating_mul(1 << shift)
        .min(ACCEPT_BACKOFF_MAX)
}
