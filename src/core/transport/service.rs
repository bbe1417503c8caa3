//! Transport service - starts the configured transport.
//!
//! Starting binds the listener before returning, so callers can rely on the
//! device being reachable once [`TransportService::start`] completes.

use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tracing::info;

use super::http::HttpTransport;
use super::{TransportConfig, TransportError, TransportResult};
use crate::core::DeviceServer;

/// Transport service - manages the transport layer for the device server.
pub struct TransportService {
    config: TransportConfig,
}

/// A transport that is bound and serving in the background.
pub struct RunningTransport {
    local_addr: SocketAddr,
    handle: JoinHandle<TransportResult<()>>,
}

impl RunningTransport {
    pub(crate) fn new(local_addr: SocketAddr, handle: JoinHandle<TransportResult<()>>) -> Self {
        Self { local_addr, handle }
    }

    /// The address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait until the transport stops.
    pub async fn wait(self) -> TransportResult<()> {
        self.handle
            .await
            .map_err(|e| TransportError::TaskError(e.to_string()))?
    }

    /// Stop serving.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Bind the transport and start serving in the background.
    pub async fn start(self, server: DeviceServer) -> TransportResult<RunningTransport> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).start(server).await,
        }
    }
}
