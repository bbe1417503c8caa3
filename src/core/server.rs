//! Device server runtime.
//!
//! The [`DeviceServer`] owns the resource tree and is what the transport
//! dispatches reads to. It also wires the registrar to the tree so that the
//! resources registered with the directory are exactly the ones served.

use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::{
    directory::{
        DirectoryClient, HttpDirectoryClient, Registrar, RegistrationDescriptor,
        RegistrationReport, descriptors_for,
    },
    resources::{ReadPayload, ResourceError, ResourceTree, build_device_tree},
    sensors::{RandomSource, SharedRng},
};

/// The simulated pulse oximeter.
///
/// Cloning is cheap; clones share the same immutable tree.
#[derive(Clone)]
pub struct DeviceServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The resources served by this device.
    tree: Arc<ResourceTree>,
}

impl DeviceServer {
    /// Create a server drawing readings from an entropy-seeded generator.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_source(config, Arc::new(SharedRng::from_entropy()))
    }

    /// Create a server drawing readings from `source`.
    ///
    /// Fails if the resource tree is malformed.
    pub fn with_source(config: Config, source: Arc<dyn RandomSource>) -> Result<Self> {
        let tree = build_device_tree(source)?;
        info!("Resource tree built with {} resource(s)", tree.nodes().len());

        Ok(Self {
            config: Arc::new(config),
            tree: Arc::new(tree),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The resource tree.
    pub fn tree(&self) -> &ResourceTree {
        &self.tree
    }

    /// Read the resource at `path`.
    #[instrument(skip(self))]
    pub fn read(&self, path: &str) -> std::result::Result<ReadPayload, ResourceError> {
        let payload = self.tree.read(path)?;
        info!("Read {} -> {}", path, payload.content);
        Ok(payload)
    }

    /// The device's `/.well-known/core` document.
    pub fn core_listing(&self) -> String {
        self.tree.core_listing()
    }

    /// Descriptors for every resource the device registers.
    pub fn registration_descriptors(&self) -> Vec<RegistrationDescriptor> {
        descriptors_for(&self.tree)
    }

    /// HTTP client for the configured directory.
    ///
    /// Returns `None` when no directory is configured or registration is
    /// disabled.
    pub fn directory_client(&self) -> Result<Option<HttpDirectoryClient>> {
        let directory = &self.config.directory;
        match &directory.base_url {
            Some(url) if directory.register => {
                Ok(Some(HttpDirectoryClient::new(url, directory.timeout())?))
            }
            _ => Ok(None),
        }
    }

    /// Run the full registration handshake through `client`.
    pub async fn register_with<C: DirectoryClient>(&self, client: C) -> RegistrationReport {
        Registrar::new(client, self.registration_descriptors())
            .run()
            .await
    }
}
