//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the device
//! server, including error handling, configuration, the server runtime,
//! and the transport layer.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::DeviceServer;
pub use transport::{RunningTransport, TransportConfig, TransportService};
